pub mod steps;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::database::{AdapterError, DataAdapter};

/// SQLSTATE for "relation does not exist"; a step hitting this means the
/// schema has not been provisioned yet.
const SQLSTATE_UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed step '{step}' requires table '{table}'")]
    SchemaMissing { step: String, table: String },

    #[error("seed step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        source: AdapterError,
    },
}

/// One stage of the initialization pipeline. Each step populates a single
/// collection and reports how many rows it inserted.
#[async_trait]
pub trait SeedStep: Send + Sync {
    fn name(&self) -> &'static str;
    fn collection(&self) -> &'static str;
    async fn run(&self, adapter: &DataAdapter) -> Result<usize, AdapterError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: String,
    pub collection: String,
    pub inserted: usize,
}

/// Aggregate outcome of a full pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub steps: Vec<StepReport>,
}

impl SeedReport {
    pub fn total_inserted(&self) -> usize {
        self.steps.iter().map(|s| s.inserted).sum()
    }
}

/// Runs seed steps in order, stopping at the first failure. Later steps
/// reference rows created by earlier ones, so order matters.
pub struct SeedRunner {
    steps: Vec<Box<dyn SeedStep>>,
}

impl SeedRunner {
    pub fn new(steps: Vec<Box<dyn SeedStep>>) -> Self {
        Self { steps }
    }

    /// The standard pipeline: trees, then their goals, then templates.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(steps::GrowthTreeSeed),
            Box::new(steps::GrowthGoalSeed),
            Box::new(steps::ProgressTemplateSeed),
        ])
    }

    pub async fn run(&self, adapter: &DataAdapter) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();
        for step in &self.steps {
            tracing::info!("Running seed step: {}", step.name());
            let inserted = step.run(adapter).await.map_err(|e| {
                if e.sqlstate().as_deref() == Some(SQLSTATE_UNDEFINED_TABLE) {
                    SeedError::SchemaMissing {
                        step: step.name().to_string(),
                        table: step.collection().to_string(),
                    }
                } else {
                    SeedError::StepFailed {
                        step: step.name().to_string(),
                        source: e,
                    }
                }
            })?;
            report.steps.push(StepReport {
                step: step.name().to_string(),
                collection: step.collection().to_string(),
                inserted,
            });
        }
        tracing::info!(
            "Seed pipeline complete: {} rows across {} steps",
            report.total_inserted(),
            report.steps.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_totals_across_steps() {
        let report = SeedReport {
            steps: vec![
                StepReport {
                    step: "growth-trees".into(),
                    collection: "growth_trees".into(),
                    inserted: 2,
                },
                StepReport {
                    step: "growth-goals".into(),
                    collection: "growth_goals".into(),
                    inserted: 6,
                },
            ],
        };
        assert_eq!(report.total_inserted(), 8);
    }

    #[test]
    fn standard_pipeline_order() {
        let runner = SeedRunner::standard();
        let names: Vec<&str> = runner.steps.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["growth-trees", "growth-goals", "progress-templates"]
        );
    }
}
