use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::database::{AdapterError, DataAdapter};

use super::SeedStep;

fn as_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("seed rows are object literals"),
    }
}

/// Seeds the growth trees that anchor every child's progress dashboard.
pub struct GrowthTreeSeed;

pub(super) fn growth_tree_rows() -> Vec<Value> {
    vec![
        json!({
            "tree_id": "piano-foundation",
            "name": "鋼琴成長樹",
            "instrument": "piano",
            "description": "Foundation path for young pianists",
            "is_active": true
        }),
        json!({
            "tree_id": "violin-foundation",
            "name": "小提琴成長樹",
            "instrument": "violin",
            "description": "Foundation path for young violinists",
            "is_active": true
        }),
        json!({
            "tree_id": "music-theory",
            "name": "樂理成長樹",
            "instrument": "theory",
            "description": "Listening, rhythm and notation basics",
            "is_active": true
        }),
    ]
}

#[async_trait]
impl SeedStep for GrowthTreeSeed {
    fn name(&self) -> &'static str {
        "growth-trees"
    }

    fn collection(&self) -> &'static str {
        "growth_trees"
    }

    async fn run(&self, adapter: &DataAdapter) -> Result<usize, AdapterError> {
        let rows = growth_tree_rows();
        let count = rows.len();
        for row in rows {
            adapter.insert(self.collection(), &as_object(row)).await?;
        }
        Ok(count)
    }
}

/// Seeds the per-tree goals children progress through.
pub struct GrowthGoalSeed;

pub(super) fn growth_goal_rows() -> Vec<Value> {
    vec![
        json!({"tree_id": "piano-foundation", "name": "正確坐姿與手型", "sort_order": 1}),
        json!({"tree_id": "piano-foundation", "name": "五指原位彈奏", "sort_order": 2}),
        json!({"tree_id": "piano-foundation", "name": "雙手合奏短曲", "sort_order": 3}),
        json!({"tree_id": "violin-foundation", "name": "持琴與運弓姿勢", "sort_order": 1}),
        json!({"tree_id": "violin-foundation", "name": "空弦長音", "sort_order": 2}),
        json!({"tree_id": "violin-foundation", "name": "第一把位音階", "sort_order": 3}),
        json!({"tree_id": "music-theory", "name": "節奏模仿", "sort_order": 1}),
        json!({"tree_id": "music-theory", "name": "認識五線譜", "sort_order": 2}),
    ]
}

#[async_trait]
impl SeedStep for GrowthGoalSeed {
    fn name(&self) -> &'static str {
        "growth-goals"
    }

    fn collection(&self) -> &'static str {
        "growth_goals"
    }

    async fn run(&self, adapter: &DataAdapter) -> Result<usize, AdapterError> {
        let rows = growth_goal_rows();
        let count = rows.len();
        for row in rows {
            adapter.insert(self.collection(), &as_object(row)).await?;
        }
        Ok(count)
    }
}

/// Seeds the initial (version 1) progress template for each tree. Later
/// versions are created through the dashboard and compared via
/// /api/version-comparison.
pub struct ProgressTemplateSeed;

pub(super) fn progress_template_rows() -> Vec<Value> {
    growth_tree_rows()
        .into_iter()
        .map(|tree| {
            json!({
                "tree_id": tree["tree_id"],
                "version": 1,
                "name": tree["name"],
                "is_current": true
            })
        })
        .collect()
}

#[async_trait]
impl SeedStep for ProgressTemplateSeed {
    fn name(&self) -> &'static str {
        "progress-templates"
    }

    fn collection(&self) -> &'static str {
        "progress_templates"
    }

    async fn run(&self, adapter: &DataAdapter) -> Result<usize, AdapterError> {
        let rows = progress_template_rows();
        let count = rows.len();
        for row in rows {
            adapter.insert(self.collection(), &as_object(row)).await?;
        }
        Ok(count)
    }
}
