// Operational CLI for the Hanami API: run the seed pipeline, check which
// environment variables are set, or ping the database without starting the
// HTTP server.
use anyhow::Context;
use clap::{Parser, Subcommand};

use hanami_api::config::{
    AppConfig, ENV_BASE_URL, ENV_DATABASE_ELEVATED_URL, ENV_DATABASE_URL, ENV_WEBHOOK_SECRET,
    ENV_WEBHOOK_URL,
};
use hanami_api::seed::SeedRunner;
use hanami_api::state::AppState;

#[derive(Parser)]
#[command(name = "hanami", about = "Hanami API operational tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the progress-data seed pipeline against the elevated connection
    Seed,
    /// Report which expected environment variables are set (presence only)
    Env,
    /// Ping the database through the standard connection
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let state = AppState::new(AppConfig::from_env());

    match cli.command {
        Command::Seed => {
            let report = SeedRunner::standard()
                .run(&state.elevated)
                .await
                .context("seed pipeline failed")?;
            for step in &report.steps {
                println!("{}: {} rows into {}", step.step, step.inserted, step.collection);
            }
            println!("total: {} rows", report.total_inserted());
        }
        Command::Env => {
            let names = [
                ENV_DATABASE_URL,
                ENV_DATABASE_ELEVATED_URL,
                ENV_WEBHOOK_URL,
                ENV_WEBHOOK_SECRET,
                ENV_BASE_URL,
            ];
            for name in names {
                let presence = if std::env::var(name).is_ok() {
                    "已設置"
                } else {
                    "未設置"
                };
                println!("{}: {}", name, presence);
            }
        }
        Command::Health => {
            state
                .pools
                .health_check()
                .await
                .context("database ping failed")?;
            println!("database: ok");
        }
    }

    Ok(())
}
