use std::io::Write;
use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod error;
mod models;
mod services;
mod utils;

use api::predictor::PredictorClient;
use config::Config;
use services::chart_service::ChartStudio;
use services::company_service::CompanyDirectory;
use services::pipeline::RenderPipeline;

/// Shared application context handed to every command
pub struct App {
    pub pipeline: Arc<RenderPipeline>,
    pub studio: ChartStudio,
    pub client: Arc<PredictorClient>,
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("tickerdeck=info".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("📊 Starting tickerdeck...");

    let config = Config::from_env();
    info!("Backend: {}", config.api_base_url);
    info!("Charts: {}", config.chart_dir.display());

    let client = Arc::new(PredictorClient::new(config.api_base_url.clone()));

    let studio = match ChartStudio::new(
        Arc::clone(&client) as Arc<dyn services::chart_service::GraphProvider>,
        &config,
    ) {
        Ok(studio) => studio,
        Err(e) => {
            error!("Failed to prepare chart output: {}", e);
            println!("❌ {}", e);
            return;
        }
    };

    let pipeline = Arc::new(RenderPipeline::new(
        Arc::clone(&client) as Arc<dyn services::pipeline::ScoreProvider>,
        CompanyDirectory::builtin(),
    ));

    let app = App {
        pipeline,
        studio,
        client,
    };

    println!("tickerdeck — type `help` for commands, `quit` to exit.");
    prompt();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if !commands::handle_line(&app, &line).await {
            break;
        }
        prompt();
    }

    info!("Shutting down");
}
