use tracing::info;

use crate::error::AppError;
use crate::services::snapshot_service;
use crate::App;

/// `latest` — show the most recent scheduler snapshot per tracked ticker
pub async fn execute(app: &App) -> Result<(), AppError> {
    info!("🗞 Latest command called");

    let scores = app.client.latest().await?;
    println!("{}", snapshot_service::format_latest(&scores));

    Ok(())
}
