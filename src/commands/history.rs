use tracing::info;

use crate::error::AppError;
use crate::services::snapshot_service;
use crate::App;

/// `history <ticker>` — show a ticker's recent score records
pub async fn execute(app: &App, args: &[&str]) -> Result<(), AppError> {
    info!("📜 History command called with args: {:?}", args);

    let ticker = args.first().copied().unwrap_or("");
    let symbol = ticker.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let records = app.client.history(&symbol).await?;
    println!("{}", snapshot_service::format_history(&symbol, &records));

    Ok(())
}
