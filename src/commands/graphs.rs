use tracing::info;

use crate::error::AppError;
use crate::App;

/// `graphs <ticker>` — fetch the graph view data for one ticker and render
/// the three chart PNGs
pub async fn execute(app: &App, args: &[&str]) -> Result<(), AppError> {
    info!("🎨 Graphs command called with args: {:?}", args);

    let ticker = args.first().copied().unwrap_or("");
    let symbol = ticker.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::EmptyInput);
    }

    println!("{} - Company Graphs", symbol);
    let paths = app.studio.render_for(&symbol).await?;
    for path in paths {
        println!("  🖼  {}", path.display());
    }

    Ok(())
}
