use tracing::info;

use crate::error::AppError;
use crate::App;

/// `predict <tickers>` — score a comma-separated ticker list and render
/// one card per result, in request order
pub async fn execute(app: &App, args: &[&str]) -> Result<(), AppError> {
    info!("📊 Predict command called with args: {:?}", args);

    let input = args.join(" ");
    let count = app.pipeline.submit(&input).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.pipeline.render_to(&mut out)?;
    info!("Printed {} card(s)", count);

    Ok(())
}
