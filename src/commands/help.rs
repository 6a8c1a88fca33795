use crate::error::AppError;

pub fn execute() -> Result<(), AppError> {
    println!(
        "📖 tickerdeck commands\n\
         \n\
         🎯 Predictions\n\
         `predict <T1,T2,..>` - Score tickers and render one card each\n\
         `latest` - Most recent snapshot per tracked ticker\n\
         `history <TICKER>` - Recent score records for one ticker\n\
         \n\
         📊 Graphs\n\
         `graphs <TICKER>` - Render score trend, feature importance and\n\
         sentiment charts as PNG files\n\
         \n\
         Type `quit` to exit. Tickers are comma-separated; case does not\n\
         matter (AAPL and aapl both work)."
    );

    Ok(())
}
