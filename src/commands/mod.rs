pub mod graphs;
pub mod help;
pub mod history;
pub mod latest;
pub mod predict;

use tracing::error;

use crate::App;

/// Dispatch one line of user input
///
/// Errors are reported here as concise user-facing messages; diagnostic
/// detail goes to the log. Returns false when the user asked to quit.
pub async fn handle_line(app: &App, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return true;
    }

    let command = parts[0];
    let args = &parts[1..];

    let result = match command {
        "predict" | "p" => predict::execute(app, args).await,
        "graphs" | "g" => graphs::execute(app, args).await,
        "latest" => latest::execute(app).await,
        "history" => history::execute(app, args).await,
        "help" | "?" => help::execute(),
        "quit" | "exit" | "q" => return false,
        _ => {
            println!("Unknown command '{}'. Type `help` for the command list.", command);
            return true;
        }
    };

    if let Err(e) = result {
        error!("Error executing command {}: {}", command, e);
        println!("❌ {}", e);
    }

    true
}
