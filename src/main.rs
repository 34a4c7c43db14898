use std::io::BufRead;

use askpanel::{FaqPanel, GeminiClient, GeminiConfig};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = GeminiClient::new(GeminiConfig::from_env()?)?;

    let mut panel = FaqPanel::new();
    panel.question = question_from_input()?;
    panel.submit(&client).await;

    println!("{}", panel.render());
    Ok(())
}

/// Command-line arguments joined by spaces, or the first line of stdin.
fn question_from_input() -> std::io::Result<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args.join(" "));
    }

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}
