use clap::Parser;
use ladle_tui::Cli;
use ladle_tui::run_main;

/// Parse CLI arguments, run the picker, and print the final selection.
#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    let cli = Cli::parse();
    let selection = run_main(cli).await?;
    println!("{}", serde_json::to_string_pretty(&selection)?);
    Ok(())
}
