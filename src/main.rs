// src/main.rs
// NextMove - reply suggestions for the message you just got

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{AppContext, Cli, Commands, ConfigAction};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".nextmove/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Quiet by default so stdout stays the command's output
    let log_level = match cli.verbose {
        0 => std::env::var("NEXTMOVE_LOG")
            .ok()
            .and_then(|v| v.trim().parse::<Level>().ok())
            .unwrap_or(Level::WARN),
        1 => Level::INFO,
        _ => Level::DEBUG,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = AppContext::load();

    match cli.command {
        Commands::Reply {
            message,
            goal,
            style,
            json,
        } => cli::run_reply(&ctx, message, goal, style, json).await?,
        Commands::Regenerate { style, id, json } => cli::run_regenerate(&ctx, style, id, json).await?,
        Commands::History { clear, json } => cli::run_history(&ctx, clear, json).await?,
        Commands::Style { action } => cli::run_style(&ctx, action).await?,
        Commands::Character { action } => cli::run_character(&ctx, action).await?,
        Commands::Analyze { file, character } => cli::run_analyze(&ctx, file, character).await?,
        Commands::Suggest {
            file,
            character,
            tone,
        } => cli::run_suggest(&ctx, file, character, tone).await?,
        Commands::Config { action } => match action {
            ConfigAction::Check => cli::run_config_check(&ctx)?,
        },
    }

    Ok(())
}
