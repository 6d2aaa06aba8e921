use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_kernel::settings::Settings;

/// Libris library catalog service
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect, migrate (if enabled) and serve HTTP (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
    /// Print the effective settings
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().context("failed to load Libris settings")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            libris_telemetry::init(&settings.telemetry)?;
            libris_app::app::serve(&settings).await
        }
        Command::Migrate => {
            libris_telemetry::init(&settings.telemetry)?;
            let applied = libris_app::app::migrate(&settings).await?;
            tracing::info!(applied, "migrate finished");
            Ok(())
        }
        Command::Config => {
            println!("{:#?}", settings);
            Ok(())
        }
    }
}
