mod cli;
mod config;
mod flyer;
mod models;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    match cli.command {
        Commands::Init {
            output,
            calculate,
            date,
            force,
        } => {
            handlers::handle_init(&config, &output, calculate, date.as_deref(), force)?;
        }
        Commands::Render {
            input,
            output,
            width,
            height,
            theme,
        } => {
            handlers::handle_render(&config, &input, output, width, height, theme.as_deref())
                .await?;
        }
        Commands::Preview { input } => {
            handlers::handle_preview(&input)?;
        }
        Commands::Sections { input, json } => {
            handlers::handle_sections(&config, &input, json)?;
        }
        Commands::Config => {
            handlers::handle_config(&config)?;
        }
    }

    Ok(())
}
