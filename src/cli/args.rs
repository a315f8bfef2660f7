use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "salat-flyer",
    version,
    author,
    about = "Render shareable prayer-time flyers for your masjid"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter flyer file to fill in
    Init {
        /// Where to write the flyer file
        #[arg(short, long, default_value = "flyer.toml")]
        output: PathBuf,
        /// Prefill the daily times from the configured location
        #[arg(long)]
        calculate: bool,
        /// Flyer date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Render a flyer file to PNG
    Render {
        /// Flyer file (TOML)
        input: PathBuf,
        /// Output PNG path (default: prayer-times-<date>-<name>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Canvas width in pixels
        #[arg(long)]
        width: Option<u32>,
        /// Canvas height in pixels
        #[arg(long)]
        height: Option<u32>,
        /// Override the theme (emerald, navy, burgundy, gold)
        #[arg(long)]
        theme: Option<String>,
    },
    /// Live terminal preview of a flyer file
    Preview {
        /// Flyer file (TOML)
        input: PathBuf,
    },
    /// List the sections a flyer file will produce, in order
    Sections {
        /// Flyer file (TOML)
        input: PathBuf,
        /// Print the laid-out sections as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective settings
    Config,
}
