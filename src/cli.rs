use clap::{Parser, Subcommand};
use ffcompose_args::EscapeLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ffcompose")]
#[command(author, version, about = "Render declarative media jobs into ffmpeg arguments")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a job file into ffmpeg arguments
    Render {
        /// Job file (TOML, or JSON with a .json extension)
        #[arg(required = true)]
        job: PathBuf,

        /// Print the arguments as a JSON array
        #[arg(long, conflicts_with = "shell")]
        json: bool,

        /// Print a shell-quoted command line
        #[arg(long)]
        shell: bool,
    },

    /// Check that a job file parses and builds
    Validate {
        /// Job file to validate
        #[arg(required = true)]
        job: PathBuf,
    },

    /// Escape text for use as a filter option value
    Escape {
        /// Text to escape
        text: String,

        /// Escaping level: expression, filtergraph or full
        #[arg(long, default_value = "full")]
        level: EscapeLevel,
    },

    /// Display version information
    Version,
}
