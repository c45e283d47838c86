//! CLI module for SiteQA
//!
//! Command-line parsing and handling for the siteqa-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod config;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SiteQA - scrape web pages and answer questions over them
#[derive(Parser, Debug)]
#[command(
    name = "siteqa-server",
    version,
    about = "SiteQA - scrape web pages and answer questions over them",
    long_about = "Scrapes web pages into a hosted assistant with a file-search vector store,\n\
                  then answers questions from that content with numbered citations.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a config.",
    after_help = "EXAMPLES:\n    \
                  siteqa-server init               # Write siteqa.toml and .env.example\n    \
                  siteqa-server config --validate  # Check the configuration\n    \
                  siteqa-server                    # Start the server\n    \
                  siteqa-server --config my.toml   # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "siteqa.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold siteqa.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "8000")]
        port: u16,
    },

    /// Show the resolved configuration
    Config {
        /// Validate the configuration (API key, cleanup patterns)
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
