//! sitenav CLI - directory page generator and navigation injector for static sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::Layout;

#[derive(Parser)]
#[command(name = "sitenav")]
#[command(about = "Directory page generator and navigation injector for static HTML sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to sitenav.toml config file
    #[arg(short, long, default_value = "sitenav.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the directory page from the template
    Generate {
        /// Output file (defaults to config or the layout's output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview the site with the navigation injected into every page
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Site root to serve
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Regenerate the directory page when pages are added or removed
        #[arg(long)]
        watch: bool,

        /// Open the site in a browser
        #[arg(long)]
        open: bool,
    },

    /// Create a starter config, exclusion list, template and navigation
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,

        /// Deployment layout to scaffold
        #[arg(long, value_enum, default_value_t = Layout::Pages)]
        layout: Layout,
    },

    /// Print the browser-side navigation script
    Script,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Generate { output } => {
            commands::generate::run(&cli.config, output)?;
        }
        Commands::Serve {
            port,
            dir,
            watch,
            open,
        } => {
            commands::serve::run(&cli.config, port, dir, watch, open).await?;
        }
        Commands::Init { yes, layout } => {
            commands::init::run(&cli.config, layout, yes)?;
        }
        Commands::Script => {
            commands::script::run(&cli.config)?;
        }
    }

    Ok(())
}
