//! CLI entry point for cardioguard-site

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardioguard_site::{commands, Site};

#[derive(Parser)]
#[command(name = "cardioguard-site")]
#[command(version)]
#[command(about = "CardioGuard landing site: content pages, sitemap and waitlist signups", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List published content
    List {
        /// Type of content to list (article, comparison, faq)
        #[arg(default_value = "article")]
        r#type: String,
    },

    /// Print the sitemap, or write it to a file
    Sitemap {
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; real deployments set variables directly
    dotenv::dotenv().ok();

    let filter = if cli.debug {
        "cardioguard_site=debug,tower_http=debug,info"
    } else {
        "cardioguard_site=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            commands::serve::run(site, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site, &r#type)?;
        }

        Commands::Sitemap { output } => {
            let site = Site::new(&base_dir)?;
            commands::sitemap::run(&site, output.as_deref())?;
        }

        Commands::Version => {
            println!("cardioguard-site version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
