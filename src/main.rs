//! CLI entry point for newshub

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newshub::commands::list::ListOptions;

/// Environment variable overriding the configured API base URL
const API_URL_ENV: &str = "WORDPRESS_API_URL";

#[derive(Parser)]
#[command(name = "newshub")]
#[command(version)]
#[command(about = "A news site served from a WordPress REST API", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// WordPress REST API base URL (overrides config and WORDPRESS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default _config.yml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the web server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to server.port in the config)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in the config)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List content from the CMS
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Page of posts to list
        #[arg(long, default_value = "1")]
        page: u32,

        /// Only list posts in this category (slug)
        #[arg(long)]
        category: Option<String>,

        /// Only list posts matching this search term
        #[arg(long)]
        search: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "newshub=debug,info"
    } else {
        "newshub=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing NewsHub site in {:?}", target_dir);
            if newshub::commands::init::init_site(&target_dir)? {
                println!("Initialized NewsHub site in {:?}", target_dir);
            } else {
                println!("Config already present in {:?}", target_dir);
            }
        }

        Commands::Server { port, ip } => {
            let newshub = load(&base_dir, cli.api_url)?;
            let ip = ip.unwrap_or_else(|| newshub.config.server.ip.clone());
            let port = port.unwrap_or(newshub.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            newshub.serve(&ip, port).await?;
        }

        Commands::List {
            r#type,
            page,
            category,
            search,
        } => {
            let newshub = load(&base_dir, cli.api_url)?;
            let options = ListOptions {
                page,
                category,
                search,
            };
            newshub::commands::list::run(&newshub, &r#type, &options).await?;
        }

        Commands::Version => {
            println!("newshub version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Load the site config, then apply the environment and CLI API URL overrides
fn load(base_dir: &std::path::Path, api_url: Option<String>) -> Result<newshub::NewsHub> {
    let mut newshub = newshub::NewsHub::new(base_dir)?;
    newshub
        .config
        .override_api_base_url(std::env::var(API_URL_ENV).ok());
    newshub.config.override_api_base_url(api_url);
    Ok(newshub)
}
