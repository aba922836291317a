//! CLI entry point for bucket-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bucket-blog")]
#[command(version)]
#[command(about = "A Markdown blog served from S3-compatible object storage", long_about = None)]
struct Cli {
    /// Path to the site config file
    #[arg(short, long, global = true, default_value = "_config.yml")]
    config: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the config value)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List all posts, newest first
    List,

    /// Print one post
    Show {
        /// Slug of the post
        slug: String,

        /// Render the body to HTML instead of printing Markdown
        #[arg(long)]
        html: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bucket_blog=debug,tower_http=debug,info"
    } else {
        "bucket_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Version = cli.command {
        println!("bucket-blog version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let blog = bucket_blog::Blog::new(Some(&cli.config))?;

    match cli.command {
        Commands::Serve { port, ip } => {
            let ip = ip.unwrap_or_else(|| blog.config.server.ip.clone());
            let port = port.unwrap_or(blog.config.server.port);
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blog.serve(&ip, port).await?;
        }

        Commands::List => blog.list().await?,

        Commands::Show { slug, html } => blog.show(&slug, html).await?,

        Commands::Version => {}
    }

    Ok(())
}
