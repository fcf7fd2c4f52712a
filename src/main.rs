//! CLI entry point for inkpost

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(version = "0.1.0")]
#[command(about = "A markdown-backed blog post store", long_about = None)]
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
    /// List stored posts
    List,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (defaults to a slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Markdown body of the new post
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Render a post to HTML
    Show {
        /// Slug of the post to render
        slug: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpost=debug,info"
    } else {
        "inkpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::List => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::list::run(&blog).await?;
        }

        Commands::New {
            title,
            slug,
            content,
        } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            inkpost::commands::new::run(&blog, &title, slug.as_deref(), &content).await?;
        }

        Commands::Show { slug } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::show::run(&blog, &slug).await?;
        }

        Commands::Version => {
            println!("inkpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
