use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postdigest_core::{storage::Database, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "postdigest")]
#[command(author, version, about = "AI excerpts and summaries for your posts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered AI models
    Models,
    /// Generate text for arbitrary content with a model
    Generate {
        /// Registry id of the model (see `postdigest models`)
        #[arg(short = 'm', long)]
        model: String,
        /// Prompt template placed before the content
        #[arg(short = 'p', long)]
        prompt: String,
        /// Read content from a file instead of stdin
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
    /// Add a post from an HTML or text file
    Add {
        #[arg(short = 't', long)]
        title: String,
        #[arg(short = 'f', long)]
        file: PathBuf,
        #[arg(long, default_value = "post")]
        post_type: String,
    },
    /// List all posts
    List,
    /// Generate and store the excerpt and summary of a post
    Summarize {
        /// Post ID
        id: i64,
    },
    /// Show a post with its stored excerpt and summary
    Show {
        /// Post ID
        id: i64,
    },
    /// Manually set or clear the excerpt and summary of a post
    Edit {
        /// Post ID
        id: i64,
        #[arg(long, conflicts_with = "clear_excerpt")]
        excerpt: Option<String>,
        #[arg(long, conflicts_with = "clear_summary")]
        summary: Option<String>,
        #[arg(long)]
        clear_excerpt: bool,
        #[arg(long)]
        clear_summary: bool,
    },
    /// Print the post content with the digest rendered in
    Render {
        /// Post ID
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Models => commands::models::run(&config),
        Commands::Generate { model, prompt, file } => {
            commands::generate::run(&config, &model, &prompt, file.as_deref()).await
        }
        Commands::Add {
            title,
            file,
            post_type,
        } => {
            let db = Database::new(&config).await?;
            commands::add::run(&db, &title, &file, &post_type).await
        }
        Commands::List => {
            let db = Database::new(&config).await?;
            commands::list::run(&db).await
        }
        Commands::Summarize { id } => {
            let db = Database::new(&config).await?;
            commands::summarize::run(&db, &config, id).await
        }
        Commands::Show { id } => {
            let db = Database::new(&config).await?;
            commands::show::run(&db, &config, id).await
        }
        Commands::Edit {
            id,
            excerpt,
            summary,
            clear_excerpt,
            clear_summary,
        } => {
            let db = Database::new(&config).await?;
            let changes = commands::edit::Changes {
                excerpt,
                summary,
                clear_excerpt,
                clear_summary,
            };
            commands::edit::run(&db, &config, id, changes).await
        }
        Commands::Render { id } => {
            let db = Database::new(&config).await?;
            commands::render::run(&db, &config, id).await
        }
    }
}
