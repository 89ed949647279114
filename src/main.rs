//! # edublog CLI
//!
//! The `edublog` binary initializes the post database, imports posts,
//! runs audience-scoped searches, exercises the analysis components, and
//! starts the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! edublog --config ./config/edublog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `edublog init` | Create the SQLite database and run schema migrations |
//! | `edublog import <file.json>` | Import posts from a JSON array |
//! | `edublog search "<query>"` | Search posts (`--audience student\|author`) |
//! | `edublog analyze --title --body` | Tags, summary, topic, reading time |
//! | `edublog moderate "<text>"` | Denylist moderation verdict |
//! | `edublog respond "<comment>"` | Templated comment acknowledgment |
//! | `edublog generate "<title>"` | Templated post draft |
//! | `edublog serve` | Start the HTTP server |
//!
//! Logs go to stderr and are filtered with `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use edublog::{analyze, config, import, migrate, search, server};
use edublog_core::models::Audience;

/// edublog: content search and rule-based analysis for an educational blog.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/edublog.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "edublog",
    about = "Content search and rule-based analysis for an educational blog",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/edublog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Idempotent: running it multiple times is safe.
    Init,

    /// Import posts from a JSON file containing an array of posts.
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },

    /// Search posts.
    ///
    /// Queries of up to two characters use accent-insensitive substring
    /// matching ordered by recency; longer queries use trigram similarity.
    Search {
        /// Search text.
        query: String,

        /// Who is searching: `student` (active posts only) or `author`.
        #[arg(long, default_value = "student")]
        audience: Audience,
    },

    /// Analyze a post: tags, summary, topic, word count, reading time.
    Analyze {
        #[arg(long)]
        title: String,

        #[arg(long)]
        body: String,
    },

    /// Check text against the moderation denylist.
    Moderate {
        content: String,
    },

    /// Produce an automatic acknowledgment for a comment.
    Respond {
        comment: String,
    },

    /// Draft an opening paragraph for a post title.
    Generate {
        title: String,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli {
        config: config_path,
        command,
    } = Cli::parse();
    let load = || config::load_config(&config_path);

    match command {
        Commands::Init => {
            let cfg = load()?;
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized at {}", cfg.db.path.display());
        }
        Commands::Import { file } => {
            import::run_import(&load()?, &file).await?;
        }
        Commands::Search { query, audience } => {
            search::run_search(&load()?, &query, audience).await?;
        }
        Commands::Analyze { title, body } => {
            analyze::run_analyze(&load()?, &title, &body)?;
        }
        Commands::Moderate { content } => {
            analyze::run_moderate(&load()?, &content)?;
        }
        // Template commands don't require config
        Commands::Respond { comment } => {
            analyze::run_respond(&comment)?;
        }
        Commands::Generate { title } => {
            analyze::run_generate(&title)?;
        }
        Commands::Serve => {
            server::run_server(&load()?).await?;
        }
    }

    Ok(())
}
