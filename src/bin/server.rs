//! Blog server binary.
//!
//! Resolves the environment, opens the SQLite database, runs migrations
//! and hands everything to the HTTP layer.

use std::net::IpAddr;
use std::path::PathBuf;

use blog::api::{self, ApiError, Config, Env};
use blog::db::{Database, DbError, SqliteDatabase};
use blog::paths::get_db_path;
use clap::Parser;
use miette::Diagnostic;
use thiserror::Error;
use tracing::info;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(blog::binary::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(blog::binary::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "blog-server")]
#[command(author, version, about = "Blog server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Database file path (defaults to XDG data directory: ~/.local/share/blog/blog.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Administrator contact email (overrides the ADMIN_EMAIL environment variable)
    #[arg(long)]
    admin_email: Option<String>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    run().await.map_err(Into::into)
}

async fn run() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    // Missing configuration must stop the process before anything else
    let env = Env::resolve(cli.admin_email)?;

    api::init_tracing();

    let db_path = cli.db.unwrap_or_else(get_db_path);
    info!("Opening database at {:?}", db_path);

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    info!("Database migrations complete");

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        env,
        db,
    )
    .await?;

    Ok(())
}
