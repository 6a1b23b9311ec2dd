//! label-studio: design, store and print label templates from the command line

mod commands;
mod config;
mod logger;

use clap::Parser;
use label_store::{DbService, SqliteTemplateStore};

use commands::Command;
use config::Config;

/// Label template studio
#[derive(Parser, Debug)]
#[command(name = "label-studio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Act for this tenant instead of TENANT_ID
    #[arg(long, global = true)]
    tenant: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(tenant) = cli.tenant {
        config.tenant_id = tenant;
    }
    config.ensure_dirs()?;
    logger::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::debug!(
        tenant_id = %config.tenant_id,
        database = %config.database_path,
        "label-studio starting"
    );

    let db = DbService::new(&config.database_path).await?;
    let store = SqliteTemplateStore::from(&db);

    let mut stdout = std::io::stdout().lock();
    let result = commands::run(cli.command, &store, &config, &mut stdout).await;
    db.pool.close().await;
    result
}
