use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use salary_engine::api::{AppState, SharedStore, create_router};
use salary_engine::clock::{BusinessClock, FixedClock, SystemClock};
use salary_engine::config::ConfigLoader;
use salary_engine::store::{InMemoryStore, SqliteStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Serves the salary engine HTTP API.
#[derive(Debug, Parser)]
#[command(name = "salary-engine", version, about)]
struct CliArgs {
    #[arg(
        long,
        env = "SALARY_ENGINE_CONFIG_DIR",
        value_name = "DIR",
        default_value = "./config/payroll",
        help = "Directory containing rules.yaml and optionally seed.yaml"
    )]
    config_dir: PathBuf,

    #[arg(
        long,
        env = "SALARY_ENGINE_DATABASE",
        value_name = "FILE",
        help = "SQLite database file; without it seed.yaml is served from memory"
    )]
    database: Option<PathBuf>,

    #[arg(long, help = "Load seed.yaml into the database before serving")]
    seed: bool,

    #[arg(
        long,
        env = "SALARY_ENGINE_BIND",
        value_name = "ADDR",
        default_value = "127.0.0.1:3000",
        help = "Address to listen on"
    )]
    bind: SocketAddr,

    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Fix the business date used for tenure instead of today"
    )]
    business_date: Option<NaiveDate>,
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info,tower=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn open_store(cli: &CliArgs, config: &ConfigLoader) -> Result<SharedStore> {
    match &cli.database {
        Some(path) => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("failed to open database {}", path.display()))?;
            if cli.seed {
                let Some(seed) = config.seed() else {
                    bail!("--seed given but {} has no seed.yaml", cli.config_dir.display());
                };
                store.seed(seed).context("failed to seed database")?;
                info!(database = %path.display(), "Seeded database");
            }
            Ok(Arc::new(store))
        }
        None => {
            let Some(seed) = config.seed() else {
                bail!(
                    "no --database given and {} has no seed.yaml",
                    cli.config_dir.display()
                );
            };
            Ok(Arc::new(InMemoryStore::from_seed(seed)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = CliArgs::parse();
    let config = ConfigLoader::load(&cli.config_dir)
        .with_context(|| format!("failed to load config from {}", cli.config_dir.display()))?;
    let store = open_store(&cli, &config)?;

    let clock: Arc<dyn BusinessClock> = match cli.business_date {
        Some(date) => Arc::new(FixedClock::on(date)),
        None => Arc::new(SystemClock),
    };

    let state = AppState::new(store, config.rules().clone(), clock);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(
        bind = %cli.bind,
        business_date = ?cli.business_date,
        "Salary engine listening"
    );

    axum::serve(listener, router).await?;
    Ok(())
}
