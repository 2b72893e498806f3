use clap::Parser;
use hobbyist::cli::{Cli, Commands, MigrateCommand};
use hobbyist::config::Config;
use hobbyist::db::{self, PeopleStorage, SqlitePool, schema};
use hobbyist::router::{AppState, app_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        auto_migrate = cfg.auto_migrate
    );

    let pool = db::connect(&cfg).await?;

    match cli.command() {
        Commands::Serve => serve(&cfg, pool).await?,
        Commands::Migrate(MigrateCommand::Up) => schema::up(&pool).await?,
        Commands::Migrate(MigrateCommand::Down) => schema::down(&pool).await?,
    }
    Ok(())
}

async fn serve(cfg: &Config, pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.auto_migrate && schema::ensure_schema(&pool).await? {
        info!("created missing people table");
    }

    let state = AppState::new(PeopleStorage::new(pool), cfg.cookie_key()?);
    let app = app_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}
