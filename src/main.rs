use clap::Parser;
use miette::{IntoDiagnostic, Result};
use payvault::application::service::PaymentService;
use payvault::config::Config;
use payvault::domain::ports::{EventPublisherBox, PaymentCacheBox, PaymentStoreBox};
use payvault::infrastructure::in_memory::{
    InMemoryEventLog, InMemoryPaymentCache, InMemoryPaymentStore,
};
use payvault::infrastructure::postgres::PostgresPaymentStore;
use payvault::infrastructure::redis::{RedisPaymentCache, RedisStreamPublisher};
use payvault::interfaces::http;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the HTTP server to (overrides PAYVAULT_PORT).
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Run with in-memory adapters instead of PostgreSQL and Redis.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("payvault=info".parse().into_diagnostic()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().into_diagnostic()?;
    let bind_addr = cli.bind.unwrap_or(config.bind_addr);

    let service = if cli.in_memory {
        info!("using in-memory adapters");
        let store: PaymentStoreBox = Box::new(InMemoryPaymentStore::new());
        let cache: PaymentCacheBox = Box::new(InMemoryPaymentCache::new());
        let publisher: EventPublisherBox = Box::new(InMemoryEventLog::new());

        PaymentService::new(store, cache, publisher, config.event_topic.clone())
    } else {
        let database_url = config.require_database_url().into_diagnostic()?;
        info!("connecting to postgres");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .into_diagnostic()?;
        let store =
            PostgresPaymentStore::new(pool, config.payment_table.clone(), config.op_timeout);
        store.ensure_schema().await.into_diagnostic()?;

        let redis_url = config.require_redis_url().into_diagnostic()?;
        info!("connecting to redis");
        let client = redis::Client::open(redis_url).into_diagnostic()?;
        let conn = client.get_connection_manager().await.into_diagnostic()?;
        let cache = RedisPaymentCache::new(conn.clone(), config.op_timeout);
        let publisher = RedisStreamPublisher::new(conn, config.op_timeout);

        PaymentService::new(
            Box::new(store),
            Box::new(cache),
            Box::new(publisher),
            config.event_topic.clone(),
        )
    };

    let router = http::create_router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .into_diagnostic()?;
    info!(addr = %bind_addr, topic = %config.event_topic, "payvault listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
