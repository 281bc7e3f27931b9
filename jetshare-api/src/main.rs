use std::sync::Arc;
use std::net::SocketAddr;
use std::time::Duration;
use anyhow::Context;
use jetshare_api::{app, state::{AppState, AuthConfig}};
use jetshare_core::LayoutSource;
use jetshare_store::{DbClient, HttpLayoutSource, PostgresJetRepository, PostgresJetShareOfferRepository, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jetshare_api=debug,jetshare_store=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = jetshare_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting JetShare API on port {}", config.server.port);
    tracing::debug!(?config, "Loaded configuration");

    // Postgres
    let db = DbClient::new(config.database.url.expose(), config.database.max_connections)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    // Redis
    let redis = match &config.redis {
        Some(redis_config) => Some(Arc::new(
            RedisClient::new(&redis_config.url)
                .await
                .context("Failed to connect to Redis")?,
        )),
        None => {
            tracing::info!("Redis not configured; layout cache and rate limiting disabled");
            None
        }
    };

    // Upstream layout service
    let upstream_layouts = match &config.layout_service.base_url {
        Some(url) => {
            let source = HttpLayoutSource::new(url, Duration::from_millis(config.layout_service.timeout_ms))
                .context("Failed to build layout client")?;
            Some(Arc::new(source) as Arc<dyn LayoutSource>)
        }
        None => None,
    };

    let app_state = AppState {
        jet_repo: Arc::new(PostgresJetRepository::new(db.pool.clone())),
        offer_repo: Arc::new(PostgresJetShareOfferRepository::new(db.pool.clone())),
        redis,
        upstream_layouts,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.expose().clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        rate_limit: config.rate_limit.clone(),
        seat_map: config.seat_map.clone(),
        layout_cache_seconds: config.redis.as_ref().map(|r| r.layout_cache_seconds).unwrap_or(0),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>()
    ).await?;

    Ok(())
}
