pub mod app_config;
pub mod database;
pub mod jet_repo;
pub mod offer_repo;
pub mod redis_repo;
pub mod layout_client;

pub use database::DbClient;
pub use redis_repo::RedisClient;
pub use jet_repo::PostgresJetRepository;
pub use offer_repo::PostgresJetShareOfferRepository;
pub use layout_client::HttpLayoutSource;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
