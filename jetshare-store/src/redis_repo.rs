use jetshare_seatmap::SeatLayout;
use redis::{AsyncCommands, RedisResult};
use tracing::{debug, warn};
use crate::StoreError;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

fn layout_key(jet_id: &str) -> String {
    format!("jet:{}:seat_layout", jet_id)
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    /// Cached layout for a jet; undecodable entries count as a miss
    pub async fn get_cached_layout(&self, jet_id: &str) -> RedisResult<Option<SeatLayout>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(layout_key(jet_id)).await?;

        Ok(raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(layout) => Some(layout),
            Err(e) => {
                warn!("Ignoring corrupt cached layout for jet {}: {}", jet_id, e);
                None
            }
        }))
    }

    pub async fn cache_layout(&self, jet_id: &str, layout: &SeatLayout, ttl_seconds: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(layout)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(layout_key(jet_id), json, ttl_seconds).await?;
        debug!("Cached seat layout for jet {} ({}s)", jet_id, ttl_seconds);
        Ok(())
    }

    pub async fn check_rate_limit(&self, key: &str, limit: i64, window_seconds: i64) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, window_seconds)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count <= limit)
    }
}
