use async_trait::async_trait;
use jetshare_core::repository::JetRepository;
use jetshare_seatmap::SeatLayout;
use sqlx::PgPool;
use tracing::warn;

pub struct PostgresJetRepository {
    pool: PgPool,
}

impl PostgresJetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JetRepository for PostgresJetRepository {
    async fn get_seat_layout(
        &self,
        jet_id: &str,
    ) -> Result<Option<SeatLayout>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as(
            "SELECT seat_layout FROM jets WHERE id = $1",
        )
        .bind(jet_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((raw,)) = row else {
            return Ok(None);
        };

        match serde_json::from_value::<SeatLayout>(raw) {
            Ok(layout) => Ok(Some(layout)),
            Err(e) => {
                warn!("Stored seat layout for jet {} is invalid: {}", jet_id, e);
                Err(Box::new(e))
            }
        }
    }
}
