use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jetshare_core::repository::JetShareOfferRepository;
use jetshare_core::{JetShareOfferRecord, NewJetShareOffer, OfferStatus};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresJetShareOfferRepository {
    pub pool: PgPool,
}

impl PostgresJetShareOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: Uuid,
    user_id: String,
    jet_id: String,
    origin: String,
    destination: String,
    departure_time: DateTime<Utc>,
    total_seats: i32,
    available_seats: i32,
    total_flight_cost: i64,
    requested_share_amount: i64,
    split_configuration: Option<serde_json::Value>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<OfferRow> for JetShareOfferRecord {
    type Error = jetshare_core::CoreError;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            jet_id: row.jet_id,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            total_seats: row.total_seats,
            available_seats: row.available_seats,
            total_flight_cost: row.total_flight_cost,
            requested_share_amount: row.requested_share_amount,
            split_configuration: row.split_configuration.unwrap_or(serde_json::Value::Null),
            status: row.status.parse::<OfferStatus>()?,
            created_at: row.created_at,
        })
    }
}

const SELECT_OFFER: &str = r#"
    SELECT id, user_id, jet_id, origin, destination, departure_time, total_seats, available_seats,
           total_flight_cost, requested_share_amount, split_configuration, status, created_at
    FROM jetshare_offers
"#;

#[async_trait]
impl JetShareOfferRepository for PostgresJetShareOfferRepository {
    async fn create_offer(
        &self,
        offer: &NewJetShareOffer,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>> {
        let id = Uuid::new_v4();
        // the seat split is stored as sent
        let split = Some(offer.split_configuration.clone()).filter(|v| !v.is_null());

        sqlx::query(
            r#"
            INSERT INTO jetshare_offers (
                id, user_id, jet_id, origin, destination, departure_time, total_seats, available_seats,
                total_flight_cost, requested_share_amount, split_configuration, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(id)
        .bind(&offer.user_id)
        .bind(&offer.jet_id)
        .bind(&offer.origin)
        .bind(&offer.destination)
        .bind(offer.departure_time)
        .bind(offer.total_seats)
        .bind(offer.available_seats)
        .bind(offer.total_flight_cost)
        .bind(offer.requested_share_amount)
        .bind(split)
        .bind(OfferStatus::Open.as_str())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_offer(
        &self,
        id: Uuid,
    ) -> Result<Option<JetShareOfferRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, OfferRow>(&format!("{SELECT_OFFER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(JetShareOfferRecord::try_from).transpose()?)
    }

    async fn list_offers_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<JetShareOfferRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "{SELECT_OFFER} WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let offers = rows
            .into_iter()
            .map(JetShareOfferRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(offers)
    }
}
