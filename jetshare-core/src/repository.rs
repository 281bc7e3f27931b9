use async_trait::async_trait;
use jetshare_seatmap::SeatLayout;
use uuid::Uuid;
use crate::offer::{JetShareOfferRecord, NewJetShareOffer};

/// Why a seat layout could not be fetched
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LayoutFetchError {
    #[error("Layout request failed: {0}")]
    Transport(String),

    #[error("Layout service responded with status {0}")]
    Status(u16),

    #[error("Malformed layout response: {0}")]
    Malformed(String),
}

/// Where a configurator gets the seat layout for an aircraft
#[async_trait]
pub trait LayoutSource: Send + Sync {
    async fn fetch_layout(&self, jet_id: &str) -> Result<SeatLayout, LayoutFetchError>;
}

/// Repository trait for jet seat layouts
#[async_trait]
pub trait JetRepository: Send + Sync {
    async fn get_seat_layout(
        &self,
        jet_id: &str,
    ) -> Result<Option<SeatLayout>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for JetShare offers
#[async_trait]
pub trait JetShareOfferRepository: Send + Sync {
    async fn create_offer(
        &self,
        offer: &NewJetShareOffer,
    ) -> Result<Uuid, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_offer(
        &self,
        id: Uuid,
    ) -> Result<Option<JetShareOfferRecord>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_offers_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<JetShareOfferRecord>, Box<dyn std::error::Error + Send + Sync>>;
}
