pub mod offer;
pub mod repository;

pub use offer::{JetShareOfferRecord, NewJetShareOffer, OfferStatus};
pub use repository::{JetRepository, JetShareOfferRepository, LayoutFetchError, LayoutSource};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
