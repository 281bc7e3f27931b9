use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JetShare offer lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    Open,
    Accepted,
    Completed,
    Cancelled,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Open => "OPEN",
            OfferStatus::Accepted => "ACCEPTED",
            OfferStatus::Completed => "COMPLETED",
            OfferStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OfferStatus {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(OfferStatus::Open),
            "ACCEPTED" => Ok(OfferStatus::Accepted),
            "COMPLETED" => Ok(OfferStatus::Completed),
            "CANCELLED" => Ok(OfferStatus::Cancelled),
            other => Err(crate::CoreError::ValidationError(format!("unknown offer status {other}"))),
        }
    }
}

/// Offer row as handed to storage.
///
/// `split_configuration` is opaque: storage keeps whatever JSON it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJetShareOffer {
    pub user_id: String,
    pub jet_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub total_seats: i32,
    pub available_seats: i32,
    pub total_flight_cost: i64,
    pub requested_share_amount: i64,
    pub split_configuration: serde_json::Value,
}

/// Stored JetShare offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JetShareOfferRecord {
    pub id: Uuid,
    pub user_id: String,
    pub jet_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub total_seats: i32,
    pub available_seats: i32,
    pub total_flight_cost: i64,
    pub requested_share_amount: i64,
    pub split_configuration: serde_json::Value,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

impl JetShareOfferRecord {
    pub fn from_new(id: Uuid, offer: NewJetShareOffer, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: offer.user_id,
            jet_id: offer.jet_id,
            origin: offer.origin,
            destination: offer.destination,
            departure_time: offer.departure_time,
            total_seats: offer.total_seats,
            available_seats: offer.available_seats,
            total_flight_cost: offer.total_flight_cost,
            requested_share_amount: offer.requested_share_amount,
            split_configuration: offer.split_configuration,
            status: OfferStatus::Open,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [OfferStatus::Open, OfferStatus::Accepted, OfferStatus::Completed, OfferStatus::Cancelled] {
            assert_eq!(status.to_string().parse::<OfferStatus>().unwrap(), status);
        }
        assert!("PENDING".parse::<OfferStatus>().is_err());
    }
}
