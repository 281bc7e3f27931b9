use uuid::Uuid;

/// An aircraft was picked in the offer form's aircraft section
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JetSelectedEvent {
    pub jet_id: String,
    pub model: Option<String>,
    pub total_seats: u32,
    pub selected_at: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OfferSubmittedEvent {
    pub offer_id: Uuid,
    pub user_id: String,
    pub jet_id: String,
    pub split_percentage: Option<u8>,
    pub timestamp: i64,
}
