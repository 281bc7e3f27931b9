use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use jetshare_core::JetShareOfferRecord;
use jetshare_offer::JetShareOfferSubmission;
use jetshare_shared::models::events::OfferSubmittedEvent;
use serde::Serialize;
use uuid::Uuid;

use crate::{error::AppError, middleware::CustomerClaims, state::AppState};

#[derive(Debug, Serialize)]
pub struct CreateOfferResponse {
    pub id: Uuid,
    pub status: String,
}

/// POST /api/jetshare/offers
/// Create a JetShare offer from a completed offer form
pub async fn create_offer(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
    Json(submission): Json<JetShareOfferSubmission>,
) -> Result<(StatusCode, Json<CreateOfferResponse>), AppError> {
    submission.validate(Utc::now()).map_err(AppError::from_form)?;

    let split_percentage = submission
        .split_configuration
        .as_ref()
        .and_then(|c| c.get("splitPercentage"))
        .and_then(|p| p.as_u64())
        .and_then(|p| u8::try_from(p).ok());

    let new_offer = submission.into_new_offer(claims.sub.clone());
    let offer_id = state.offer_repo.create_offer(&new_offer).await
        .map_err(|e| AppError::InternalServerError(format!("Failed to save offer: {}", e)))?;

    let event = OfferSubmittedEvent {
        offer_id,
        user_id: claims.sub,
        jet_id: new_offer.jet_id,
        split_percentage,
        timestamp: Utc::now().timestamp(),
    };
    tracing::info!(event = ?event, "JetShare offer created");

    Ok((
        StatusCode::CREATED,
        Json(CreateOfferResponse {
            id: offer_id,
            status: jetshare_core::OfferStatus::Open.to_string(),
        }),
    ))
}

/// GET /api/jetshare/offers/{id}
pub async fn get_offer(
    State(state): State<AppState>,
    Path(offer_id): Path<Uuid>,
) -> Result<Json<JetShareOfferRecord>, AppError> {
    let offer = state.offer_repo.get_offer(offer_id).await
        .map_err(|e| AppError::InternalServerError(format!("Failed to load offer {}: {}", offer_id, e)))?
        .ok_or_else(|| AppError::NotFoundError(format!("Offer {} not found", offer_id)))?;

    Ok(Json(offer))
}

/// GET /api/jetshare/offers
/// Offers created by the caller, newest first
pub async fn list_my_offers(
    State(state): State<AppState>,
    Extension(claims): Extension<CustomerClaims>,
) -> Result<Json<Vec<JetShareOfferRecord>>, AppError> {
    let offers = state.offer_repo.list_offers_for_user(&claims.sub).await
        .map_err(|e| AppError::InternalServerError(format!("Failed to list offers: {}", e)))?;

    Ok(Json(offers))
}
