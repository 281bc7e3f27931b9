use axum::{extract::State, routing::post, Json, Router};
use jetshare_offer::{SeatSelectionConfiguration, SplitConfiguration};
use jetshare_seatmap::{DividerGeometry, SeatLayout, SplitOrientation, SplitPercentage};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, jets::resolve_layout, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPreviewRequest {
    pub jet_id: String,
    /// When absent the jet's stored layout is used
    pub seat_layout: Option<SeatLayout>,
    #[serde(default)]
    pub split_orientation: SplitOrientation,
    pub split_percentage: SplitPercentage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPreviewResponse {
    pub configuration: SplitConfiguration,
    pub selection: SeatSelectionConfiguration,
    pub divider_offset_px: f64,
    pub used_fallback_layout: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/seat-split/preview", post(preview_split))
}

/// POST /api/seat-split/preview
/// Compute the seat split a configurator would produce
pub async fn preview_split(
    State(state): State<AppState>,
    Json(req): Json<SplitPreviewRequest>,
) -> Result<Json<SplitPreviewResponse>, AppError> {
    let (layout, used_fallback_layout) = match req.seat_layout {
        Some(layout) => (layout, false),
        None => match resolve_layout(&state, &req.jet_id).await? {
            Some(layout) => (layout, false),
            None => (state.fallback_layout(), true),
        },
    };

    let configuration = SplitConfiguration::compute(
        req.jet_id,
        &layout,
        req.split_orientation,
        req.split_percentage,
    );
    let divider_offset_px = DividerGeometry::new(state.seat_map.seat_size_px)
        .offset_for(&layout, req.split_orientation, req.split_percentage);

    Ok(Json(SplitPreviewResponse {
        selection: configuration.to_selection(),
        configuration,
        divider_offset_px,
        used_fallback_layout,
    }))
}
