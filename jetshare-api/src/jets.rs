use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use jetshare_core::LayoutFetchError;
use jetshare_seatmap::{SeatLayout, SeatLayoutSpec};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JetLayoutResponse {
    pub jet_id: String,
    pub seat_layout: SeatLayout,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapSettingsResponse {
    pub seat_size_px: f64,
    pub change_debounce_ms: u64,
    pub default_layout: SeatLayoutSpec,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/jets/{jet_id}", get(get_jet_layout))
        .route("/api/seat-map/settings", get(seat_map_settings))
}

/// Find a jet's layout: cache, then database, then the upstream service.
///
/// `Ok(None)` means nobody knows the jet.
pub async fn resolve_layout(state: &AppState, jet_id: &str) -> Result<Option<SeatLayout>, AppError> {
    if let Some(redis) = &state.redis {
        match redis.get_cached_layout(jet_id).await {
            Ok(Some(layout)) => {
                debug!("Layout cache hit for jet {}", jet_id);
                return Ok(Some(layout));
            }
            Ok(None) => {}
            Err(e) => warn!("Layout cache unavailable: {}", e),
        }
    }

    let mut layout = state.jet_repo.get_seat_layout(jet_id).await
        .map_err(|e| AppError::InternalServerError(format!("Failed to load layout for jet {}: {}", jet_id, e)))?;

    if layout.is_none() {
        if let Some(upstream) = &state.upstream_layouts {
            layout = match upstream.fetch_layout(jet_id).await {
                Ok(found) => Some(found),
                Err(LayoutFetchError::Status(404)) => None,
                Err(e) => return Err(AppError::UpstreamError(format!("jet {}: {}", jet_id, e))),
            };
        }
    }

    if let (Some(redis), Some(found)) = (&state.redis, &layout) {
        if let Err(e) = redis.cache_layout(jet_id, found, state.layout_cache_seconds).await {
            warn!("Failed to cache layout for jet {}: {}", jet_id, e);
        }
    }

    Ok(layout)
}

/// GET /api/jets/{jet_id}
pub async fn get_jet_layout(
    State(state): State<AppState>,
    Path(jet_id): Path<String>,
) -> Result<Json<JetLayoutResponse>, AppError> {
    let seat_layout = resolve_layout(&state, &jet_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Jet {} not found", jet_id)))?;

    Ok(Json(JetLayoutResponse { jet_id, seat_layout }))
}

/// GET /api/seat-map/settings
/// Defaults a configurator should start from
pub async fn seat_map_settings(State(state): State<AppState>) -> Json<SeatMapSettingsResponse> {
    Json(SeatMapSettingsResponse {
        seat_size_px: state.seat_map.seat_size_px,
        change_debounce_ms: state.seat_map.change_debounce_ms,
        default_layout: state.fallback_layout().to_spec(),
    })
}
