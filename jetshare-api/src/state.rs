use std::sync::Arc;
use jetshare_core::{JetRepository, JetShareOfferRepository, LayoutSource};
use jetshare_seatmap::SeatLayout;
use jetshare_store::app_config::{RateLimitConfig, SeatMapConfig};
use jetshare_store::RedisClient;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub jet_repo: Arc<dyn JetRepository>,
    pub offer_repo: Arc<dyn JetShareOfferRepository>,
    /// Layout cache and rate limiting; both are skipped when absent
    pub redis: Option<Arc<RedisClient>>,
    /// Consulted for jets the local database does not know
    pub upstream_layouts: Option<Arc<dyn LayoutSource>>,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub seat_map: SeatMapConfig,
    pub layout_cache_seconds: u64,
}

impl AppState {
    /// Layout used for previews when the jet's own layout is unknown
    pub fn fallback_layout(&self) -> SeatLayout {
        SeatLayout::new(
            self.seat_map.default_rows,
            self.seat_map.default_seats_per_row,
            jetshare_seatmap::LayoutType::Standard,
        )
        .unwrap_or_else(|_| SeatLayout::default_fallback())
    }
}
