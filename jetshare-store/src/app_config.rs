use jetshare_shared::Masked;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub layout_service: LayoutServiceConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub seat_map: SeatMapConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Masked<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_layout_cache_seconds")]
    pub layout_cache_seconds: u64,
}

fn default_layout_cache_seconds() -> u64 { 300 }

/// Upstream service consulted for jets missing from the local database
#[derive(Debug, Deserialize, Clone)]
pub struct LayoutServiceConfig {
    pub base_url: Option<String>,
    #[serde(default = "default_layout_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_layout_timeout_ms() -> u64 { 3000 }

impl Default for LayoutServiceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_layout_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: Masked<String>,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    pub requests_per_window: i64,
    pub window_seconds: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 100,
            window_seconds: 60,
        }
    }
}

/// Configurator defaults handed to clients
#[derive(Debug, Deserialize, Clone)]
pub struct SeatMapConfig {
    pub seat_size_px: f64,
    pub change_debounce_ms: u64,
    pub default_rows: u32,
    pub default_seats_per_row: u32,
}

impl Default for SeatMapConfig {
    fn default() -> Self {
        Self {
            seat_size_px: 40.0,
            change_debounce_ms: 100,
            default_rows: 6,
            default_seats_per_row: 4,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. JETSHARE__SERVER__PORT=9000
            .add_source(config::Environment::with_prefix("JETSHARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
