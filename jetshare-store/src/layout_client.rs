use async_trait::async_trait;
use jetshare_core::{LayoutFetchError, LayoutSource};
use jetshare_seatmap::SeatLayout;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JetLayoutBody {
    seat_layout: SeatLayout,
}

/// Fetches seat layouts from `GET {base_url}/api/jets/{jet_id}`
#[derive(Clone)]
pub struct HttpLayoutSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLayoutSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn layout_url(&self, jet_id: &str) -> String {
        format!("{}/api/jets/{}", self.base_url, jet_id)
    }
}

/// Turn a layout response into a layout, or the reason it is unusable
pub fn parse_layout_response(status: u16, body: &str) -> Result<SeatLayout, LayoutFetchError> {
    if !(200..300).contains(&status) {
        return Err(LayoutFetchError::Status(status));
    }

    serde_json::from_str::<JetLayoutBody>(body)
        .map(|b| b.seat_layout)
        .map_err(|e| LayoutFetchError::Malformed(e.to_string()))
}

#[async_trait]
impl LayoutSource for HttpLayoutSource {
    async fn fetch_layout(&self, jet_id: &str) -> Result<SeatLayout, LayoutFetchError> {
        let url = self.layout_url(jet_id);
        debug!("Fetching seat layout from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LayoutFetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LayoutFetchError::Transport(e.to_string()))?;

        parse_layout_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        let body = r#"{ "jetId": "N1", "seatLayout": { "rows": 4, "seatsPerRow": 3, "layoutType": "luxury" } }"#;
        let layout = parse_layout_response(200, body).unwrap();
        assert_eq!(layout.total_seats(), 12);
    }

    #[test]
    fn test_parse_server_error() {
        assert_eq!(parse_layout_response(500, "oops"), Err(LayoutFetchError::Status(500)));
        assert_eq!(parse_layout_response(404, "{}"), Err(LayoutFetchError::Status(404)));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_layout_response(200, "{}"), Err(LayoutFetchError::Malformed(_))));

        let zero_rows = r#"{ "seatLayout": { "rows": 0, "seatsPerRow": 3 } }"#;
        assert!(matches!(parse_layout_response(200, zero_rows), Err(LayoutFetchError::Malformed(_))));
    }

    #[test]
    fn test_layout_url_trims_slash() {
        let source = HttpLayoutSource::new("http://jets.local/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.layout_url("N1"), "http://jets.local/api/jets/N1");
    }
}
