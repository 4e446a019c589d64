use std::time::Duration;

/// Vendor page listing every product with downloadable audio files.
pub const DEFAULT_CATALOG_URL: &str =
    "https://service.ravensburger.de/tiptoi%C2%AE/tiptoi%C2%AE_Audiodateien";

/// Transport settings shared by every fetch and download.
///
/// Built once at startup and handed to [`crate::GmeClient::new`]; nothing in
/// this crate touches process-wide HTTP state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub catalog_url: String,
    /// The vendor site rejects unknown clients, so we present as curl.
    pub user_agent: String,
    /// The vendor's certificate chain does not validate on every platform.
    pub accept_invalid_certs: bool,
    /// Timeout for page fetches. Downloads are only bounded by `connect_timeout`.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Substring an href must contain to count as an audio file.
    pub audio_marker: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: "curl".to_string(),
            accept_invalid_certs: true,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            audio_marker: ".gme".to_string(),
        }
    }
}
