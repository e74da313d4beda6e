#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decompress body from {url}: {reason}")]
    Decompress { url: String, reason: String },

    #[error(transparent)]
    Config(#[from] discovery_core::ConfigError),
}
