use thiserror::Error;

/// Ways the calendar fetch can fail. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body arrived but is not a JSON array of calendar events.
    #[error("response body is not a valid calendar: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}
