use thiserror::Error;

/// Why a listing folder was left out of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no description.txt")]
    MissingDescription,
    #[error("empty description")]
    EmptyDescription,
    #[error("no images")]
    NoImages,
    #[error("unreadable record: {0}")]
    Unreadable(String),
}

/// A single image download that did not succeed
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
