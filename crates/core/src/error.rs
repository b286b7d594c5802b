#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required structural element was missing from a request.
    ///
    /// Detected before any persistence call; never changes state.
    #[error("Malformed request: {0}")]
    MalformedRequest(&'static str),

    /// Any fault surfaced by the persistence layer.
    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}
