use thiserror::Error;

/// Failures surfaced to callers of the search and analysis operations.
///
/// `InvalidQuery`, `InvalidInput` and `EmptyComment` are caller mistakes;
/// `SearchUnavailable` means the store failed or timed out. The analysis
/// components themselves never fail on present-but-degenerate text.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid query: search text must not be empty")]
    InvalidQuery,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("comment text must not be empty")]
    EmptyComment,
}

impl Error {
    /// Machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidQuery => "invalid_query",
            Error::InvalidInput(_) => "invalid_input",
            Error::SearchUnavailable(_) => "search_unavailable",
            Error::EmptyComment => "empty_comment",
        }
    }

    /// True for errors caused by the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Error::SearchUnavailable(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
