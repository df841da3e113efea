//! Error types

/// Errors raised while setting a table up.
///
/// Column and configuration problems are rejected once, at construction,
/// instead of surfacing as ambiguous sorting later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The column list is empty.
    #[error("a table needs at least one column")]
    NoColumns,

    /// Two columns read the same row field.
    #[error("duplicate accessor key: {key}")]
    DuplicateAccessor { key: String },

    /// A column's sort key is already used by another column.
    #[error("sort key {sort_key:?} of column {column:?} collides with column {other:?}")]
    SortKeyCollision {
        /// The colliding sort key.
        sort_key: String,
        /// Accessor key of the column declaring the sort key.
        column: String,
        /// Accessor key of the column it collides with.
        other: String,
    },

    /// The default page size is zero.
    #[error("default page size must be greater than zero")]
    ZeroPageSize,

    /// The page size selector has nothing to offer.
    #[error("page size options must not be empty")]
    NoPageSizeOptions,

    /// The page size selector offers a zero page size.
    #[error("page size options must be greater than zero")]
    ZeroPageSizeOption,
}

/// Errors a data source reports for one fetch.
///
/// The orchestrator catches all of them at its boundary: they are logged and
/// the table falls back to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The transport failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The source declined the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Any other source-specific failure.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl FetchError {
    /// Creates a new HTTP status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
