//! Catalog error taxonomy shared by storage, services and delivery.

use libris_http::ApiError;
use thiserror::Error;

/// Every failure the catalog can report.
///
/// Layers return these unchanged; only the HTTP boundary converts them, and
/// it collapses all kinds into `400 Bad Request` with the `Display` text as
/// the body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("missing id")]
    MissingId,

    /// Identifier is zero or negative.
    #[error("invalid id")]
    InvalidId,

    /// Identifier string is not an integer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required author field is empty.
    #[error("missing fields")]
    MissingFields,

    #[error("missing book fields")]
    MissingBookFields,

    #[error("missing author fields")]
    MissingAuthorFields,

    #[error("invalid publication")]
    InvalidPublication,

    #[error("invalid publishedDate")]
    InvalidPublishedDate,

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Constraint violation or connection failure, carrying the backend's
    /// own message.
    #[error("{message}")]
    Storage { message: String },
}

impl CatalogError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingId => "missing_id",
            Self::InvalidId => "invalid_id",
            Self::InvalidInput(_) => "invalid_input",
            Self::MissingFields => "missing_fields",
            Self::MissingBookFields => "missing_book_fields",
            Self::MissingAuthorFields => "missing_author_fields",
            Self::InvalidPublication => "invalid_publication",
            Self::InvalidPublishedDate => "invalid_published_date",
            Self::NotFound { .. } => "not_found",
            Self::Storage { .. } => "storage_error",
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Surface the server's own text, e.g. "Duplicate entry '1' for key 'Author.PRIMARY'".
            sqlx::Error::Database(db_err) => Self::storage(db_err.message()),
            _ => Self::storage(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::bad_request(err.kind(), err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
