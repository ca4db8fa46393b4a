//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Store failures are logged with full detail but only a
//! generic message is returned to the caller, so SQL and file paths never
//! leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// All errors that can occur in the dish-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller referenced a record that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request or the resulting update was rejected as malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store could not be reached (pool exhausted, I/O, shut down).
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Any other error propagated from the store.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for ServerError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ServerError::NotFound("record not found".into()),
            sqlx::Error::Database(ref db)
                if db.is_unique_violation() || db.is_check_violation() =>
            {
                ServerError::Validation(db.message().to_owned())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                ServerError::Unavailable(e)
            }
            other => ServerError::Database(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),

            ServerError::Unavailable(e) => {
                warn!(error = %e, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store temporarily unavailable".to_owned(),
                )
            }
            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let resp = ServerError::NotFound("dish not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let resp = ServerError::Validation("bad id".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn pool_timeout_is_transient() {
        let err = ServerError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, ServerError::Unavailable(_)));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn other_store_errors_are_internal() {
        let err = ServerError::from(sqlx::Error::Protocol("garbled at /var/lib/dishes.db".into()));
        assert!(matches!(err, ServerError::Database(_)));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
