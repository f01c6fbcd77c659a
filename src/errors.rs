use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Required input missing or unreadable; never reaches the network.
    BadRequest(String),
    /// The remote call succeeded but carried no usable record.
    NotFound(String),
    /// Token acquisition or a remote API call failed.
    ExternalApiError(String),
    /// Local failure unrelated to the remote side.
    InternalError(String),
    /// Error with the operation's public failure message attached.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Message shown to the caller when the source is a server-side failure.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status the error maps to once it reaches the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExternalApiError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::WithContext { source, .. } => source.status(),
        }
    }

    /// Message returned to the caller. Upstream and internal detail is never exposed.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::ExternalApiError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            AppError::WithContext { source, context } => match source.as_ref() {
                AppError::ExternalApiError(_) | AppError::InternalError(_) => context.clone(),
                inner => inner.public_message(),
            },
        }
    }
}

impl IntoResponse for AppError {
    /// Maps the error to one of the three caller-facing shapes (400, 404, 500)
    /// with a `{"error": ...}` body. Server-side failures are logged in full.
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!("{}", self),
            StatusCode::NOT_FOUND => tracing::info!("{}", self),
            _ => tracing::warn!("{}", self),
        }

        let body = Json(json!({
            "error": self.public_message(),
        }));

        (status, body).into_response()
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_and_not_found_pass_message_through() {
        let (status, body) = body_json(AppError::BadRequest("Missing fields".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing fields");

        let (status, body) = body_json(AppError::NotFound("No contact data found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No contact data found");
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_leaked() {
        let err: Result<(), AppError> =
            Err(AppError::ExternalApiError("ZoomInfo returned 401: bad key".into()));
        let err = err.context("Failed to enrich contact").unwrap_err();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to enrich contact"}));
    }

    #[tokio::test]
    async fn test_context_keeps_client_errors_intact() {
        let err: Result<(), AppError> = Err(AppError::NotFound("No candidates found".into()));
        let err = err
            .context("Failed to search for candidates")
            .unwrap_err();

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No candidates found");
    }

    #[test]
    fn test_display_includes_chain() {
        let err = AppError::WithContext {
            source: Box::new(AppError::ExternalApiError("timeout".into())),
            context: "Failed to generate access token".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to generate access token: External API error: timeout"
        );
    }
}
