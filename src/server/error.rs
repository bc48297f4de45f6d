//! Every failure a handler can produce ends up as one of two JSON envelopes:
//! `{"success": false, "error": 404, "message": "Not found"}` or the 422
//! "Unprocessable" equivalent.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    /// Bad input or a failed store call; the reason is only logged.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn unprocessable(reason: impl Into<String>) -> Self {
        Self::Unprocessable(reason.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::Unprocessable(_) => "Unprocessable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Unprocessable(reason) = &self {
            tracing::info!(%reason, "rejecting request");
        }
        let status = self.status();
        let body = json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        tracing::error!("Store error: {}", e);
        Self::Unprocessable(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Unprocessable(rejection.body_text())
    }
}

// A path segment that does not parse as the expected id never matches a
// route, so it is reported like any other unknown URL.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": 404, "message": "Not found"})
        );
    }

    #[tokio::test]
    async fn unprocessable_envelope_hides_the_reason() {
        let response = ApiError::unprocessable("column category is not an integer").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": 422, "message": "Unprocessable"})
        );
    }

    #[test]
    fn store_failures_are_unprocessable() {
        let err = ApiError::from(StoreError::Sqlx(sqlx::Error::RowNotFound));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
