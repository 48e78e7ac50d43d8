//! Mapping of service errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ordo_core::{FieldErrors, OrdoError};
use serde_json::json;

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 with a field-indexed body.
    #[error("invalid request: {0}")]
    Validation(FieldErrors),
    #[error("not found")]
    NotFound,
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Not found." })),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "A server error occurred." })),
                )
                    .into_response()
            }
        }
    }
}

impl From<OrdoError> for ApiError {
    fn from(err: OrdoError) -> Self {
        if let Some(errors) = err.field_errors() {
            return ApiError::Validation(errors);
        }
        match err {
            OrdoError::NotFound { .. } => ApiError::NotFound,
            OrdoError::InvalidInput(message) => ApiError::Validation(FieldErrors::non_field(message)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn date_range_error_is_a_400_on_date_fin() {
        let err = ApiError::from(OrdoError::InvalidDateRange {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        });
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(
            body["date_fin"][0],
            "La date de fin doit être supérieure ou égale à la date de début."
        );
    }

    #[tokio::test]
    async fn not_found_has_detail_body() {
        let response = ApiError::from(OrdoError::NotFound {
            entity: "prescription",
            id: 9999,
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "Not found.");
    }

    #[tokio::test]
    async fn store_failure_hides_details() {
        let response = ApiError::from(OrdoError::LockPoisoned).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body.to_string().contains("poisoned"));
    }
}
