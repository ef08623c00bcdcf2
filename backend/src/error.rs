use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::ValidationError;
use thiserror::Error;

use crate::store::StoreError;

/// Every failure reaches the client the same way: status 500 and no body.
/// The detail only goes to the log, including axum's own body rejections.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request body: {0}")]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::from(StoreError::InvalidId("nope".to_string())))]
    #[case(ApiError::from(ValidationError::TitleTooShort { title: "ab".to_string(), min: 3 }))]
    #[tokio::test]
    async fn every_error_is_an_empty_500(#[case] error: ApiError) {
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
