//! Request extractors that fail with [`AppError`] bodies

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use http::StatusCode;
use serde::de::DeserializeOwned;
use shared::AppError;

use super::validation::Validate;

/// JSON body that is decoded and then validated.
///
/// Undecodable bodies and missing fields become `ValidationFailed`
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Map axum's JSON rejection onto the shared error codes
pub fn json_rejection(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::new(shared::ErrorCode::PayloadTooLarge);
    }
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected request with `Content-Type: application/json`")
        }
        other => AppError::validation(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::ErrorCode;
    use shared::models::ContactCreate;

    fn request(content_type: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(http::header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let req = request(
            "application/json",
            r#"{"name":"Ana","email":"ana@x.com","message":"Hello"}"#,
        );
        let ValidatedJson(contact) = ValidatedJson::<ContactCreate>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(contact.name, "Ana");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let req = request("application/json", r#"{"name":"Ana","email":"ana@x.com"}"#);
        let err = ValidatedJson::<ContactCreate>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("message"));
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_validation_error() {
        let req = request("text/plain", "hello");
        let err = ValidatedJson::<ContactCreate>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_semantic_rules_run_after_decoding() {
        let req = request(
            "application/json",
            r#"{"name":"Ana","email":"not-an-email","message":"Hello"}"#,
        );
        let err = ValidatedJson::<ContactCreate>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
