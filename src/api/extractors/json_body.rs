/*
 * Responsibility
 * - axum::Json と同じ使い方で body を受け、失敗時は AppError ({message}) に変換する
 * - axum 既定の rejection (text/plain, 422) をクライアントに出さない
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "request body rejected");
                Err(classify(&rejection))
            }
        }
    }
}

fn classify(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) => {
            AppError::bad_request("invalid body: missing or mistyped fields")
        }
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request("invalid body: malformed JSON"),
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("expected `Content-Type: application/json`")
        }
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
        _ => AppError::bad_request("invalid body"),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        email: String,
    }

    fn json(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let err = JsonBody::<Probe>::from_request(json(r#"{"name":"x"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn broken_json_is_bad_request() {
        let err = JsonBody::<Probe>::from_request(json(r#"{"email":"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid body: malformed JSON");
    }

    #[tokio::test]
    async fn wrong_content_type_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"email":"a@x.com"}"#))
            .unwrap();
        let err = JsonBody::<Probe>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let JsonBody(probe) = JsonBody::<Probe>::from_request(json(r#"{"email":"a@x.com"}"#), &())
            .await
            .unwrap();
        assert_eq!(probe.email, "a@x.com");
    }
}
