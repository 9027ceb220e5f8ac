/*
 * Responsibility
 * - axum::extract::{Path, Query} と同じ使い方で受け、失敗時は AppError ({message}) に変換する
 * - 公開 ID の復号はしない (gate 付き route は owner-match の後で handler が復号する)
 */
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

#[derive(Debug)]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "path rejected");
                Err(AppError::bad_request("invalid path parameter"))
            }
        }
    }
}

#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "query string rejected");
                Err(AppError::bad_request("invalid query string"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Owner {
        email: String,
    }

    fn parts(uri: &str) -> Parts {
        let (parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn query_is_deserialized() {
        let QueryParams(owner) =
            QueryParams::<Owner>::from_request_parts(&mut parts("/x?email=a@x.com"), &())
                .await
                .unwrap();
        assert_eq!(owner.email, "a@x.com");
    }

    #[tokio::test]
    async fn duplicated_query_field_is_bad_request() {
        let err = QueryParams::<Owner>::from_request_parts(
            &mut parts("/x?email=a@x.com&email=b@x.com"),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid query string");
    }

    #[tokio::test]
    async fn path_outside_a_router_is_bad_request() {
        let err = PathParam::<String>::from_request_parts(&mut parts("/x"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
