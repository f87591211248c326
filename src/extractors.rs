use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::response::AppError;

/// `axum::Json<T>` whose rejection is an [`AppError`] in the usual JSON
/// envelope rather than axum's plain-text body.
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_to_app_error(rejection)),
        }
    }
}

/// Like [`JsonBody`], but a missing or blank body yields `T::default()`.
/// A non-empty body is parsed as JSON whatever its content type.
pub struct OptionalJsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for OptionalJsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!(kind = "bytes", error = %rejection, "Rejected JSON request body");
            invalid_body()
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(OptionalJsonBody(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(OptionalJsonBody)
            .map_err(|e| {
                let kind = if e.is_data() { "data" } else { "syntax" };
                tracing::warn!(kind, error = %e, "Rejected JSON request body");
                invalid_body()
            })
    }
}

fn rejection_to_app_error(rejection: JsonRejection) -> AppError {
    let kind = match &rejection {
        JsonRejection::JsonDataError(_) => "data",
        JsonRejection::JsonSyntaxError(_) => "syntax",
        JsonRejection::MissingJsonContentType(_) => "content-type",
        JsonRejection::BytesRejection(_) => "bytes",
        _ => "other",
    };
    tracing::warn!(kind, error = %rejection, "Rejected JSON request body");
    invalid_body()
}

fn invalid_body() -> AppError {
    AppError::bad_request("INVALID_REQUEST_BODY", "Invalid request body")
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Payload {
        #[serde(default)]
        limit: Option<u32>,
    }

    async fn extract(body: &'static str) -> Result<Payload, AppError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap();
        OptionalJsonBody::<Payload>::from_request(req, &())
            .await
            .map(|OptionalJsonBody(p)| p)
    }

    #[tokio::test]
    async fn empty_or_blank_body_is_default() {
        assert_eq!(extract("").await.unwrap(), Payload::default());
        assert_eq!(extract(" \n").await.unwrap(), Payload::default());
    }

    #[tokio::test]
    async fn body_without_content_type_is_parsed() {
        assert_eq!(extract(r#"{"limit":4}"#).await.unwrap(), Payload { limit: Some(4) });
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_request_body() {
        for body in ["{", r#"{"limit":"four"}"#] {
            let err = extract(body).await.unwrap_err();
            assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
            assert_eq!(err.code, "INVALID_REQUEST_BODY");
        }
    }
}
