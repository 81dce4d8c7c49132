//! One request/response exchange, classified into a [`GraphQLResponse`].
//!
//! The body is always parsed, whatever the HTTP status. A `data` value wins
//! over any `errors` next to it; the errors are only decoded when `data` is
//! absent. Any body that yields neither typed data nor at least one typed
//! error is an unusable envelope and goes to the `OnHttpError` hook. Without
//! that hook the call fails with [`ClientError::Http`].

use bytes::Bytes;
use gqlr_types::{Envelope, Query};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::hooks::{HttpFailure, OnError, RequestFactory};
use crate::response::{Errors, GraphQLResponse};

pub const REQUEST_MARKER_HEADER: &str = "x-requested-with";
pub const REQUEST_MARKER_VALUE: &str = "gqlr";

enum Outcome<T, E> {
    Data(T),
    Errors(Errors<E>),
    Unusable,
}

pub(crate) async fn resolve<T, V, E>(
    http: &reqwest::Client,
    config: &ClientConfig<E>,
    query: &Query<V>,
) -> Result<GraphQLResponse<T, E>>
where
    T: DeserializeOwned,
    V: Serialize,
    E: DeserializeOwned + Clone + Send + 'static,
{
    let body = Bytes::from(serde_json::to_vec(query)?);
    let factory = RequestFactory::new(
        config.url.clone(),
        build_headers(&config.headers),
        body,
    );

    let request = match &config.pre_request {
        Some(hook) => hook.pre_request(factory).await,
        None => factory.create(),
    };

    let method = request.method().clone();
    let url = request.url().clone();
    let request_headers = request.headers().clone();
    let request_body = request
        .body()
        .and_then(|body| body.as_bytes())
        .map(Bytes::copy_from_slice);

    debug!(%url, "send graphql request");
    let response = http.execute(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.bytes().await?;

    let errors = match classify::<T, E>(&bytes) {
        Outcome::Data(data) => {
            debug!(%url, status = status.as_u16(), "graphql data received");
            return Ok(GraphQLResponse::Ok(data));
        }
        Outcome::Errors(errors) => {
            debug!(%url, errors = errors.len(), "graphql errors received");
            errors
        }
        Outcome::Unusable => {
            let Some(hook) = &config.on_http_error else {
                warn!(%url, status = status.as_u16(), "unusable graphql response");
                return Err(ClientError::Http {
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or_default().to_string(),
                });
            };
            debug!(
                %url,
                status = status.as_u16(),
                "unusable graphql response, calling http error hook"
            );
            hook.on_http_error(HttpFailure {
                method,
                url,
                request_headers,
                request_body,
                status,
                headers,
                body: bytes,
            })
            .await
        }
    };

    let errors = remap(errors, config.on_error.as_deref()).await;
    Ok(GraphQLResponse::Err(errors))
}

/// Fixed headers first, then every configured header appended.
fn build_headers(extra: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(REQUEST_MARKER_HEADER),
        HeaderValue::from_static(REQUEST_MARKER_VALUE),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    for (name, value) in extra {
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// `data` is decoded first with the errors left unread, so a body carrying
/// data resolves to it even when its errors do not fit `E`.
fn classify<T, E>(body: &[u8]) -> Outcome<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    match serde_json::from_slice::<Envelope<T, IgnoredAny>>(body) {
        Ok(Envelope {
            data: Some(data), ..
        }) => return Outcome::Data(data),
        Ok(_) => {}
        Err(err) => {
            debug!(error = %err, "response body is not a graphql envelope");
            return Outcome::Unusable;
        }
    }

    match serde_json::from_slice::<Envelope<IgnoredAny, E>>(body) {
        Ok(Envelope {
            errors: Some(errors),
            ..
        }) => Errors::new(errors).map_or(Outcome::Unusable, Outcome::Errors),
        Ok(_) => Outcome::Unusable,
        Err(err) => {
            debug!(error = %err, "graphql errors do not match the error type");
            Outcome::Unusable
        }
    }
}

/// Applies the remapping hook; an empty result keeps the incoming errors.
async fn remap<E>(errors: Errors<E>, hook: Option<&dyn OnError<E>>) -> Errors<E>
where
    E: Clone + Send + 'static,
{
    let Some(hook) = hook else {
        return errors;
    };
    match Errors::new(hook.on_error(errors.clone()).await) {
        Some(remapped) => remapped,
        None => {
            debug!("error hook returned nothing, keeping original errors");
            errors
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlr_types::GraphQLError;
    use serde_json::Value;

    #[test]
    fn test_build_headers_appends_configured() {
        let mut extra = HeaderMap::new();
        extra.append("authorization", HeaderValue::from_static("bearer abcd"));
        extra.append(ACCEPT, HeaderValue::from_static("application/graphql-response+json"));

        let headers = build_headers(&extra);

        assert_eq!(headers[REQUEST_MARKER_HEADER], REQUEST_MARKER_VALUE);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers["authorization"], "bearer abcd");
        let accepts: Vec<_> = headers.get_all(ACCEPT).iter().collect();
        assert_eq!(
            accepts,
            vec!["application/json", "application/graphql-response+json"]
        );
    }

    #[test]
    fn test_classify_data_wins_over_errors() {
        let body = br#"{"data":{"a":1},"errors":[{"message":"m"}]}"#;
        match classify::<Value, GraphQLError>(body) {
            Outcome::Data(data) => assert_eq!(data, serde_json::json!({"a": 1})),
            _ => panic!("expected data"),
        }
    }

    #[test]
    fn test_classify_data_wins_over_malformed_errors() {
        let body = br#"{"data":{"a":1},"errors":[{"msg":"x"}]}"#;
        match classify::<Value, GraphQLError>(body) {
            Outcome::Data(data) => assert_eq!(data, serde_json::json!({"a": 1})),
            _ => panic!("expected data"),
        }
    }

    #[test]
    fn test_classify_errors_only() {
        let body = br#"{"data":null,"errors":[{"message":"m"}]}"#;
        match classify::<Value, GraphQLError>(body) {
            Outcome::Errors(errors) => assert_eq!(errors.first().message, "m"),
            _ => panic!("expected errors"),
        }
    }

    #[test]
    fn test_classify_unusable() {
        let bodies: [&[u8]; 5] = [
            b"",
            b"not json",
            b"{}",
            br#"{"errors":[]}"#,
            br#"{"errors":[{"no_message":true}]}"#,
        ];
        for body in bodies {
            assert!(matches!(
                classify::<Value, GraphQLError>(body),
                Outcome::Unusable
            ));
        }
    }

    #[test]
    fn test_classify_typed_data_mismatch_is_unusable() {
        #[derive(serde::Deserialize)]
        #[allow(dead_code)]
        struct Login {
            id: u64,
        }

        let body = br#"{"data":{"id":"not a number"}}"#;
        assert!(matches!(
            classify::<Login, GraphQLError>(body),
            Outcome::Unusable
        ));
    }

    #[tokio::test]
    async fn test_remap_replaces_or_keeps() {
        let original = Errors::single(GraphQLError::new("original"));

        let replace =
            |_errors: Errors<GraphQLError>| async { vec![GraphQLError::new("remapped")] };
        let out = remap(original.clone(), Some(&replace)).await;
        assert_eq!(out.first().message, "remapped");

        let empty = |_errors: Errors<GraphQLError>| async { Vec::<GraphQLError>::new() };
        let out = remap(original.clone(), Some(&empty)).await;
        assert_eq!(out, original);

        let out = remap(original.clone(), None).await;
        assert_eq!(out, original);
    }
}
