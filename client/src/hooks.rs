//! Caller-supplied hooks that interpose on the resolution pipeline.
//!
//! Each hook is a trait so it can be implemented by a stateful type, and each
//! has a blanket impl for async closures taking the hook input by value.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, Request, StatusCode, Url};
use std::future::Future;

use crate::response::Errors;

/// Produces a fresh copy of the base request on every call to [`create`](Self::create).
#[derive(Clone, Debug)]
pub struct RequestFactory {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestFactory {
    pub(crate) fn new(url: Url, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method: Method::POST,
            url,
            headers,
            body,
        }
    }

    pub fn create(&self) -> Request {
        let mut request = Request::new(self.method.clone(), self.url.clone());
        *request.headers_mut() = self.headers.clone();
        *request.body_mut() = Some(self.body.clone().into());
        request
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// A completed exchange whose body is not a usable GraphQL envelope.
#[derive(Clone, Debug)]
pub struct HttpFailure {
    pub method: Method,
    pub url: Url,
    pub request_headers: HeaderMap,
    /// Body of the sent request, when it was buffered.
    pub request_body: Option<Bytes>,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpFailure {
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    pub fn request_body_text(&self) -> Option<String> {
        self.request_body
            .as_ref()
            .map(|body| String::from_utf8_lossy(body).to_string())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Replaces the request that is sent. The factory yields the request the
/// pipeline would have sent without the hook.
#[async_trait]
pub trait PreRequest: Send + Sync {
    async fn pre_request(&self, factory: RequestFactory) -> Request;
}

#[async_trait]
impl<F, Fut> PreRequest for F
where
    F: Fn(RequestFactory) -> Fut + Send + Sync,
    Fut: Future<Output = Request> + Send + 'static,
{
    async fn pre_request(&self, factory: RequestFactory) -> Request {
        (self)(factory).await
    }
}

/// Turns an unusable exchange into errors of the client's error type.
#[async_trait]
pub trait OnHttpError<E>: Send + Sync {
    async fn on_http_error(&self, failure: HttpFailure) -> Errors<E>;
}

#[async_trait]
impl<E, F, Fut> OnHttpError<E> for F
where
    E: Send + 'static,
    F: Fn(HttpFailure) -> Fut + Send + Sync,
    Fut: Future<Output = Errors<E>> + Send + 'static,
{
    async fn on_http_error(&self, failure: HttpFailure) -> Errors<E> {
        (self)(failure).await
    }
}

/// Remaps every error sequence before it is delivered. Returning an empty
/// vec keeps the sequence the hook was given.
#[async_trait]
pub trait OnError<E>: Send + Sync {
    async fn on_error(&self, errors: Errors<E>) -> Vec<E>;
}

#[async_trait]
impl<E, F, Fut> OnError<E> for F
where
    E: Send + 'static,
    F: Fn(Errors<E>) -> Fut + Send + Sync,
    Fut: Future<Output = Vec<E>> + Send + 'static,
{
    async fn on_error(&self, errors: Errors<E>) -> Vec<E> {
        (self)(errors).await
    }
}
