use gqlr_types::GraphQLError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Url;
use std::fmt;
use std::sync::Arc;

use crate::error::{ClientError, Result};
use crate::hooks::{OnError, OnHttpError, PreRequest};
use crate::Client;

/// Per-client settings, fixed once the client is built.
pub struct ClientConfig<E = GraphQLError> {
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) pre_request: Option<Arc<dyn PreRequest>>,
    pub(crate) on_http_error: Option<Arc<dyn OnHttpError<E>>>,
    pub(crate) on_error: Option<Arc<dyn OnError<E>>>,
}

impl<E> ClientConfig<E> {
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<E> fmt::Debug for ClientConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url.as_str())
            .field("headers", &self.headers.len())
            .field("pre_request", &self.pre_request.is_some())
            .field("on_http_error", &self.on_http_error.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Builder for [`Client`]. URL and headers are validated in [`build`](Self::build).
pub struct ClientBuilder<E = GraphQLError> {
    url: String,
    headers: Vec<(String, String)>,
    http: Option<reqwest::Client>,
    pre_request: Option<Arc<dyn PreRequest>>,
    on_http_error: Option<Arc<dyn OnHttpError<E>>>,
    on_error: Option<Arc<dyn OnError<E>>>,
}

impl<E: Send + 'static> ClientBuilder<E> {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            http: None,
            pre_request: None,
            on_http_error: None,
            on_error: None,
        }
    }

    /// Appends a header sent with every request. Repeated names are all kept.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header(AUTHORIZATION.as_str(), value)
    }

    /// Transport used for the exchange. Timeouts, proxies and connection
    /// pooling are configured there.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn pre_request(mut self, hook: impl PreRequest + 'static) -> Self {
        self.pre_request = Some(Arc::new(hook));
        self
    }

    pub fn on_http_error(mut self, hook: impl OnHttpError<E> + 'static) -> Self {
        self.on_http_error = Some(Arc::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl OnError<E> + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<Client<E>> {
        let url = Url::parse(&self.url).map_err(|e| ClientError::InvalidUrl {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            headers.append(header_name, header_value);
        }

        let config = ClientConfig {
            url,
            headers,
            pre_request: self.pre_request,
            on_http_error: self.on_http_error,
            on_error: self.on_error,
        };
        Ok(Client::from_parts(
            self.http.unwrap_or_default(),
            Arc::new(config),
        ))
    }
}
