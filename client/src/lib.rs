mod config;
mod error;
mod hooks;
mod pipeline;
mod response;

pub use config::{ClientBuilder, ClientConfig};
pub use error::{ClientError, Result};
pub use hooks::{HttpFailure, OnError, OnHttpError, PreRequest, RequestFactory};
pub use pipeline::{REQUEST_MARKER_HEADER, REQUEST_MARKER_VALUE};
pub use response::{Errors, GraphQLResponse};

pub use gqlr_types::{GraphQLError, Location, PathSegment, Query};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// GraphQL client bound to one endpoint.
///
/// `E` is the error type every response of this client carries. Cloning is
/// cheap and clones share configuration and transport.
pub struct Client<E = GraphQLError> {
    http: reqwest::Client,
    config: Arc<ClientConfig<E>>,
}

impl<E> Clone for Client<E> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl Client<GraphQLError> {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(url).build()
    }
}

impl<E> Client<E>
where
    E: DeserializeOwned + Clone + Send + 'static,
{
    pub fn builder(url: impl Into<String>) -> ClientBuilder<E> {
        ClientBuilder::new(url)
    }

    /// Runs one query. GraphQL errors and hooked HTTP failures come back as
    /// [`GraphQLResponse::Err`]; anything else is a [`ClientError`].
    pub async fn query<T>(
        &self,
        query: Query<impl Serialize>,
    ) -> Result<GraphQLResponse<T, E>>
    where
        T: DeserializeOwned,
    {
        pipeline::resolve(&self.http, &self.config, &query).await
    }
}

impl<E> Client<E> {
    pub(crate) fn from_parts(http: reqwest::Client, config: Arc<ClientConfig<E>>) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig<E> {
        &self.config
    }
}
