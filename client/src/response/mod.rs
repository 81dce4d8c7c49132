//! Result container returned by every query.
//!
//! A [`GraphQLResponse`] is either `Ok` with the decoded `data` payload or
//! `Err` with one or more errors of the client's error type. Mapping
//! operations consume the receiver and return a new container.
//!
//! ```ignore
//! let login = client.query::<Login>(Query::new(LOGIN)).await?;
//! let me = login
//!     .try_and_then(|login| client.query::<Me>(me_query(&login.token)))
//!     .await?;
//! me.on_ok(|me| println!("{}", me.name))
//!     .on_err(|errors| eprintln!("{}", errors.first()));
//! ```

mod errors;

pub use errors::Errors;

use gqlr_types::GraphQLError;
use serde::Serialize;
use std::future::Future;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum GraphQLResponse<T, E = GraphQLError> {
    #[serde(rename = "data")]
    Ok(T),
    #[serde(rename = "errors")]
    Err(Errors<E>),
}

impl<T, E> GraphQLResponse<T, E> {
    pub fn ok(data: T) -> Self {
        Self::Ok(data)
    }

    /// Builds an `Err` from a single error or an [`Errors`] sequence.
    pub fn err(errors: impl Into<Errors<E>>) -> Self {
        Self::Err(errors.into())
    }

    /// Builds an `Err` from a raw sequence; `None` when it is empty.
    pub fn from_errors(errors: Vec<E>) -> Option<Self> {
        Errors::new(errors).map(Self::Err)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok(data) => Some(data),
            Self::Err(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&Errors<E>> {
        match self {
            Self::Ok(_) => None,
            Self::Err(errors) => Some(errors),
        }
    }

    /// Calls `f` with the data if this is `Ok`.
    pub fn on_ok<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&T),
    {
        if let Self::Ok(data) = self {
            f(data);
        }
        self
    }

    /// Calls `f` with the errors if this is `Err`.
    pub fn on_err<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&Errors<E>),
    {
        if let Self::Err(errors) = self {
            f(errors);
        }
        self
    }

    /// Runs exactly one of the two branches and returns its result.
    pub fn fold<R, O, F>(self, on_ok: O, on_err: F) -> R
    where
        O: FnOnce(T) -> R,
        F: FnOnce(Errors<E>) -> R,
    {
        match self {
            Self::Ok(data) => on_ok(data),
            Self::Err(errors) => on_err(errors),
        }
    }

    pub fn map_ok<U, F>(self, f: F) -> GraphQLResponse<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ok(data) => GraphQLResponse::Ok(f(data)),
            Self::Err(errors) => GraphQLResponse::Err(errors),
        }
    }

    /// Transforms the whole error sequence with a single call to `f`.
    pub fn map_err<E2, F>(self, f: F) -> GraphQLResponse<T, E2>
    where
        F: FnOnce(Errors<E>) -> Errors<E2>,
    {
        match self {
            Self::Ok(data) => GraphQLResponse::Ok(data),
            Self::Err(errors) => GraphQLResponse::Err(f(errors)),
        }
    }

    /// Runs a dependent operation with the data of an `Ok` response.
    ///
    /// An `Err` receiver short-circuits: `action` is never called and the
    /// same errors are returned.
    pub async fn and_then<U, F, Fut>(self, action: F) -> GraphQLResponse<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = GraphQLResponse<U, E>>,
    {
        match self {
            Self::Ok(data) => action(data).await,
            Self::Err(errors) => GraphQLResponse::Err(errors),
        }
    }

    /// Like [`and_then`](Self::and_then) for a dependent operation with a
    /// different error type. Only the errors of `action` go through `map_err`;
    /// errors of the receiver are passed on untouched.
    pub async fn and_then_map_err<U, E2, F, Fut, M>(
        self,
        action: F,
        map_err: M,
    ) -> GraphQLResponse<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = GraphQLResponse<U, E2>>,
        M: FnOnce(Errors<E2>) -> Errors<E>,
    {
        match self {
            Self::Ok(data) => action(data).await.map_err(map_err),
            Self::Err(errors) => GraphQLResponse::Err(errors),
        }
    }

    /// [`and_then`](Self::and_then) for actions that can fail outside the
    /// container, such as a query hitting a fatal transport error. The outer
    /// error is propagated as is.
    pub async fn try_and_then<U, X, F, Fut>(
        self,
        action: F,
    ) -> Result<GraphQLResponse<U, E>, X>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<GraphQLResponse<U, E>, X>>,
    {
        match self {
            Self::Ok(data) => action(data).await,
            Self::Err(errors) => Ok(GraphQLResponse::Err(errors)),
        }
    }

    pub fn into_result(self) -> Result<T, Errors<E>> {
        match self {
            Self::Ok(data) => Ok(data),
            Self::Err(errors) => Err(errors),
        }
    }
}

impl<T, E> From<GraphQLResponse<T, E>> for Result<T, Errors<E>> {
    fn from(response: GraphQLResponse<T, E>) -> Self {
        response.into_result()
    }
}
