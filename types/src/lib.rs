use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// One step of the response path an error refers to: a field name or a list index.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(i64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        PathSegment::Index(index)
    }
}

/// Error object as reported in the `errors` field of a GraphQL response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }

    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.locations.push(Location::new(line, column));
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }

    pub fn with_extensions(mut self, extensions: serde_json::Value) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn locations_display(&self) -> String {
        self.locations
            .iter()
            .map(|loc| format!("{}:{}", loc.line, loc.column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn path_display(&self) -> String {
        self.path
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.locations.is_empty() {
            write!(f, " ({})", self.locations_display())?;
        }
        if !self.path.is_empty() {
            write!(f, " at {}", self.path_display())?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphQLError {}

/// Request body sent to the endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Query<V = serde_json::Value> {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }
}

impl<V> Query<V> {
    pub fn with_variables<W>(self, variables: W) -> Query<W> {
        Query {
            query: self.query,
            variables: Some(variables),
        }
    }
}

/// Top-level object of a GraphQL HTTP response. Both fields are optional on the wire.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Envelope<T, E = GraphQLError> {
    pub data: Option<T>,
    pub errors: Option<Vec<E>>,
}

impl<T, E> Envelope<T, E> {
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    /// An envelope is usable when it carries data or at least one error.
    pub fn is_usable(&self) -> bool {
        self.has_data() || self.has_errors()
    }
}
