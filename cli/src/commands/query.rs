use anyhow::{Context, Result};
use clap::Args;
use gqlr_client::{Client, Errors, GraphQLError, GraphQLResponse, HttpFailure, Query};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;

use crate::{config::Config, config::OutputFormat, output};

#[derive(Args, Clone)]
pub struct QueryArgs {
    /// Query text
    #[arg(required_unless_present = "file")]
    query: Option<String>,

    /// Read the query from a file (use '-' for stdin)
    #[arg(long, short, value_name = "FILE", conflicts_with = "query")]
    file: Option<PathBuf>,

    /// Variables as a JSON object
    #[arg(long)]
    variables: Option<String>,

    /// Extra header as name:value, may be repeated
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Report unusable HTTP responses as errors instead of failing
    #[arg(long)]
    http_errors: bool,
}

impl QueryArgs {
    pub async fn execute(
        self,
        cfg: &Config,
        url: &str,
        output_format: &OutputFormat,
    ) -> Result<()> {
        let response = self.run(cfg, url).await?;

        output::print_response(&response, output_format)?;
        if let Some(errors) = response.errors() {
            anyhow::bail!("Query returned {} error(s)", errors.len());
        }
        Ok(())
    }

    async fn run(self, cfg: &Config, url: &str) -> Result<GraphQLResponse<Value>> {
        let text = match (&self.query, &self.file) {
            (Some(query), _) => query.clone(),
            (None, Some(path)) => read_query(path)?,
            (None, None) => anyhow::bail!("Missing query text or --file"),
        };
        let query = build_query(text, self.variables.as_deref())?;
        let client = build_client(cfg, url, self.headers, self.http_errors)?;

        debug!(url, "run query");
        client.query(query).await.context("Fail run query")
    }
}

fn build_query(text: String, variables: Option<&str>) -> Result<Query> {
    let query = Query::new(text);
    let Some(raw) = variables else {
        return Ok(query);
    };
    let parsed: Value = serde_json::from_str(raw).context("Fail parse variables")?;
    if !parsed.is_object() {
        anyhow::bail!("Variables must be a JSON object");
    }
    Ok(query.with_variables(parsed))
}

/// Config headers go first so repeated names keep both values.
fn build_client(
    cfg: &Config,
    url: &str,
    headers: Vec<(String, String)>,
    http_errors: bool,
) -> Result<Client> {
    let mut builder = Client::<GraphQLError>::builder(url)
        .headers(cfg.headers.clone())
        .headers(headers);
    if http_errors {
        builder = builder.on_http_error(|failure: HttpFailure| async move {
            Errors::single(http_error(&failure))
        });
    }
    builder.build().context("Fail build client")
}

fn http_error(failure: &HttpFailure) -> GraphQLError {
    GraphQLError::new(format!(
        "{} ({})",
        failure.status_text(),
        failure.status.as_u16()
    ))
    .with_extensions(json!({ "body": failure.body_text() }))
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("Invalid header '{}', expected name:value", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid header '{}', empty name", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn read_query(path: &PathBuf) -> Result<String> {
    let content = if path.to_str() == Some("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Fail read query from {}", path.display()))?
    };
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlr_client::ClientError;

    fn args(query: &str, http_errors: bool) -> QueryArgs {
        QueryArgs {
            query: Some(query.to_string()),
            file: None,
            variables: None,
            headers: vec![("authorization".to_string(), "bearer t".to_string())],
            http_errors,
        }
    }

    fn graphql_url(server: &mockito::ServerGuard) -> String {
        format!("{}/graphql", server.url())
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("authorization: bearer abcd").unwrap(),
            ("authorization".to_string(), "bearer abcd".to_string())
        );
        assert_eq!(
            parse_header("x-url:http://a:1").unwrap(),
            ("x-url".to_string(), "http://a:1".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_build_query_variables() {
        let query = build_query("{ me }".to_string(), None).unwrap();
        assert!(query.variables.is_none());

        let query = build_query("{ me }".to_string(), Some(r#"{"id": 1}"#)).unwrap();
        assert_eq!(query.variables, Some(json!({"id": 1})));

        assert!(build_query("{ me }".to_string(), Some("[1, 2]")).is_err());
        assert!(build_query("{ me }".to_string(), Some("\"id\"")).is_err());
        assert!(build_query("{ me }".to_string(), Some("not json")).is_err());
    }

    #[tokio::test]
    async fn test_run_sends_config_and_cli_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .match_header("x-team", "core")
            .match_header("authorization", "bearer t")
            .with_status(200)
            .with_body(r#"{"data":{"me":"gqlr"}}"#)
            .create_async()
            .await;

        let mut cfg = Config::default();
        cfg.headers.insert("x-team".to_string(), "core".to_string());

        let response = args("{ me }", false)
            .run(&cfg, &graphql_url(&server))
            .await
            .unwrap();

        assert_eq!(response, GraphQLResponse::ok(json!({"me": "gqlr"})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_errors_flag_reports_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let response = args("{ me }", true)
            .run(&Config::default(), &graphql_url(&server))
            .await
            .unwrap();

        let errors = response.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "Internal Server Error (500)");
        assert_eq!(errors.first().extensions, Some(json!({"body": "boom"})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unusable_response_without_flag_fails() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = args("{ me }", false)
            .run(&Config::default(), &graphql_url(&server))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Http { status: 500, .. })
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_execute_fails_on_graphql_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"errors":[{"message":"denied"}]}"#)
            .create_async()
            .await;

        let err = args("{ me }", false)
            .execute(&Config::default(), &graphql_url(&server), &OutputFormat::Json)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Query returned 1 error(s)");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_execute_succeeds_on_data() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data":{"me":"gqlr"}}"#)
            .create_async()
            .await;

        args("{ me }", false)
            .execute(&Config::default(), &graphql_url(&server), &OutputFormat::Table)
            .await
            .unwrap();
        mock.assert_async().await;
    }
}
