use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const APP_NAME: &str = "gqlr";
const CONFIG_NAME: &str = "config";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "http://localhost:4000/graphql".to_string(),
            headers: BTreeMap::new(),
            output_format: OutputFormat::Table,
            log: None,
        }
    }
}

impl Config {
    pub fn log_level(&self) -> LevelFilter {
        match self
            .log
            .to_owned()
            .unwrap_or_else(|| "WARN".to_string())
            .to_uppercase()
            .as_str()
        {
            "TRACE" => LevelFilter::TRACE,
            "DEBUG" => LevelFilter::DEBUG,
            "INFO" => LevelFilter::INFO,
            "ERROR" => LevelFilter::ERROR,
            _ => LevelFilter::WARN,
        }
    }

    /// Filter for the cli subscriber. `directives` (usually `RUST_LOG`) refine
    /// the configured level.
    pub fn log_filter(&self, directives: Option<&str>) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.log_level().into())
            .parse_lossy(directives.unwrap_or_default())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn load_config() -> Result<Config> {
    confy::load(APP_NAME, CONFIG_NAME).map_err(|e| {
        match confy::get_configuration_file_path(APP_NAME, CONFIG_NAME) {
            Ok(path) => anyhow::anyhow!("Fail load config from {}: {}", path.display(), e),
            Err(path_err) => anyhow::anyhow!(
                "Fail load config and couldn't determine config path: {} (path error: {})",
                e,
                path_err
            ),
        }
    })
}

pub fn save_config(config: &Config) -> Result<()> {
    confy::store(APP_NAME, CONFIG_NAME, config).map_err(
        |e| match confy::get_configuration_file_path(APP_NAME, CONFIG_NAME) {
            Ok(path) => anyhow::anyhow!("Fail save config to {}: {}", path.display(), e),
            Err(path_err) => anyhow::anyhow!(
                "Fail save config and couldn't determine config path: {} (path error: {})",
                e,
                path_err
            ),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"url":"http://api/graphql"}"#).unwrap();
        assert_eq!(cfg.url, "http://api/graphql");
        assert!(cfg.headers.is_empty());
        assert!(matches!(cfg.output_format, OutputFormat::Table));
        assert_eq!(cfg.log_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let cfg = Config {
            log: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.log_level(), LevelFilter::DEBUG);
    }

    #[test]
    fn test_log_filter_uses_configured_level() {
        let cfg = Config {
            log: Some("debug".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.log_filter(None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            Config::default().log_filter(Some("")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            Config::default().log_filter(Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
