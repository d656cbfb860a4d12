use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub failure_mode: FailureMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ServiceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize service config")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            log_level: default_log_level(),
        }
    }
}

/// 非列举操作失败时的呈现方式。
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// 失败降级为 `false`、空字符串或 null。
    #[default]
    Compatible,
    /// 所有失败都以错误码上报。
    Strict,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::{FailureMode, ServiceConfig};

    #[test]
    fn test_parse_config() {
        let raw = r#"
failure_mode = "strict"
log_level = "debug"
"#;

        let config = ServiceConfig::from_str(raw).expect("config should parse");
        assert_eq!(config.failure_mode, FailureMode::Strict);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ServiceConfig::from_str("").expect("config should parse");

        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.failure_mode, FailureMode::Compatible);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_failure_mode_is_rejected() {
        assert!(ServiceConfig::from_str(r#"failure_mode = "lenient""#).is_err());
    }

    #[test]
    fn test_from_file_reports_missing_path() {
        let err = ServiceConfig::from_file("/definitely/missing/inventory.toml")
            .expect_err("missing file must fail");

        assert!(err.to_string().contains("failed to read config file"));
    }
}
