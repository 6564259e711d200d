use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 对话存储 API 地址
    pub api_base_url: String,
    /// 自动翻译时读取的候选译文名称
    pub translation_provider: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            translation_provider: "google".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
            output_log_file: "review_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .or_else(|_| std::env::var("VITE_API_URL"))
                .unwrap_or(default.api_base_url),
            translation_provider: std::env::var("TRANSLATION_PROVIDER").unwrap_or(default.translation_provider),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: origin.to_string(),
                source,
            }
            .into()
        })
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_partial_config_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://dialogs.example.com"
            verbose_logging = true
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://dialogs.example.com");
        assert!(config.verbose_logging);
        assert_eq!(config.translation_provider, "google");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_toml_parse_error() {
        let err = Config::from_toml_str("api_base_url = ", "broken.toml").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }

    #[test]
    fn test_validate_base_url() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api_base_url = "".to_string();
        assert!(config.validate().is_err());

        config.api_base_url = "ftp://dialogs".to_string();
        assert!(config.validate().is_err());
    }
}
