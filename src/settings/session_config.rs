use super::{
    endpoints::{
        normalize_api_base, validate_upload_template, DEFAULT_API_BASE,
        DEFAULT_UPLOAD_URL_TEMPLATE,
    },
    retries::{default_max_retries, parse_max_retries},
};
use crate::error::Result;
use std::time::Duration;

const API_BASE_ENV: &str = "GOFILE_API_BASE";
const MAX_RETRIES_ENV: &str = "GOFILE_MAX_RETRIES";
const TOKEN_ENV: &str = "GOFILE_TOKEN";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// 会话的全部可调参数。构造后只读，`max_retries` 在会话生命周期内不变。
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub api_base: String,
    pub upload_url_template: String,
    pub max_retries: u32,
    pub raw_output: bool,
    pub timeout: Duration,
    pub upload_timeout: Duration,
    /// 为空时构造会话会先创建一个新的 guest 账户。
    pub token: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_url_template: DEFAULT_UPLOAD_URL_TEMPLATE.to_string(),
            max_retries: default_max_retries(),
            raw_output: false,
            timeout: DEFAULT_TIMEOUT,
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
            token: None,
        }
    }
}

impl SessionConfig {
    /// 在默认值之上叠加 `GOFILE_API_BASE`、`GOFILE_MAX_RETRIES`、`GOFILE_TOKEN`。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(base) = lookup(API_BASE_ENV) {
            config.api_base = normalize_api_base(&base)?;
        }
        if let Some(raw) = lookup(MAX_RETRIES_ENV) {
            config.max_retries = parse_max_retries(&raw)?;
        }
        config.token = lookup(TOKEN_ENV).filter(|token| !token.trim().is_empty());
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_upload_url_template(mut self, template: impl Into<String>) -> Self {
        self.upload_url_template = template.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_raw_output(mut self, raw_output: bool) -> Self {
        self.raw_output = raw_output;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 校验并规范化；会话构造时调用。
    pub fn validate(mut self) -> Result<Self> {
        self.api_base = normalize_api_base(&self.api_base)?;
        validate_upload_template(&self.upload_url_template)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.api_base, "https://api.gofile.io");
        assert_eq!(config.max_retries, 5);
        assert!(!config.raw_output);
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overlay() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("GOFILE_API_BASE", "http://localhost:8080/"),
            ("GOFILE_MAX_RETRIES", "2"),
            ("GOFILE_TOKEN", "tok"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_env_blank_token_ignored() {
        let config = SessionConfig::from_lookup(lookup_from(&[("GOFILE_TOKEN", "  ")])).unwrap();
        assert!(config.token.is_none());
    }

    #[test]
    fn test_env_rejects_bad_values() {
        assert!(SessionConfig::from_lookup(lookup_from(&[("GOFILE_MAX_RETRIES", "x")])).is_err());
        assert!(SessionConfig::from_lookup(lookup_from(&[("GOFILE_API_BASE", "nope")])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_template() {
        let config = SessionConfig::default().with_upload_url_template("https://upload.example");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_large_retry_budget_is_accepted() {
        let config = SessionConfig::default().with_max_retries(150).validate().unwrap();
        assert_eq!(config.max_retries, 150);
        let config = SessionConfig::default().with_max_retries(u32::MAX).validate().unwrap();
        assert_eq!(config.max_retries, u32::MAX);
    }
}
