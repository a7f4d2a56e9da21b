//! Client configuration: API base URL, bearer token and user agent.

use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://public-api.wordpress.com/rest/v1";

pub const TOKEN_ENV: &str = "WPCOM_TOKEN";
pub const BASE_URL_ENV: &str = "WPCOM_API_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    token: Option<String>,
    user_agent: String,
}

impl Config {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
            user_agent: default_user_agent(),
        }
    }

    /// Read `WPCOM_TOKEN` and `WPCOM_API_URL`. Unset or empty variables fall
    /// back to no token and the public API respectively.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let token = lookup(TOKEN_ENV);
        let config = Self::new(token.as_deref());
        match lookup(BASE_URL_ENV).filter(|url| !url.is_empty()) {
            Some(url) => config.with_base_url(&url),
            None => config,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string()).filter(|t| !t.is_empty());
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("wpcom-rs/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_public_api_without_token() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.token(), None);
        assert!(config.user_agent().starts_with("wpcom-rs/"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::new(None).with_base_url("http://localhost:3000/");
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn empty_token_counts_as_unset() {
        assert_eq!(Config::new(Some("")).token(), None);
        assert_eq!(Config::default().with_token("").token(), None);
    }

    #[test]
    fn env_lookup_reads_token_and_url() {
        let config = Config::from_lookup(lookup(&[
            (TOKEN_ENV, "secret"),
            (BASE_URL_ENV, "http://127.0.0.1:9000/"),
        ]));
        assert_eq!(config.token(), Some("secret"));
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn env_lookup_ignores_empty_url() {
        let config = Config::from_lookup(lookup(&[(BASE_URL_ENV, "")]));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.token(), None);
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", Config::new(Some("hunter2")));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
