use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use lost_post::transport::DEFAULT_BASE_URL;

/// Connection settings loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub api_url: String,
    pub user_id: String,
    auth_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from a key lookup. The auth token may be absent until a post is
    /// actually sent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_url: lookup("POSTS_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_id: lookup("POSTS_USER_ID").context("POSTS_USER_ID must be set")?,
            auth_token: lookup("POSTS_AUTH_TOKEN"),
        })
    }

    /// Bearer token for the posts service
    pub fn auth_token(&self) -> Result<&str> {
        self.auth_token
            .as_deref()
            .context("POSTS_AUTH_TOKEN must be set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_is_optional_when_loading() {
        let config = config_from(&[("POSTS_USER_ID", "u1")]).unwrap();

        assert_eq!(config.user_id, "u1");
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert!(config.auth_token().is_err());
    }

    #[test]
    fn token_and_url_are_read_when_present() {
        let config = config_from(&[
            ("POSTS_USER_ID", "u1"),
            ("POSTS_AUTH_TOKEN", "tok"),
            ("POSTS_API_URL", "http://posts.test"),
        ])
        .unwrap();

        assert_eq!(config.auth_token().unwrap(), "tok");
        assert_eq!(config.api_url, "http://posts.test");
    }

    #[test]
    fn user_id_is_required() {
        let err = config_from(&[("POSTS_AUTH_TOKEN", "tok")]).err().unwrap();
        assert!(err.to_string().contains("POSTS_USER_ID"));
    }
}
