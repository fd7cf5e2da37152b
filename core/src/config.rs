//! Client configuration.
//!
//! Read from the environment with defaults; invalid values fall back rather
//! than fail.

use std::env;

pub const BASE_URL_VAR: &str = "POSTS_ADMIN_API_URL";
pub const USER_ID_VAR: &str = "POSTS_ADMIN_USER_ID";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_USER_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin serving the `/api` routes.
    pub base_url: String,
    /// Acting user written into new post and comment drafts.
    pub user_id: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup(BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);
        let user_id = lookup(USER_ID_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.user_id);
        Self { base_url, user_id }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), ClientConfig::default());
    }

    #[test]
    fn reads_both_variables() {
        let c = config(&[(BASE_URL_VAR, "http://api.test"), (USER_ID_VAR, "25")]);
        assert_eq!(c.base_url, "http://api.test");
        assert_eq!(c.user_id, 25);
    }

    #[test]
    fn invalid_user_id_falls_back() {
        assert_eq!(config(&[(USER_ID_VAR, "0")]).user_id, DEFAULT_USER_ID);
        assert_eq!(config(&[(USER_ID_VAR, "admin")]).user_id, DEFAULT_USER_ID);
        assert_eq!(config(&[(BASE_URL_VAR, "  ")]).base_url, DEFAULT_BASE_URL);
    }
}
