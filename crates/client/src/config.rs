/// Where list views get their data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL of `ballie-api`, e.g. `http://localhost:3000`. Unset means
    /// mock mode.
    pub api_url: Option<String>,
    /// Use the in-memory stores even when `api_url` is set.
    pub use_mock: bool,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            use_mock: false,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// | Env Var                       | Default |
    /// |-------------------------------|---------|
    /// | `BALLIE_API_URL`              | unset   |
    /// | `BALLIE_USE_MOCK`             | `0`     |
    /// | `BALLIE_REQUEST_TIMEOUT_SECS` | `30`    |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("BALLIE_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let use_mock = lookup("BALLIE_USE_MOCK")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let request_timeout_secs: u64 = lookup("BALLIE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".into())
            .trim()
            .parse()
            .expect("BALLIE_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            use_mock,
            request_timeout_secs,
        }
    }

    /// The remote URL to use, or `None` for mock mode.
    pub fn remote_url(&self) -> Option<&str> {
        if self.use_mock {
            return None;
        }
        self.api_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn no_url_means_mock_mode() {
        let config = config(&[]);
        assert_eq!(config, ClientConfig::default());
        assert!(config.remote_url().is_none());
    }

    #[test]
    fn url_selects_remote_mode() {
        let config = config(&[
            ("BALLIE_API_URL", " http://localhost:3000 "),
            ("BALLIE_REQUEST_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.remote_url(), Some("http://localhost:3000"));
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn mock_flag_overrides_url() {
        let config = config(&[
            ("BALLIE_API_URL", "http://localhost:3000"),
            ("BALLIE_USE_MOCK", "1"),
        ]);
        assert!(config.use_mock);
        assert!(config.remote_url().is_none());
    }

    #[test]
    fn blank_url_is_ignored() {
        assert!(config(&[("BALLIE_API_URL", "  ")]).api_url.is_none());
    }
}
