use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Ayurkosha";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default name of the two-column document table.
pub const DEFAULT_TABLE: &str = "records";

/// Default remote request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the remote record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the PostgREST-style endpoint, without trailing slash.
    pub base_url: String,
    /// API key sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Table holding the key/value rows.
    pub table: String,
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read configuration from `AYURKOSHA_STORE_URL` / `AYURKOSHA_STORE_KEY`,
    /// with an optional `AYURKOSHA_STORE_TABLE` override.
    ///
    /// Returns `None` when either required variable is missing, so callers
    /// can fall back to a local store.
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("AYURKOSHA_STORE_URL").ok()?;
        let api_key = env::var("AYURKOSHA_STORE_KEY").ok()?;
        let mut config = Self::new(base_url, api_key);
        if let Ok(table) = env::var("AYURKOSHA_STORE_TABLE") {
            config.table = table;
        }
        Some(config)
    }
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_default_table_and_timeout() {
        let config = StoreConfig::new("http://localhost:3000", "secret");
        assert_eq!(config.table, "records");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn from_env_requires_url_and_key() {
        env::remove_var("AYURKOSHA_STORE_URL");
        env::remove_var("AYURKOSHA_STORE_KEY");
        assert!(StoreConfig::from_env().is_none());
    }

    #[test]
    fn app_name_is_ayurkosha() {
        assert_eq!(APP_NAME, "Ayurkosha");
    }

    #[test]
    fn default_filter_scopes_to_crate() {
        assert!(default_log_filter().starts_with("ayurkosha="));
    }
}
