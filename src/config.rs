//! Provider configuration parsed from environment variables.

/// Default name for the list created on first session bootstrap.
pub const DEFAULT_LIST_NAME: &str = "My Wishlist";

/// Logical app identifier sent with generate-regid calls.
pub const DEFAULT_APP_ID: &str = "Wishlist";

/// Server-held credentials for the wishlist provider.
///
/// Read from `WISHLIST_API_KEY`, `WISHLIST_ENDPOINT` and `WISHLIST_PID`.
/// Missing values are logged as errors but do not abort startup; requests
/// made with an empty config will be rejected upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub pid: String,
}

impl ProviderConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("WISHLIST_API_KEY").ok(),
            std::env::var("WISHLIST_ENDPOINT").ok(),
            std::env::var("WISHLIST_PID").ok(),
        )
    }

    /// Build a config from raw values, logging each missing entry.
    #[must_use]
    pub fn from_values(api_key: Option<String>, endpoint: Option<String>, pid: Option<String>) -> Self {
        let api_key = require(api_key, "WISHLIST_API_KEY");
        let endpoint = require(endpoint, "WISHLIST_ENDPOINT")
            .trim_end_matches('/')
            .to_string();
        let pid = require(pid, "WISHLIST_PID");
        Self { api_key, endpoint, pid }
    }
}

fn require(value: Option<String>, var: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            tracing::error!(%var, "missing required environment variable");
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
