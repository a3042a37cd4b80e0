//! Bearer token providers.

use async_trait::async_trait;
use tracing::debug;

use super::constants::DEFAULT_TOKEN_ENV;
use super::{PlatformError, TokenProvider};

/// Reads the access token from an environment variable on every request.
///
/// The variable is read lazily so a token refreshed by an outer process
/// between exports is picked up.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    var: String,
}

impl EnvTokenProvider {
    /// Reads from `var`.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the environment variable consulted.
    #[must_use]
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_ENV)
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn access_token(&self) -> Result<String, PlatformError> {
        let value = std::env::var(&self.var)
            .map_err(|e| PlatformError::missing_token(&self.var, e.to_string()))?;
        let token = value.trim();
        if token.is_empty() {
            return Err(PlatformError::missing_token(&self.var, "variable is empty"));
        }
        debug!(var = %self.var, "access token read from environment");
        Ok(token.to_string())
    }

    fn describe(&self) -> String {
        format!("${}", self.var)
    }
}

/// Hands out a fixed token. Useful for tests and callers that manage refresh themselves.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wraps `token`.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, PlatformError> {
        Ok(self.token.clone())
    }

    fn describe(&self) -> String {
        "static token".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_provider_returns_token() {
        let provider = StaticTokenProvider::new("ya29.token");
        assert_eq!(provider.access_token().await.unwrap(), "ya29.token");
    }

    #[test]
    fn test_static_token_debug_redacts_value() {
        let debug = format!("{:?}", StaticTokenProvider::new("secret-value"));
        assert!(!debug.contains("secret-value"), "token leaked: {debug}");
    }

    #[tokio::test]
    async fn test_env_token_provider_missing_variable() {
        let provider = EnvTokenProvider::new("SHEETS_EXPORT_TEST_TOKEN_NEVER_SET");
        let err = provider.access_token().await.unwrap_err();
        assert!(matches!(err, PlatformError::MissingToken { .. }));
    }

    #[tokio::test]
    async fn test_env_token_provider_trims_value() {
        let var = "SHEETS_EXPORT_TEST_TOKEN_TRIM";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var, "  abc123\n") };
        let provider = EnvTokenProvider::new(var);
        assert_eq!(provider.access_token().await.unwrap(), "abc123");
        unsafe { std::env::remove_var(var) };
    }

    #[tokio::test]
    async fn test_env_token_provider_rejects_blank_value() {
        let var = "SHEETS_EXPORT_TEST_TOKEN_BLANK";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var, "   ") };
        let provider = EnvTokenProvider::new(var);
        assert!(provider.access_token().await.is_err());
        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_env_token_provider_default_var() {
        assert_eq!(EnvTokenProvider::default().var(), DEFAULT_TOKEN_ENV);
    }
}
