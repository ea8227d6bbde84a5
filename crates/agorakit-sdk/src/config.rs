//! SDK configuration.
//!
//! [`AgoraConfig`] carries everything the REST client needs: the customer
//! key/secret pair for HTTP Basic auth, the service region, and the API
//! base URL (overridable for tests). Built explicitly or from environment
//! variables; nothing is read from globals after construction.

use std::fmt;

use agorakit_models::Region;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::SdkError;

/// Default base URL of Agora's RESTful API.
pub const DEFAULT_BASE_URL: &str = "https://api.agora.io";

// ---------------------------------------------------------------------------
// CustomerCredentials
// ---------------------------------------------------------------------------

/// Customer Key / Customer Secret pair used for HTTP Basic auth.
///
/// The secret never appears in `Debug` output.
#[derive(Clone)]
pub struct CustomerCredentials {
    key: String,
    secret: String,
}

impl CustomerCredentials {
    /// Wrap a key/secret pair.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Read `AGORA_CUSTOMER_KEY` / `AGORA_CUSTOMER_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] naming the missing variable.
    pub fn from_env() -> Result<Self, SdkError> {
        let key = std::env::var("AGORA_CUSTOMER_KEY")
            .map_err(|_| SdkError::Config("AGORA_CUSTOMER_KEY not set".into()))?;
        let secret = std::env::var("AGORA_CUSTOMER_SECRET")
            .map_err(|_| SdkError::Config("AGORA_CUSTOMER_SECRET not set".into()))?;
        Ok(Self::new(key, secret))
    }

    /// The `Authorization` header value: `Basic base64(key:secret)`.
    pub fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.key, self.secret);
        format!("Basic {}", STANDARD.encode(pair))
    }

    /// The customer key (public half).
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for CustomerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerCredentials")
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AgoraConfig
// ---------------------------------------------------------------------------

/// Full client configuration.
#[derive(Debug, Clone)]
pub struct AgoraConfig {
    /// Basic-auth credentials.
    pub credentials: CustomerCredentials,
    /// Region for region-scoped endpoints (stream keys).
    pub region: Region,
    /// API base URL (default [`DEFAULT_BASE_URL`]).
    pub base_url: String,
}

impl AgoraConfig {
    /// Configuration with the default base URL and region.
    pub fn new(credentials: CustomerCredentials) -> Self {
        Self {
            credentials,
            region: Region::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `AGORA_CUSTOMER_KEY` | — (required) | Customer Key |
    /// | `AGORA_CUSTOMER_SECRET` | — (required) | Customer Secret |
    /// | `AGORA_REGION` | `na` | Region code |
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] when a required variable is missing
    /// or the region code is unknown.
    pub fn from_env() -> Result<Self, SdkError> {
        let credentials = CustomerCredentials::from_env()?;
        let region = match std::env::var("AGORA_REGION") {
            Ok(v) => v
                .parse()
                .map_err(|_| SdkError::Config(format!("unknown AGORA_REGION \"{v}\"")))?,
            Err(_) => Region::default(),
        };
        Ok(Self {
            credentials,
            region,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the region.
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Override the base URL (tests, private deployments).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_is_base64_of_key_colon_secret() {
        let creds = CustomerCredentials::new("mykey", "mysecret");
        // base64("mykey:mysecret")
        assert_eq!(creds.basic_auth_header(), "Basic bXlrZXk6bXlzZWNyZXQ=");
    }

    #[test]
    fn debug_redacts_secret() {
        let creds = CustomerCredentials::new("mykey", "mysecret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("mykey"));
        assert!(!debug.contains("mysecret"));
    }

    #[test]
    fn config_defaults() {
        let cfg = AgoraConfig::new(CustomerCredentials::new("k", "s"));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.region, Region::Na);
    }

    #[test]
    fn config_overrides() {
        let cfg = AgoraConfig::new(CustomerCredentials::new("k", "s"))
            .with_region(Region::Eu)
            .with_base_url("http://localhost:9999");
        assert_eq!(cfg.region, Region::Eu);
        assert_eq!(cfg.base_url, "http://localhost:9999");
    }
}
