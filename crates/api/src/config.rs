//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MONGODB_URI` - `MongoDB` connection string (contains credentials)
//! - `MONGODB_DATABASE` - Database holding the marketplace collections
//! - `IDENTITY_BASE_URL` - Base URL of the identity provider REST API
//! - `IDENTITY_API_KEY` - Identity provider web API key
//! - `STRIPE_SECRET_KEY` - Stripe secret key (server-side only)
//!
//! ## Optional
//! - `API_HOST` - Bind address (default: 127.0.0.1)
//! - `API_PORT` - Listen port (default: 5000)
//! - `MONGODB_PRODUCTS_COLLECTION` - Products collection name (default: products)
//! - `MONGODB_ORDERS_COLLECTION` - Orders collection name (default: orders)
//! - `MONGODB_REVIEWS_COLLECTION` - Reviews collection name (default: reviews)
//! - `STRIPE_BASE_URL` - Stripe API origin (default: <https://api.stripe.com>)
//! - `STRIPE_CURRENCY` - Currency for payment intents (default: usd)
//! - `SENTRY_DSN` - Enables Sentry reporting when set

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Fragments that mark a secret as a stand-in (checked lowercased)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Failures surfaced while loading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the listener binds to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Document store configuration
    pub database: DatabaseConfig,
    /// Identity provider configuration
    pub identity: IdentityConfig,
    /// Stripe payment configuration
    pub stripe: StripeConfig,
    /// Sentry DSN, absent when reporting is off
    pub sentry_dsn: Option<String>,
}

/// `MongoDB` connection configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string (contains credentials)
    pub uri: SecretString,
    /// Database holding the marketplace collections
    pub database: String,
    /// Products collection name
    pub products_collection: String,
    /// Orders collection name
    pub orders_collection: String,
    /// Reviews collection name
    pub reviews_collection: String,
}

/// Identity provider configuration.
///
/// `Debug` is written by hand so the key renders as `[REDACTED]`.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Base URL of the provider's REST API (no trailing slash)
    pub base_url: String,
    /// Web API key passed as the `key` query parameter
    pub api_key: SecretString,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Stripe payment gateway configuration.
///
/// `Debug` is written by hand so the key renders as `[REDACTED]`.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe API origin (no trailing slash)
    pub base_url: String,
    /// Secret key used as the bearer credential
    pub secret_key: SecretString,
    /// ISO 4217 currency code for payment intents (lowercase)
    pub currency: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"[REDACTED]")
            .field("currency", &self.currency)
            .finish()
    }
}

impl ApiConfig {
    /// Read the full configuration from the process environment.
    ///
    /// A `.env` file is loaded first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is absent, fails to
    /// parse, or a secret looks like a stand-in value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("API_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("API_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("API_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("API_PORT".to_string(), e.to_string()))?;

        let database = DatabaseConfig::from_env()?;
        let identity = IdentityConfig::from_env()?;
        let stripe = StripeConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            database,
            identity,
            stripe,
            sentry_dsn,
        })
    }

    /// The address the listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            uri: get_connection_uri("MONGODB_URI")?,
            database: get_required_env("MONGODB_DATABASE")?,
            products_collection: get_env_or_default("MONGODB_PRODUCTS_COLLECTION", "products"),
            orders_collection: get_env_or_default("MONGODB_ORDERS_COLLECTION", "orders"),
            reviews_collection: get_env_or_default("MONGODB_REVIEWS_COLLECTION", "reviews"),
        })
    }
}

impl IdentityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url("IDENTITY_BASE_URL", get_required_env("IDENTITY_BASE_URL")?)?,
            api_key: get_validated_secret("IDENTITY_API_KEY")?,
        })
    }
}

impl StripeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(
                "STRIPE_BASE_URL",
                get_env_or_default("STRIPE_BASE_URL", "https://api.stripe.com"),
            )?,
            secret_key: get_validated_secret("STRIPE_SECRET_KEY")?,
            currency: get_env_or_default("STRIPE_CURRENCY", "usd").to_lowercase(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read an environment variable that must be present.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get connection URI with fallback to generic `DATABASE_URL` (used by PaaS attach).
fn get_connection_uri(primary_key: &str) -> Result<SecretString, ConfigError> {
    // Try primary key first (e.g., MONGODB_URI)
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    // Fallback to generic DATABASE_URL
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Read an environment variable that may be absent.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read an environment variable, falling back to `default`.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a value parses as an http(s) URL; returns it without a
/// trailing slash so request paths can be appended directly.
fn validate_base_url(key: &str, value: String) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Shannon entropy of `s` in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_default() += 1;
    }

    #[allow(clippy::cast_precision_loss)] // Secret lengths stay far below f64 precision
    let len = s.chars().count() as f64;
    freq.into_values()
        .map(|count| {
            #[allow(clippy::cast_precision_loss)] // Secret lengths stay far below f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject secrets that look like placeholders or have too little entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the real key, not a stand-in."
            ),
        ));
    }

    Ok(())
}

/// Read a required secret and run it through the strength checks.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // One repeated character carries zero bits
        assert!((shannon_entropy("zzzzzzz") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // Two equally likely characters: exactly 1 bit per char
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Sixteen distinct characters: exactly 4 bits per char
        let entropy = shannon_entropy("Qw7$Zx2!Nc9@Vb4#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-stripe-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        let result = validate_secret_strength("changeme123", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("kJ8#vR2qLm5$Wx9zPn3@Ty7bHd4!Fg6c", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_base_url_strips_trailing_slash() {
        let url = validate_base_url("TEST_URL", "https://api.example.dev/".to_string()).unwrap();
        assert_eq!(url, "https://api.example.dev");
    }

    #[test]
    fn test_validate_base_url_rejects_garbage() {
        let result = validate_base_url("TEST_URL", "not a url".to_string());
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_validate_base_url_rejects_non_http_schemes() {
        let result = validate_base_url("TEST_URL", "ftp://api.example.dev".to_string());
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            database: DatabaseConfig {
                uri: SecretString::from("mongodb://localhost:27017"),
                database: "driftwood".to_string(),
                products_collection: "products".to_string(),
                orders_collection: "orders".to_string(),
                reviews_collection: "reviews".to_string(),
            },
            identity: IdentityConfig {
                base_url: "https://identitytoolkit.googleapis.com".to_string(),
                api_key: SecretString::from("api_key"),
            },
            stripe: StripeConfig {
                base_url: "https://api.stripe.com".to_string(),
                secret_key: SecretString::from("sk_test_abc"),
                currency: "usd".to_string(),
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }

    #[test]
    fn test_identity_config_debug_redacts_secrets() {
        let config = IdentityConfig {
            base_url: "https://identitytoolkit.googleapis.com".to_string(),
            api_key: SecretString::from("super_secret_api_key"),
        };

        let rendered = format!("{config:?}");
        assert!(rendered.contains("identitytoolkit.googleapis.com"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super_secret_api_key"));
    }

    #[test]
    fn test_stripe_config_debug_redacts_secrets() {
        let config = StripeConfig {
            base_url: "https://api.stripe.com".to_string(),
            secret_key: SecretString::from("sk_live_very_secret"),
            currency: "usd".to_string(),
        };

        let rendered = format!("{config:?}");
        assert!(rendered.contains("api.stripe.com"));
        assert!(rendered.contains("usd"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sk_live_very_secret"));
    }
}
