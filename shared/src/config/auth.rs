//! Authentication configuration: access token signing and refresh token policy

use serde::{Deserialize, Serialize};

use super::{parse_or, ConfigError};

/// HMAC algorithms accepted for access token signing
pub const SUPPORTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Upper bound for token lifetimes (10 years, in seconds)
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 10 * 365 * 86_400;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret used for HMAC signing; empty means "not configured"
    #[serde(skip_serializing)]
    pub secret: String,

    /// Algorithm for JWT signing (default: HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Maximum age of a refresh token in seconds
    pub refresh_token_max_age: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: default_algorithm(),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_max_age: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token max age in days
    pub fn with_refresh_max_age_days(mut self, days: i64) -> Self {
        self.refresh_token_max_age = days * 86400;
        self
    }

    /// Whether a signing secret was supplied at all
    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

/// How refresh secrets are kept at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretStorageMode {
    /// Stored exactly as handed to the client
    #[default]
    Plain,
    /// Stored as a hex SHA-256 digest
    Sha256,
}

impl std::str::FromStr for SecretStorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "identity" => Ok(SecretStorageMode::Plain),
            "sha256" | "hash" => Ok(SecretStorageMode::Sha256),
            _ => Err(format!("Invalid secret storage mode: {}", s)),
        }
    }
}

/// What happens when two rotations of the same secret race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationMode {
    /// Unconditional upsert; the last writer's secret survives
    #[default]
    LastWriteWins,
    /// Conditional replace on the old secret; the loser gets a conflict
    CompareAndSwap,
}

impl std::str::FromStr for RotationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-write-wins" | "upsert" => Ok(RotationMode::LastWriteWins),
            "compare-and-swap" | "cas" => Ok(RotationMode::CompareAndSwap),
            _ => Err(format!("Invalid rotation mode: {}", s)),
        }
    }
}

/// Refresh token policy
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RefreshTokenConfig {
    #[serde(default)]
    pub storage: SecretStorageMode,

    #[serde(default)]
    pub rotation: RotationMode,
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh token policy
    #[serde(default)]
    pub refresh: RefreshTokenConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&|key| std::env::var(key).ok())
    }

    pub(crate) fn from_source<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = JwtConfig::default();

        let algorithm = match lookup("JWT_ALGORITHM") {
            Some(value) => {
                let upper = value.trim().to_uppercase();
                if !SUPPORTED_ALGORITHMS.contains(&upper.as_str()) {
                    return Err(ConfigError::invalid("JWT_ALGORITHM", &value, "HS256, HS384 or HS512"));
                }
                upper
            }
            None => defaults.algorithm,
        };

        let storage = match lookup("REFRESH_TOKEN_STORAGE") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::invalid("REFRESH_TOKEN_STORAGE", &value, "plain or sha256"))?,
            None => SecretStorageMode::default(),
        };

        let rotation = match lookup("REFRESH_TOKEN_ROTATION") {
            Some(value) => value.parse().map_err(|_| {
                ConfigError::invalid(
                    "REFRESH_TOKEN_ROTATION",
                    &value,
                    "last-write-wins or compare-and-swap",
                )
            })?,
            None => RotationMode::default(),
        };

        Ok(Self {
            jwt: JwtConfig {
                secret: lookup("JWT_SECRET").unwrap_or_default(),
                algorithm,
                access_token_expiry: parse_lifetime(
                    lookup,
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    defaults.access_token_expiry,
                )?,
                refresh_token_max_age: parse_lifetime(
                    lookup,
                    "JWT_REFRESH_TOKEN_MAX_AGE",
                    defaults.refresh_token_max_age,
                )?,
            },
            refresh: RefreshTokenConfig { storage, rotation },
        })
    }
}

/// A lifetime in seconds, within `1..=MAX_TOKEN_LIFETIME_SECS`
fn parse_lifetime<F>(lookup: &F, key: &str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parse_or(lookup, key, default);
    if secs <= 0 || secs > MAX_TOKEN_LIFETIME_SECS {
        return Err(ConfigError::invalid(
            key,
            &secs.to_string(),
            "a number of seconds between 1 and 315360000",
        ));
    }
    Ok(secs)
}

fn default_algorithm() -> String {
    String::from("HS512")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_max_age, 604800);
        assert_eq!(config.algorithm, "HS512");
        assert!(!config.has_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_max_age_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_max_age, 1209600);
        assert!(config.has_secret());
    }

    #[test]
    fn test_secret_is_never_serialized() {
        let json = serde_json::to_string(&JwtConfig::new("top-secret")).unwrap();
        assert!(!json.contains("top-secret"));
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let lookup = |key: &str| (key == "JWT_ALGORITHM").then(|| "RS256".to_string());
        let err = AuthConfig::from_source(&lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "JWT_ALGORITHM"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("SHA256".parse::<SecretStorageMode>(), Ok(SecretStorageMode::Sha256));
        assert_eq!("plain".parse::<SecretStorageMode>(), Ok(SecretStorageMode::Plain));
        assert_eq!("cas".parse::<RotationMode>(), Ok(RotationMode::CompareAndSwap));
        assert!("bcrypt".parse::<SecretStorageMode>().is_err());
    }

    #[test]
    fn test_lifetimes_out_of_range_are_rejected() {
        for (var, value) in [
            ("JWT_ACCESS_TOKEN_EXPIRY", "0"),
            ("JWT_ACCESS_TOKEN_EXPIRY", "-900"),
            ("JWT_ACCESS_TOKEN_EXPIRY", "10000000000000"),
            ("JWT_REFRESH_TOKEN_MAX_AGE", "9223372036854775807"),
        ] {
            let lookup = |key: &str| (key == var).then(|| value.to_string());
            let err = AuthConfig::from_source(&lookup).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref key, .. } if key == var),
                "{}={}",
                var,
                value
            );
        }
    }

    #[test]
    fn test_lifetimes_within_range_are_read() {
        let lookup = |key: &str| match key {
            "JWT_ACCESS_TOKEN_EXPIRY" => Some("60".to_string()),
            "JWT_REFRESH_TOKEN_MAX_AGE" => Some(MAX_TOKEN_LIFETIME_SECS.to_string()),
            _ => None,
        };
        let config = AuthConfig::from_source(&lookup).unwrap();
        assert_eq!(config.jwt.access_token_expiry, 60);
        assert_eq!(config.jwt.refresh_token_max_age, MAX_TOKEN_LIFETIME_SECS);
    }
}
