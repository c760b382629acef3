//! At-rest form of refresh secrets

use auth_shared::config::SecretStorageMode;
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};

/// Transformation applied to a refresh secret before it is stored or looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretStorage {
    /// Stored as issued
    #[default]
    Plain,
    /// Stored as the hex SHA-256 digest of the secret
    Sha256,
}

impl SecretStorage {
    /// The value persisted for (and looked up by) `secret`
    pub fn stored_form(&self, secret: &str) -> String {
        match self {
            SecretStorage::Plain => secret.to_string(),
            SecretStorage::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(secret.as_bytes());
                hex::encode(hasher.finalize())
            }
        }
    }

    /// Constant-time check that `stored` is the stored form of `presented`
    pub fn matches(&self, stored: &str, presented: &str) -> bool {
        constant_time_eq(stored.as_bytes(), self.stored_form(presented).as_bytes())
    }
}

impl From<SecretStorageMode> for SecretStorage {
    fn from(mode: SecretStorageMode) -> Self {
        match mode {
            SecretStorageMode::Plain => SecretStorage::Plain,
            SecretStorageMode::Sha256 => SecretStorage::Sha256,
        }
    }
}
