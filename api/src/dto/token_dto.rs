use auth_core::domain::entities::token::TokenPair;
use serde::{Deserialize, Serialize};

/// Query string of `POST /token`
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    /// Account the pair is issued for; checked by the handler
    pub guid: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// A freshly issued or rotated pair
#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
        }
    }
}
