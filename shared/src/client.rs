//! Token endpoint types shared between the client and its tests
//!
//! The platform issues bearer tokens through an OAuth2 password-grant
//! exchange; these are the two response shapes it produces.

use serde::{Deserialize, Serialize};

/// Token endpoint success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

/// Token endpoint error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}
