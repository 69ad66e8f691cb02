//! Types for authentication and account management

use serde::{Deserialize, Serialize};

/// Sign-in credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// The username
    pub username: String,

    /// The password
    pub password: String,
}

/// The token pair issued by the API.
///
/// Both tokens are opaque to the client; they are stored and replayed,
/// never decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// The access token
    pub access: String,

    /// The refresh token
    pub refresh: String,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    /// The username
    pub username: String,

    /// The email address
    pub email: String,

    /// The password
    pub password: String,

    /// The password, repeated
    pub password2: String,
}

/// Public account data echoed by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountInfo {
    /// The account id
    pub id: i64,

    /// The username
    pub username: String,

    /// The email address
    #[serde(default)]
    pub email: String,
}

/// Registration response: the created account plus a ready-to-use
/// token pair
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredAccount {
    /// The created account
    pub user: AccountInfo,

    /// The access token
    pub access: String,

    /// The refresh token
    pub refresh: String,
}
