//! Request DTOs for the burger ordering API.
//!
//! # Design
//! Every declared field is always serialized, empty strings and empty lists
//! included. A "missing" field is expressed by constructing the DTO with an
//! empty value, which the service rejects with a validation error. Response
//! bodies are not modelled; callers assert on `serde_json::Value`.

use serde::{Deserialize, Serialize};

/// A user account as sent to register and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    /// Login credentials for this user.
    pub fn credentials(&self) -> UserCredentials {
        UserCredentials::new(&self.email, &self.password)
    }
}

/// Email/password pair used for login and password reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

impl UserCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// An order is an ordered list of ingredient ids. The list may be empty or
/// hold ids the service does not know.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub ingredients: Vec<String>,
}

impl Order {
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of the logout call; `token` is the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutRequest {
    pub token: String,
}

/// Body of the token refresh call; `token` is the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshTokenRequest {
    pub token: String,
}

/// Confirms a password reset with the code the service mailed out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordReset {
    pub password: String,
    pub token: String,
}
