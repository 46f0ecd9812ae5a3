// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin authentication.
//!
//! The admin password is hashed once at startup and never kept in plain
//! text. Every admin operation takes an [`AuthenticatedAdmin`], which can
//! only be obtained by presenting the password.

use rinkside_domain::SignupCode;
use tracing::warn;

use crate::error::ApiError;

/// Proof that the caller presented the admin password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    _private: (),
}

/// The bcrypt hash of the admin password.
#[derive(Clone)]
pub struct AdminSecret {
    password_hash: String,
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSecret").finish_non_exhaustive()
    }
}

impl AdminSecret {
    /// Hashes the admin password with the default bcrypt cost.
    ///
    /// # Errors
    ///
    /// Returns an error if the password is empty or hashing fails.
    pub fn new(password: &str) -> Result<Self, ApiError> {
        Self::with_cost(password, bcrypt::DEFAULT_COST)
    }

    /// Hashes the admin password with an explicit bcrypt cost.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain-text admin password
    /// * `cost` - The bcrypt cost factor
    ///
    /// # Errors
    ///
    /// Returns an error if the password is empty or hashing fails.
    pub fn with_cost(password: &str, cost: u32) -> Result<Self, ApiError> {
        if password.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("admin_password"),
                message: String::from("Admin password must not be empty"),
            });
        }

        let password_hash: String =
            bcrypt::hash(password, cost).map_err(|e| ApiError::Internal {
                message: format!("Failed to hash admin password: {e}"),
            })?;

        Ok(Self { password_hash })
    }

    /// Checks a submitted password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the password does not match.
    pub fn authenticate(&self, password: &str) -> Result<AuthenticatedAdmin, ApiError> {
        let valid: bool = bcrypt::verify(password, &self.password_hash).unwrap_or(false);
        if valid {
            Ok(AuthenticatedAdmin { _private: () })
        } else {
            warn!("Rejected admin password");
            Err(ApiError::AuthenticationFailed {
                reason: String::from("Invalid admin password"),
            })
        }
    }
}

/// Generates a random four-digit signup code for a fresh install.
#[must_use]
pub fn generate_signup_code() -> SignupCode {
    SignupCode::from_seed(rand::random::<u16>())
}
