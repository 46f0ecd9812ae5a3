// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API-specific error types.

use rinkside::CoreError;
use rinkside_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain and core errors and represent the API
/// contract. Lower-layer errors are translated explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The admin password or signup code was not accepted.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of why the input was invalid.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SignupCodeRequired => ApiError::AuthenticationFailed {
            reason: String::from("Signup is locked; a valid signup code is required"),
        },
        CoreError::RulesNotAccepted => ApiError::DomainRuleViolation {
            rule: String::from("rules_agreed"),
            message: err.to_string(),
        },
        CoreError::ParticipantNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Player"),
            message: format!("No player with id {id} is on the roster"),
        },
        CoreError::WaitlistEntryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Waitlist entry"),
            message: format!("No waitlist entry with id {id}"),
        },
        CoreError::NoParticipants => ApiError::DomainRuleViolation {
            rule: String::from("non_empty_roster"),
            message: String::from("Cannot release a roster with no registered players"),
        },
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidContact(msg) => ApiError::InvalidInput {
            field: String::from("contact"),
            message: msg,
        },
        DomainError::InvalidRating(rating) => ApiError::InvalidInput {
            field: String::from("rating"),
            message: format!("Rating {rating} must be between 1 and 10"),
        },
        DomainError::InvalidPaymentMethod => ApiError::InvalidInput {
            field: String::from("payment_method"),
            message: String::from("A payment method is required"),
        },
        DomainError::InvalidSignupCode(msg) => ApiError::InvalidInput {
            field: String::from("signup_code"),
            message: msg,
        },
        DomainError::InvalidSpotCount { count, max } => ApiError::InvalidInput {
            field: String::from("spots"),
            message: format!("Spot count {count} must be between 0 and {max}"),
        },
        DomainError::InvalidGameDate(msg) => ApiError::InvalidInput {
            field: String::from("date"),
            message: msg,
        },
        DomainError::DuplicateParticipant { name } => ApiError::DomainRuleViolation {
            rule: String::from("unique_participant"),
            message: format!("{name} is already registered or on the waitlist"),
        },
        DomainError::GoalieLimitReached { max } => ApiError::DomainRuleViolation {
            rule: String::from("goalie_limit"),
            message: format!("Both goalie spots are taken (maximum {max})"),
        },
    }
}
