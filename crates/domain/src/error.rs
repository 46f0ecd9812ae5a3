// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A first or last name is empty or invalid.
    InvalidName(String),
    /// Contact phone number is not a 10-digit number.
    InvalidContact(String),
    /// Skill rating is outside `1..=10`.
    InvalidRating(i64),
    /// Payment method is empty.
    InvalidPaymentMethod,
    /// Signup code is not exactly four digits.
    InvalidSignupCode(String),
    /// Capacity value is outside the allowed range.
    InvalidSpotCount {
        /// The rejected value.
        count: i64,
        /// The maximum allowed value.
        max: u32,
    },
    /// Game date could not be parsed.
    InvalidGameDate(String),
    /// A participant or waitlist entry already uses this name or phone number.
    DuplicateParticipant {
        /// The full name of the incoming registration.
        name: String,
    },
    /// Both goalie spots are already taken.
    GoalieLimitReached {
        /// The configured maximum.
        max: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidContact(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidRating(rating) => {
                write!(f, "Rating must be a number between 1 and 10, got {rating}")
            }
            Self::InvalidPaymentMethod => write!(f, "Payment method is required"),
            Self::InvalidSignupCode(msg) => write!(f, "Invalid signup code: {msg}"),
            Self::InvalidSpotCount { count, max } => {
                write!(f, "Invalid spot count {count} (0-{max} allowed)")
            }
            Self::InvalidGameDate(msg) => write!(f, "Invalid game date: {msg}"),
            Self::DuplicateParticipant { name } => write!(
                f,
                "A player with the name '{name}' or the same phone number is already registered"
            ),
            Self::GoalieLimitReached { max } => {
                write!(f, "Goalie spots are full (maximum {max})")
            }
        }
    }
}

impl std::error::Error for DomainError {}
