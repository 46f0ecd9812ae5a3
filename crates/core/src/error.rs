// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rinkside_domain::{DomainError, ParticipantId};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Signup is locked and no valid code was supplied.
    SignupCodeRequired,
    /// The registrant did not accept the game rules.
    RulesNotAccepted,
    /// No participant with this id is on the roster.
    ParticipantNotFound(ParticipantId),
    /// No waitlist entry with this id exists.
    WaitlistEntryNotFound(ParticipantId),
    /// A roster cannot be released with nobody registered.
    NoParticipants,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SignupCodeRequired => write!(f, "A valid signup code is required"),
            Self::RulesNotAccepted => write!(f, "You must agree to the game rules"),
            Self::ParticipantNotFound(id) => write!(f, "Player {id} not found"),
            Self::WaitlistEntryNotFound(id) => write!(f, "Waitlist entry {id} not found"),
            Self::NoParticipants => write!(f, "No players registered"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
