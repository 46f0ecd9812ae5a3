// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Contact, MAX_SPOTS, Participant, WaitlistEntry};
use chrono::NaiveDate;

/// Normalizes a name pair for duplicate detection.
///
/// The result is `"first last"`, trimmed and lowercased.
#[must_use]
pub fn normalize_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_lowercase()
}

/// Validates and trims a first or last name.
///
/// # Arguments
///
/// * `field` - Which field is being validated, used in the error message
/// * `value` - The raw value
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the trimmed value is empty.
pub fn validate_name(field: &str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Validates and trims a payment method.
///
/// # Errors
///
/// Returns `DomainError::InvalidPaymentMethod` if the trimmed value is empty.
pub fn validate_payment_method(value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidPaymentMethod);
    }
    Ok(trimmed.to_string())
}

/// Validates an administrator-supplied spot count.
///
/// # Errors
///
/// Returns `DomainError::InvalidSpotCount` unless `0 <= count <= MAX_SPOTS`.
pub fn validate_spot_count(count: i64) -> Result<u32, DomainError> {
    u32::try_from(count)
        .ok()
        .filter(|n| *n <= MAX_SPOTS)
        .ok_or(DomainError::InvalidSpotCount {
            count,
            max: MAX_SPOTS,
        })
}

/// Parses a game date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameDate` if the value does not parse.
pub fn parse_game_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| DomainError::InvalidGameDate(format!("'{}': {e}", value.trim())))
}

/// Validates that a new entry does not collide with anyone already on the
/// roster or the waitlist.
///
/// Two entries collide when their normalized names are equal or their
/// phone numbers contain the same digits.
///
/// # Arguments
///
/// * `first_name` - First name of the incoming entry
/// * `last_name` - Last name of the incoming entry
/// * `contact` - Phone number of the incoming entry
/// * `participants` - Current roster
/// * `waitlist` - Current waitlist
///
/// # Errors
///
/// Returns `DomainError::DuplicateParticipant` on a collision.
pub fn validate_unique_participant(
    first_name: &str,
    last_name: &str,
    contact: &Contact,
    participants: &[Participant],
    waitlist: &[WaitlistEntry],
) -> Result<(), DomainError> {
    let name: String = normalize_name(first_name, last_name);
    let digits: String = contact.normalized();

    let collides = |other_first: &str, other_last: &str, other_contact: &Contact| {
        normalize_name(other_first, other_last) == name || other_contact.normalized() == digits
    };

    let on_roster: bool = participants
        .iter()
        .any(|p| collides(&p.first_name, &p.last_name, &p.contact));
    let on_waitlist: bool = waitlist
        .iter()
        .any(|w| collides(&w.first_name, &w.last_name, &w.contact));

    if on_roster || on_waitlist {
        return Err(DomainError::DuplicateParticipant {
            name: format!("{} {}", first_name.trim(), last_name.trim()),
        });
    }

    Ok(())
}
