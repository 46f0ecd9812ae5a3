// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod error;
mod types;
mod validation;
mod window;

#[cfg(test)]
mod tests;

pub use allocation::{Allocation, allocate, average_rating};
pub use error::DomainError;

// Re-export public types
pub use types::{
    Contact, DEFAULT_SPOTS, GameDetails, Group, HistorySummary, IsoWeek, MAX_GOALIES, MAX_SPOTS,
    OverrideState, Participant, ParticipantId, Rating, SignupCode, StructuralState, WaitlistEntry,
    WeekSnapshot,
};
pub use validation::{
    normalize_name, parse_game_date, validate_name, validate_payment_method, validate_spot_count,
    validate_unique_participant,
};
pub use window::{
    SCHEDULE_TIMEZONE, decide_structural_state, is_critical_lock_period, is_release_minute,
    is_reset_hour, iso_week, next_game_date,
};
