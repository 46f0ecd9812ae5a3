// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly signup window calendar.
//!
//! All decisions are made on wall-clock time in [`SCHEDULE_TIMEZONE`].
//!
//! ## Weekly Calendar
//!
//! ```text
//! Mon 00:00 ─ Wed 18:00   LOCKED   (weekly reset fires in the Monday 00:00 hour)
//! Wed 18:00 ─ Sun 12:00   OPEN
//! Sun 12:00               roster release
//! Sun 12:00 ─ Mon 00:00   LOCKED once the roster is released (critical lock period)
//! ```
//!
//! ## Invariants
//!
//! - Every function here is pure; the caller supplies the instant
//! - A released roster keeps Sunday afternoon locked

use crate::types::{IsoWeek, StructuralState};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Weekday};
use chrono_tz::Tz;

/// The civil timezone every schedule decision is made in.
pub const SCHEDULE_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Hour on Wednesday at which signup opens.
const OPEN_HOUR_WEDNESDAY: u32 = 18;

/// Hour on Sunday at which the roster is released.
const RELEASE_HOUR_SUNDAY: u32 = 12;

/// Decides whether the calendar alone places `now` inside or outside the
/// signup window.
///
/// # Arguments
///
/// * `now` - The current instant in the schedule timezone
/// * `roster_released` - Whether this week's teams are already published
///
/// # Returns
///
/// - `Locked` Monday, Tuesday, and Wednesday before 18:00
/// - `Locked` Sunday from 12:00 if the roster has been released
/// - `Open` otherwise
#[must_use]
pub fn decide_structural_state(now: &DateTime<Tz>, roster_released: bool) -> StructuralState {
    let hour = now.hour();
    match now.weekday() {
        Weekday::Mon | Weekday::Tue => StructuralState::Locked,
        Weekday::Wed if hour < OPEN_HOUR_WEDNESDAY => StructuralState::Locked,
        Weekday::Sun if roster_released && hour >= RELEASE_HOUR_SUNDAY => {
            StructuralState::Locked
        }
        _ => StructuralState::Open,
    }
}

/// Returns `true` inside `[Sunday 12:00, Monday 00:00)`.
#[must_use]
pub fn is_critical_lock_period(now: &DateTime<Tz>) -> bool {
    now.weekday() == Weekday::Sun && now.hour() >= RELEASE_HOUR_SUNDAY
}

/// Returns `true` during the minute the roster is released automatically
/// (Sunday 12:00:00 through 12:00:59).
#[must_use]
pub fn is_release_minute(now: &DateTime<Tz>) -> bool {
    now.weekday() == Weekday::Sun && now.hour() == RELEASE_HOUR_SUNDAY && now.minute() == 0
}

/// Returns `true` during the hour the weekly reset may fire (Monday 00:xx).
#[must_use]
pub fn is_reset_hour(now: &DateTime<Tz>) -> bool {
    now.weekday() == Weekday::Mon && now.hour() == 0
}

/// Returns the ISO-8601 week of the civil date of `now`.
#[must_use]
pub fn iso_week(now: &DateTime<Tz>) -> IsoWeek {
    let week = now.iso_week();
    IsoWeek::new(week.year(), week.week())
}

/// Returns `today` if it is a Sunday, otherwise the following Sunday.
#[must_use]
pub fn next_game_date(today: NaiveDate) -> NaiveDate {
    let days_until_sunday = (7 - today.weekday().num_days_from_sunday()) % 7;
    today + Duration::days(i64::from(days_until_sunday))
}
