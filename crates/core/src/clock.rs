// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time source for every lifecycle decision.
//!
//! Transitions never read the system clock themselves; callers pass the
//! instant obtained from a [`Clock`], which lets tests drive the calendar.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rinkside_domain::SCHEDULE_TIMEZONE;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Source of the current instant in the schedule timezone.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current wall-clock time in [`SCHEDULE_TIMEZONE`].
    fn now(&self) -> DateTime<Tz>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&SCHEDULE_TIMEZONE)
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Tz>>,
}

impl ManualClock {
    /// Creates a clock stopped at `start`.
    #[must_use]
    pub const fn new(start: DateTime<Tz>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Tz>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Tz> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
