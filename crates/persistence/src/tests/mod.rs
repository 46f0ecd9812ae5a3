// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod roster_tests;

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use rinkside::{NewRegistration, SignupDefaults, SignupState, register_participant};
use rinkside_domain::{SCHEDULE_TIMEZONE, SignupCode};

/// An instant in October 2026, Eastern time. Sunday is the 18th.
pub fn eastern(day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    SCHEDULE_TIMEZONE
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn create_test_defaults() -> SignupDefaults {
    SignupDefaults::new(
        20,
        SignupCode::parse("4821").unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
    )
}

/// An open state with `count` registered skaters.
pub fn create_state_with_players(count: u32) -> SignupState {
    let mut state: SignupState = SignupState::new(&create_test_defaults());
    state.gate.require_code = false;
    for index in 1..=count {
        register_participant(
            &mut state,
            &eastern(15, 19, 0),
            NewRegistration {
                first_name: format!("Player{index:02}"),
                last_name: String::from("Skater"),
                contact: format!("519555{index:04}"),
                payment_method: String::from("Cash"),
                rating: i64::from(index % 10 + 1),
                rules_agreed: true,
                signup_code: None,
            },
        )
        .unwrap();
    }
    state
}
