// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    NewRegistration, RegistrationOutcome, SignupDefaults, SignupState, register_participant,
};
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use rinkside_domain::{DEFAULT_SPOTS, SCHEDULE_TIMEZONE, SignupCode};

pub const TEST_CODE: &str = "4821";

/// An instant in October 2026, Eastern time.
///
/// Wed 14, Thu 15, Fri 16, Sat 17, Sun 18 (ISO week 42), Mon 19 (week 43).
pub fn eastern(day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    SCHEDULE_TIMEZONE
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn create_test_defaults() -> SignupDefaults {
    SignupDefaults::new(
        DEFAULT_SPOTS,
        SignupCode::parse(TEST_CODE).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
    )
}

pub fn create_test_state() -> SignupState {
    SignupState::new(&create_test_defaults())
}

/// A state whose gate is open, as on a Thursday evening.
pub fn create_open_state() -> SignupState {
    let mut state: SignupState = create_test_state();
    state.gate.require_code = false;
    state
}

pub fn create_registration(index: u32) -> NewRegistration {
    NewRegistration {
        first_name: format!("Player{index:02}"),
        last_name: String::from("Skater"),
        contact: format!("519555{index:04}"),
        payment_method: String::from("E-Transfer"),
        rating: i64::from(index % 10 + 1),
        rules_agreed: true,
        signup_code: None,
    }
}

/// Registers `count` skaters, supplying the code in case the gate is locked.
pub fn fill_roster(state: &mut SignupState, count: u32) {
    let now: DateTime<Tz> = eastern(15, 19, 0);
    for index in 1..=count {
        let mut registration: NewRegistration = create_registration(index);
        registration.signup_code = Some(String::from(TEST_CODE));
        let (outcome, _) = register_participant(state, &now, registration).unwrap();
        assert!(matches!(outcome, RegistrationOutcome::Accepted { .. }));
    }
}
