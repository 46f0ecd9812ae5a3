// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use rinkside::{ManualClock, MemoryStore, SignupDefaults};
use rinkside_domain::{DEFAULT_SPOTS, SCHEDULE_TIMEZONE, SignupCode};

use crate::{
    AddPlayerRequest, AdminSecret, AuthenticatedAdmin, RegisterRequest, SignupService,
};

pub const TEST_CODE: &str = "4821";
pub const TEST_PASSWORD: &str = "zamboni";

/// An instant in October 2026, Eastern time.
///
/// Wed 14, Thu 15, Sun 18 (ISO week 42), Mon 19 (week 43).
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

pub fn create_test_secret() -> AdminSecret {
    AdminSecret::with_cost(TEST_PASSWORD, 4).unwrap()
}

/// Builds a service on an empty memory store with the clock at `now`.
pub fn create_test_service(now: DateTime<Tz>) -> (SignupService<MemoryStore>, Arc<ManualClock>) {
    let clock: Arc<ManualClock> = Arc::new(ManualClock::new(now));
    let service: SignupService<MemoryStore> = SignupService::load(
        MemoryStore::new(),
        clock.clone(),
        create_test_defaults(),
        create_test_secret(),
    )
    .unwrap();
    (service, clock)
}

/// A service whose gate has been opened by a scheduled check on Thursday evening.
pub async fn create_open_service() -> (SignupService<MemoryStore>, Arc<ManualClock>) {
    let (service, clock) = create_test_service(eastern(15, 19, 0));
    service.run_scheduled_checks().await;
    (service, clock)
}

pub fn admin(service: &SignupService<MemoryStore>) -> AuthenticatedAdmin {
    service.authenticate(TEST_PASSWORD).unwrap()
}

pub fn create_register_request(index: u32) -> RegisterRequest {
    RegisterRequest {
        first_name: format!("Player{index:02}"),
        last_name: String::from("Skater"),
        contact: format!("519555{index:04}"),
        payment_method: String::from("E-Transfer"),
        rating: i64::from(index % 10 + 1),
        rules_agreed: true,
        signup_code: None,
    }
}

pub fn create_goalie_request(index: u32) -> AddPlayerRequest {
    AddPlayerRequest {
        password: String::from(TEST_PASSWORD),
        first_name: format!("Goalie{index:02}"),
        last_name: String::from("Keeper"),
        contact: format!("226555{index:04}"),
        payment_method: None,
        rating: 6,
        is_goalie: true,
        to_waitlist: false,
    }
}

pub async fn register_many(service: &SignupService<MemoryStore>, count: u32) {
    for index in 1..=count {
        service
            .register_participant(create_register_request(index))
            .await
            .unwrap();
    }
}
