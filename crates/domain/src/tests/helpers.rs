// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Contact, Participant, ParticipantId, Rating, WaitlistEntry};
use chrono::{DateTime, TimeZone, Utc};

pub fn registered_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 22, 30, 0).unwrap()
}

pub fn create_participant(
    id: i64,
    first_name: &str,
    last_name: &str,
    rating: i64,
    is_goalie: bool,
) -> Participant {
    Participant {
        id: ParticipantId::new(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        contact: Contact::parse(&format!("519555{id:04}")).unwrap(),
        payment_method: String::from("Cash"),
        rating: Rating::new(rating).unwrap(),
        is_goalie,
        group: None,
        paid: is_goalie,
        registered_at: registered_at(),
        rules_agreed: true,
    }
}

pub fn create_waitlist_entry(id: i64, first_name: &str, last_name: &str) -> WaitlistEntry {
    WaitlistEntry {
        id: ParticipantId::new(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        contact: Contact::parse(&format!("226555{id:04}")).unwrap(),
        payment_method: String::from("E-Transfer"),
        rating: Rating::new(5).unwrap(),
        is_goalie: false,
        joined_at: registered_at(),
    }
}

pub fn names(team: &[Participant]) -> Vec<String> {
    team.iter().map(Participant::full_name).collect()
}
