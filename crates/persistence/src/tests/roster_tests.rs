// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_state_with_players;
use crate::Persistence;
use rinkside::{RosterStore, SignupState};
use rinkside_domain::{Contact, Group, Participant, ParticipantId, Rating, WaitlistEntry};

fn persisted_roster(count: u32) -> (Persistence, SignupState) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let state: SignupState = create_state_with_players(count);
    // Insert out of order to check the listing order
    for participant in state.participants.iter().rev() {
        persistence.insert_participant(participant).unwrap();
    }
    (persistence, state)
}

#[test]
fn test_participants_listed_in_registration_order() {
    let (mut persistence, state) = persisted_roster(4);

    let listed: Vec<Participant> = persistence.list_participants().unwrap();

    assert_eq!(listed, state.participants);
}

#[test]
fn test_update_paid_and_group() {
    let (mut persistence, state) = persisted_roster(2);
    let id = state.participants[0].id;

    persistence.update_participant_paid(id, true).unwrap();
    persistence
        .update_participant_group(id, Some(Group::Dark))
        .unwrap();

    let listed: Vec<Participant> = persistence.list_participants().unwrap();
    assert!(listed[0].paid);
    assert_eq!(listed[0].group, Some(Group::Dark));
    assert!(!listed[1].paid);
    assert_eq!(listed[1].group, None);

    persistence.update_participant_group(id, None).unwrap();
    assert_eq!(persistence.list_participants().unwrap()[0].group, None);
}

#[test]
fn test_delete_participant() {
    let (mut persistence, state) = persisted_roster(3);

    persistence
        .delete_participant(state.participants[1].id)
        .unwrap();
    // Deleting again is not an error
    persistence
        .delete_participant(state.participants[1].id)
        .unwrap();

    assert_eq!(persistence.list_participants().unwrap().len(), 2);
}

#[test]
fn test_waitlist_round_trip_and_clear() {
    let (mut persistence, state) = persisted_roster(2);
    let entry: WaitlistEntry = WaitlistEntry {
        id: ParticipantId::new(state.participants[1].id.value() + 1),
        first_name: String::from("Late"),
        last_name: String::from("Comer"),
        contact: Contact::parse("2265550000").unwrap(),
        payment_method: String::from("E-Transfer"),
        rating: Rating::new(4).unwrap(),
        is_goalie: true,
        joined_at: state.participants[1].registered_at,
    };

    persistence.insert_waitlist_entry(&entry).unwrap();
    assert_eq!(persistence.list_waitlist().unwrap(), vec![entry.clone()]);

    persistence.clear_rosters().unwrap();
    assert!(persistence.list_participants().unwrap().is_empty());
    assert!(persistence.list_waitlist().unwrap().is_empty());

    persistence.insert_waitlist_entry(&entry).unwrap();
    persistence.delete_waitlist_entry(entry.id).unwrap();
    assert!(persistence.list_waitlist().unwrap().is_empty());
}
