// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TEST_CODE, create_open_state, create_registration, create_test_state, eastern, fill_roster,
};
use crate::{
    AdminAddRequest, CoreError, DEFAULT_ADMIN_PAYMENT_METHOD, Effect, GameDetailsUpdate,
    NewRegistration, Promotion, RegistrationOutcome, SignupState, Transition, admin_add,
    promote_waitlist, register_participant, remove_participant, remove_waitlist, toggle_paid,
    update_game_details, update_signup_code, update_spots, verify_signup_code,
};
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use rinkside_domain::{DomainError, MAX_GOALIES, ParticipantId};

fn thursday() -> DateTime<Tz> {
    eastern(15, 19, 0)
}

fn create_admin_add(first_name: &str, phone: &str, is_goalie: bool) -> AdminAddRequest {
    AdminAddRequest {
        first_name: first_name.to_string(),
        last_name: String::from("Added"),
        contact: phone.to_string(),
        payment_method: None,
        rating: 6,
        is_goalie,
        to_waitlist: false,
    }
}

fn waitlist_one(state: &mut SignupState) -> ParticipantId {
    state.spots_remaining = 0;
    let (outcome, _) =
        register_participant(state, &thursday(), create_registration(90)).unwrap();
    match outcome {
        RegistrationOutcome::Waitlisted { entry, .. } => entry.id,
        RegistrationOutcome::Accepted { .. } => panic!("expected waitlist"),
    }
}

#[test]
fn test_locked_gate_requires_code() {
    let mut state: SignupState = create_test_state();

    let result = register_participant(&mut state, &thursday(), create_registration(1));

    assert_eq!(result, Err(CoreError::SignupCodeRequired));
    assert!(state.participants.is_empty());
}

#[test]
fn test_locked_gate_rejects_wrong_code() {
    let mut state: SignupState = create_test_state();
    let mut registration: NewRegistration = create_registration(1);
    registration.signup_code = Some(String::from("0000"));

    let result = register_participant(&mut state, &thursday(), registration);

    assert_eq!(result, Err(CoreError::SignupCodeRequired));
}

#[test]
fn test_locked_gate_accepts_correct_code() {
    let mut state: SignupState = create_test_state();
    let mut registration: NewRegistration = create_registration(1);
    registration.signup_code = Some(String::from(TEST_CODE));

    let (outcome, _) = register_participant(&mut state, &thursday(), registration).unwrap();

    assert!(matches!(outcome, RegistrationOutcome::Accepted { .. }));
}

#[test]
fn test_open_gate_registration_takes_a_spot() {
    let mut state: SignupState = create_open_state();

    let (outcome, transition) =
        register_participant(&mut state, &thursday(), create_registration(1)).unwrap();

    let RegistrationOutcome::Accepted { participant } = outcome else {
        panic!("expected acceptance");
    };
    assert_eq!(participant.contact.value(), "(519) 555-0001");
    assert!(!participant.is_goalie);
    assert!(!participant.paid);
    assert_eq!(state.spots_remaining, 19);
    assert!(matches!(
        transition.effects.as_slice(),
        [Effect::InsertParticipant(_), Effect::SaveSettings(_)]
    ));
}

#[test]
fn test_twenty_first_registration_is_waitlisted() {
    let mut state: SignupState = create_open_state();
    fill_roster(&mut state, 20);
    assert_eq!(state.spots_remaining, 0);

    let (outcome, transition) =
        register_participant(&mut state, &thursday(), create_registration(21)).unwrap();

    assert!(matches!(
        outcome,
        RegistrationOutcome::Waitlisted { position: 1, .. }
    ));
    assert_eq!(state.participants.len(), 20);
    assert_eq!(state.waitlist.len(), 1);
    assert!(matches!(
        transition.effects.as_slice(),
        [Effect::InsertWaitlistEntry(_)]
    ));
}

#[test]
fn test_rules_must_be_accepted_for_a_spot() {
    let mut state: SignupState = create_open_state();
    let mut registration: NewRegistration = create_registration(1);
    registration.rules_agreed = false;

    let result = register_participant(&mut state, &thursday(), registration);

    assert_eq!(result, Err(CoreError::RulesNotAccepted));
    assert_eq!(state.spots_remaining, 20);
}

#[test]
fn test_invalid_fields_leave_state_untouched() {
    let mut state: SignupState = create_open_state();
    let before: SignupState = state.clone();

    let mut bad_phone: NewRegistration = create_registration(1);
    bad_phone.contact = String::from("555-1234");
    assert!(matches!(
        register_participant(&mut state, &thursday(), bad_phone),
        Err(CoreError::DomainViolation(DomainError::InvalidContact(_)))
    ));

    let mut bad_rating: NewRegistration = create_registration(1);
    bad_rating.rating = 11;
    assert!(matches!(
        register_participant(&mut state, &thursday(), bad_rating),
        Err(CoreError::DomainViolation(DomainError::InvalidRating(11)))
    ));

    let mut blank_name: NewRegistration = create_registration(1);
    blank_name.first_name = String::from("  ");
    assert!(matches!(
        register_participant(&mut state, &thursday(), blank_name),
        Err(CoreError::DomainViolation(DomainError::InvalidName(_)))
    ));

    assert_eq!(state, before);
}

#[test]
fn test_duplicate_detected_across_roster_and_waitlist() {
    let mut state: SignupState = create_open_state();
    fill_roster(&mut state, 1);
    waitlist_one(&mut state);

    let mut same_phone: NewRegistration = create_registration(2);
    same_phone.contact = String::from("(519) 555-0001");
    assert!(matches!(
        register_participant(&mut state, &thursday(), same_phone),
        Err(CoreError::DomainViolation(
            DomainError::DuplicateParticipant { .. }
        ))
    ));

    let mut same_name: NewRegistration = create_registration(3);
    same_name.first_name = String::from("PLAYER90");
    assert!(matches!(
        register_participant(&mut state, &thursday(), same_name),
        Err(CoreError::DomainViolation(
            DomainError::DuplicateParticipant { .. }
        ))
    ));
}

#[test]
fn test_ids_increase_even_within_the_same_millisecond() {
    let mut state: SignupState = create_open_state();
    fill_roster(&mut state, 3);

    let ids: Vec<i64> = state.participants.iter().map(|p| p.id.value()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_admin_add_goalie_is_paid_and_takes_no_spot() {
    let mut state: SignupState = create_open_state();

    let (outcome, transition) = admin_add(
        &mut state,
        &thursday(),
        create_admin_add("Goalie", "2265550001", true),
    )
    .unwrap();

    let RegistrationOutcome::Accepted { participant } = outcome else {
        panic!("expected acceptance");
    };
    assert!(participant.is_goalie);
    assert!(participant.paid);
    assert_eq!(participant.payment_method, DEFAULT_ADMIN_PAYMENT_METHOD);
    assert_eq!(state.spots_remaining, 20);
    assert!(matches!(
        transition.effects.as_slice(),
        [Effect::InsertParticipant(_)]
    ));
}

#[test]
fn test_admin_add_enforces_goalie_limit() {
    let mut state: SignupState = create_open_state();
    admin_add(&mut state, &thursday(), create_admin_add("One", "2265550001", true)).unwrap();
    admin_add(&mut state, &thursday(), create_admin_add("Two", "2265550002", true)).unwrap();

    let result = admin_add(
        &mut state,
        &thursday(),
        create_admin_add("Three", "2265550003", true),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::GoalieLimitReached {
            max: MAX_GOALIES
        }))
    );
    assert_eq!(state.goalie_count(), 2);
}

#[test]
fn test_admin_add_skater_can_exceed_capacity() {
    let mut state: SignupState = create_open_state();
    state.spots_remaining = 0;

    let (outcome, _) = admin_add(
        &mut state,
        &thursday(),
        create_admin_add("Extra", "2265550009", false),
    )
    .unwrap();

    assert!(matches!(outcome, RegistrationOutcome::Accepted { .. }));
    assert_eq!(state.spots_remaining, 0);
    assert_eq!(state.participants.len(), 1);
}

#[test]
fn test_removing_over_capacity_skater_frees_no_spot() {
    let mut state: SignupState = create_open_state();
    state.spots_remaining = 0;
    let (outcome, _) = admin_add(
        &mut state,
        &thursday(),
        create_admin_add("Extra", "2265550009", false),
    )
    .unwrap();
    let RegistrationOutcome::Accepted { participant } = outcome else {
        panic!("expected acceptance");
    };
    assert_eq!(state.over_capacity, 1);

    remove_participant(&mut state, participant.id).unwrap();

    assert_eq!(state.spots_remaining, 0);
    assert_eq!(state.over_capacity, 0);
    assert_eq!(state.to_settings().over_capacity, 0);
}

#[test]
fn test_removing_skater_after_over_capacity_is_cleared_frees_a_spot() {
    let mut state: SignupState = create_open_state();
    fill_roster(&mut state, 1);
    state.spots_remaining = 0;
    admin_add(
        &mut state,
        &thursday(),
        create_admin_add("Extra", "2265550009", false),
    )
    .unwrap();
    let first: ParticipantId = state.participants[0].id;
    let extra: ParticipantId = state.participants[1].id;

    remove_participant(&mut state, extra).unwrap();
    remove_participant(&mut state, first).unwrap();

    assert_eq!(state.spots_remaining, 1);
    assert_eq!(state.over_capacity, 0);
}

#[test]
fn test_admin_add_to_waitlist() {
    let mut state: SignupState = create_open_state();
    let mut request: AdminAddRequest = create_admin_add("Later", "2265550010", false);
    request.to_waitlist = true;

    let (outcome, _) = admin_add(&mut state, &thursday(), request).unwrap();

    assert!(matches!(
        outcome,
        RegistrationOutcome::Waitlisted { position: 1, .. }
    ));
    assert_eq!(state.spots_remaining, 20);
}

#[test]
fn test_promote_consumes_a_spot() {
    let mut state: SignupState = create_open_state();
    let id: ParticipantId = waitlist_one(&mut state);
    state.spots_remaining = 2;

    let (promotion, transition) = promote_waitlist(&mut state, &thursday(), id).unwrap();

    assert_eq!(
        promotion,
        Promotion {
            participant: state.participants[0].clone(),
            over_capacity: false,
        }
    );
    assert_eq!(promotion.participant.id, id);
    assert_eq!(state.spots_remaining, 1);
    assert!(state.waitlist.is_empty());
    assert!(matches!(
        transition.effects.as_slice(),
        [
            Effect::DeleteWaitlistEntry(_),
            Effect::InsertParticipant(_),
            Effect::SaveSettings(_)
        ]
    ));
}

#[test]
fn test_promote_without_spot_reports_over_capacity() {
    let mut state: SignupState = create_open_state();
    let id: ParticipantId = waitlist_one(&mut state);

    let (promotion, _) = promote_waitlist(&mut state, &thursday(), id).unwrap();

    assert!(promotion.over_capacity);
    assert_eq!(state.spots_remaining, 0);
    assert_eq!(state.over_capacity, 1);
}

#[test]
fn test_promoted_goalie_starts_unpaid() {
    let mut state: SignupState = create_open_state();
    let mut request: AdminAddRequest = create_admin_add("Waiting", "2265550011", true);
    request.to_waitlist = true;
    let (outcome, _) = admin_add(&mut state, &thursday(), request).unwrap();
    let RegistrationOutcome::Waitlisted { entry, .. } = outcome else {
        panic!("expected a waitlist entry");
    };

    let (promotion, _) = promote_waitlist(&mut state, &thursday(), entry.id).unwrap();

    assert!(promotion.participant.is_goalie);
    assert!(!promotion.participant.paid);
    assert!(!promotion.over_capacity);
    assert_eq!(state.spots_remaining, 20);
}

#[test]
fn test_promote_unknown_entry() {
    let mut state: SignupState = create_open_state();
    let missing: ParticipantId = ParticipantId::new(42);

    assert_eq!(
        promote_waitlist(&mut state, &thursday(), missing),
        Err(CoreError::WaitlistEntryNotFound(missing))
    );
}

#[test]
fn test_remove_waitlist_entry() {
    let mut state: SignupState = create_open_state();
    let id: ParticipantId = waitlist_one(&mut state);

    let (entry, _) = remove_waitlist(&mut state, id).unwrap();

    assert_eq!(entry.id, id);
    assert!(state.waitlist.is_empty());
    assert_eq!(
        remove_waitlist(&mut state, id),
        Err(CoreError::WaitlistEntryNotFound(id))
    );
}

#[test]
fn test_removing_skater_frees_a_spot() {
    let mut state: SignupState = create_open_state();
    fill_roster(&mut state, 2);
    let id: ParticipantId = state.participants[0].id;

    remove_participant(&mut state, id).unwrap();

    assert_eq!(state.spots_remaining, 19);
    assert_eq!(state.participants.len(), 1);
}

#[test]
fn test_removing_goalie_does_not_free_a_spot() {
    let mut state: SignupState = create_open_state();
    admin_add(&mut state, &thursday(), create_admin_add("Goalie", "2265550001", true)).unwrap();
    let id: ParticipantId = state.participants[0].id;

    let (_, transition) = remove_participant(&mut state, id).unwrap();

    assert_eq!(state.spots_remaining, 20);
    assert!(matches!(
        transition.effects.as_slice(),
        [Effect::DeleteParticipant(_)]
    ));
}

#[test]
fn test_toggle_paid_flips() {
    let mut state: SignupState = create_open_state();
    fill_roster(&mut state, 1);
    let id: ParticipantId = state.participants[0].id;

    let (paid, transition) = toggle_paid(&mut state, id).unwrap();
    assert!(paid);
    assert_eq!(
        transition.effects,
        vec![Effect::UpdatePaid { id, paid: true }]
    );

    let (paid, _) = toggle_paid(&mut state, id).unwrap();
    assert!(!paid);
}

#[test]
fn test_update_spots_bounds() {
    let mut state: SignupState = create_open_state();

    state.over_capacity = 2;
    update_spots(&mut state, 30).unwrap();
    assert_eq!(state.spots_remaining, 30);
    assert_eq!(state.over_capacity, 0);

    assert!(update_spots(&mut state, 31).is_err());
    assert!(update_spots(&mut state, -1).is_err());
    assert_eq!(state.spots_remaining, 30);
}

#[test]
fn test_update_signup_code() {
    let mut state: SignupState = create_test_state();

    update_signup_code(&mut state, "9876").unwrap();
    assert!(verify_signup_code(&state, "9876"));
    assert!(!verify_signup_code(&state, TEST_CODE));

    assert!(update_signup_code(&mut state, "98a6").is_err());
    assert_eq!(state.signup_code.value(), "9876");
}

#[test]
fn test_verify_code_always_true_when_open() {
    let state: SignupState = create_open_state();
    assert!(verify_signup_code(&state, "nope"));
}

#[test]
fn test_update_game_details_ignores_blank_fields() {
    let mut state: SignupState = create_test_state();
    let location_before: String = state.game.location.clone();

    let transition: Transition = update_game_details(
        &mut state,
        GameDetailsUpdate {
            location: Some(String::from("  ")),
            time_label: Some(String::from("Sunday 9:00 PM")),
            date: Some(String::from("2026-11-01")),
        },
    )
    .unwrap();

    assert!(transition.applied);
    assert_eq!(state.game.location, location_before);
    assert_eq!(state.game.time_label, "Sunday 9:00 PM");
    assert_eq!(
        state.game.date,
        Some(NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())
    );
}

#[test]
fn test_update_game_details_rejects_bad_date() {
    let mut state: SignupState = create_test_state();
    let before: SignupState = state.clone();

    let result = update_game_details(
        &mut state,
        GameDetailsUpdate {
            location: Some(String::from("New Rink")),
            time_label: None,
            date: Some(String::from("next week")),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidGameDate(_)))
    ));
    assert_eq!(state, before);
}
