// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    admin, create_goalie_request, create_open_service, create_test_service, eastern,
    register_many,
};
use crate::{
    AddPlayerRequest, AdminOverviewResponse, AdminPlayer, ApiError, AuthenticatedAdmin,
    GameDetailsInfo, GateStatusResponse, OverrideResponse, PromoteResponse, RegisterResponse,
    TeamsInfo, TogglePaidResponse, UpdateDetailsRequest,
};
use rinkside::RosterStore;
use rinkside_domain::{Group, OverrideState};

fn participant_id(response: &RegisterResponse) -> i64 {
    match response {
        RegisterResponse::Accepted { participant_id, .. } => *participant_id,
        RegisterResponse::Waitlisted { .. } => panic!("expected a roster spot"),
    }
}

fn entry_id(response: &RegisterResponse) -> i64 {
    match response {
        RegisterResponse::Waitlisted { entry_id, .. } => *entry_id,
        RegisterResponse::Accepted { .. } => panic!("expected a waitlist entry"),
    }
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let (service, _clock) = create_open_service().await;

    let result: Result<AuthenticatedAdmin, ApiError> = service.authenticate("puck");

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[tokio::test]
async fn test_overview_shows_code_and_contacts() {
    let (service, _clock) = create_open_service().await;
    register_many(&service, 2).await;

    let overview: AdminOverviewResponse = service.admin_overview(&admin(&service)).await;

    assert_eq!(overview.signup_code, "4821");
    assert_eq!(overview.participants.len(), 2);
    assert_eq!(overview.participants[0].contact, "(519) 555-0001");
    assert!(overview.teams.is_none());
}

#[tokio::test]
async fn test_release_now_requires_players() {
    let (service, _clock) = create_open_service().await;

    let result: Result<TeamsInfo, ApiError> = service.release_roster_now(&admin(&service)).await;

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "non_empty_roster"
    ));
}

#[tokio::test]
async fn test_release_now_publishes_teams_and_locks() {
    let (service, _clock) = create_open_service().await;
    register_many(&service, 5).await;

    let teams: TeamsInfo = service.release_roster_now(&admin(&service)).await.unwrap();

    assert_eq!(teams.white.len() + teams.dark.len(), 5);
    assert!(teams.white.len().abs_diff(teams.dark.len()) <= 1);
    let status: GateStatusResponse = service.gate_status().await;
    assert!(status.roster_released);
    assert!(status.require_code);
    assert_eq!(service.history_list().await.unwrap().weeks.len(), 1);
}

#[tokio::test]
async fn test_open_override_on_monday() {
    let (service, _clock) = create_test_service(eastern(19, 10, 0));
    service.run_scheduled_checks().await;
    let admin = admin(&service);

    let opened: OverrideResponse = service
        .set_override(&admin, OverrideState::Open)
        .await
        .unwrap();
    assert_eq!(opened.override_state, Some(OverrideState::Open));
    assert!(!opened.require_code);

    // Scheduled checks leave the override alone
    service.run_scheduled_checks().await;
    assert!(!service.gate_status().await.require_code);

    let cleared: OverrideResponse = service.clear_override(&admin).await.unwrap();
    assert_eq!(cleared.override_state, None);
    assert!(cleared.require_code);
}

#[tokio::test]
async fn test_toggle_code_flips_gate() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);

    let locked: OverrideResponse = service.toggle_code(&admin).await.unwrap();
    assert_eq!(locked.override_state, Some(OverrideState::Locked));
    assert!(locked.require_code);

    let opened: OverrideResponse = service.toggle_code(&admin).await.unwrap();
    assert_eq!(opened.override_state, Some(OverrideState::Open));
    assert!(!opened.require_code);
}

#[tokio::test]
async fn test_manual_reset_clears_week() {
    let (service, _clock) = create_open_service().await;
    register_many(&service, 3).await;

    service
        .force_weekly_reset_for_testing(&admin(&service))
        .await
        .unwrap();

    let status: GateStatusResponse = service.gate_status().await;
    assert_eq!(status.total_players, 0);
    assert_eq!(status.waitlist_count, 0);
    assert_eq!(status.spots_remaining, 20);
    assert!(status.require_code);
}

#[tokio::test]
async fn test_goalies_take_no_spot_and_are_limited() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);

    service
        .admin_add(&admin, create_goalie_request(1))
        .await
        .unwrap();
    service
        .admin_add(&admin, create_goalie_request(2))
        .await
        .unwrap();
    let third: Result<RegisterResponse, ApiError> =
        service.admin_add(&admin, create_goalie_request(3)).await;

    assert!(matches!(
        third,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "goalie_limit"
    ));
    let status: GateStatusResponse = service.gate_status().await;
    assert_eq!(status.goalie_count, 2);
    assert_eq!(status.spots_remaining, 20);

    let overview: AdminOverviewResponse = service.admin_overview(&admin).await;
    assert!(overview.participants.iter().all(|p| p.paid));
    assert!(overview.participants.iter().all(|p| p.payment_method == "Cash"));
}

#[tokio::test]
async fn test_promote_waitlist_over_capacity() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    service.update_spots(&admin, 1).await.unwrap();
    register_many(&service, 1).await;
    let waitlisted: RegisterResponse = service
        .register_participant(super::helpers::create_register_request(2))
        .await
        .unwrap();

    let promoted: PromoteResponse = service
        .promote_waitlist(&admin, entry_id(&waitlisted))
        .await
        .unwrap();

    assert!(promoted.over_capacity);
    assert_eq!(promoted.participant.id, entry_id(&waitlisted));
    assert!(!promoted.participant.rules_agreed);
    let status: GateStatusResponse = service.gate_status().await;
    assert_eq!(status.total_players, 2);
    assert_eq!(status.waitlist_count, 0);
    assert_eq!(status.spots_remaining, 0);
}

#[tokio::test]
async fn test_promote_waitlist_takes_free_spot() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    let mut request: AddPlayerRequest = create_goalie_request(1);
    request.is_goalie = false;
    request.to_waitlist = true;
    let waitlisted: RegisterResponse = service.admin_add(&admin, request).await.unwrap();

    let promoted: PromoteResponse = service
        .promote_waitlist(&admin, entry_id(&waitlisted))
        .await
        .unwrap();

    assert!(!promoted.over_capacity);
    assert_eq!(service.gate_status().await.spots_remaining, 19);
}

#[tokio::test]
async fn test_remove_waitlist_entry() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    let mut request: AddPlayerRequest = create_goalie_request(1);
    request.to_waitlist = true;
    let waitlisted: RegisterResponse = service.admin_add(&admin, request).await.unwrap();

    let removed = service
        .remove_waitlist(&admin, entry_id(&waitlisted))
        .await
        .unwrap();

    assert_eq!(removed.position, 1);
    assert!(removed.is_goalie);
    assert!(service.waitlist().await.entries.is_empty());
    assert!(matches!(
        service.remove_waitlist(&admin, entry_id(&waitlisted)).await,
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_remove_participant_frees_spot() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    let accepted: RegisterResponse = service
        .register_participant(super::helpers::create_register_request(1))
        .await
        .unwrap();
    assert_eq!(service.gate_status().await.spots_remaining, 19);

    let removed = service
        .remove_participant(&admin, participant_id(&accepted))
        .await
        .unwrap();

    assert_eq!(removed.first_name, "Player01");
    assert_eq!(service.gate_status().await.spots_remaining, 20);
    assert!(matches!(
        service.remove_participant(&admin, participant_id(&accepted)).await,
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[tokio::test]
async fn test_toggle_paid() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    let accepted: RegisterResponse = service
        .register_participant(super::helpers::create_register_request(1))
        .await
        .unwrap();
    let id: i64 = participant_id(&accepted);

    let first: TogglePaidResponse = service.toggle_paid(&admin, id).await.unwrap();
    let second: TogglePaidResponse = service.toggle_paid(&admin, id).await.unwrap();

    assert!(first.paid);
    assert!(!second.paid);
}

#[tokio::test]
async fn test_update_spots_range() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);

    assert_eq!(service.update_spots(&admin, 30).await.unwrap(), 30);
    assert!(matches!(
        service.update_spots(&admin, 31).await,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "spots"
    ));
    assert!(matches!(
        service.update_spots(&admin, -1).await,
        Err(ApiError::InvalidInput { .. })
    ));
    assert_eq!(service.gate_status().await.spots_remaining, 30);
}

#[tokio::test]
async fn test_update_signup_code() {
    let (service, _clock) = create_test_service(eastern(19, 10, 0));
    service.run_scheduled_checks().await;
    let admin = admin(&service);

    assert!(matches!(
        service.update_signup_code(&admin, "12a4").await,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "signup_code"
    ));
    service.update_signup_code(&admin, "7777").await.unwrap();

    assert!(service.verify_signup_code("7777").await);
    assert!(!service.verify_signup_code("4821").await);
}

#[tokio::test]
async fn test_update_game_details_ignores_blank_fields() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);

    let game: GameDetailsInfo = service
        .update_game_details(
            &admin,
            UpdateDetailsRequest {
                password: String::new(),
                location: Some(String::from("Capri Pizza Rec Complex")),
                time_label: Some(String::from("  ")),
                date: Some(String::from("2026-10-18")),
            },
        )
        .await
        .unwrap();

    assert_eq!(game.location, "Capri Pizza Rec Complex");
    assert_eq!(game.time_label, "Sunday 8:30 PM");
    assert_eq!(game.formatted_date, "Sunday, October 18, 2026");
}

#[tokio::test]
async fn test_update_game_details_rejects_bad_date() {
    let (service, _clock) = create_open_service().await;

    let result: Result<GameDetailsInfo, ApiError> = service
        .update_game_details(
            &admin(&service),
            UpdateDetailsRequest {
                password: String::new(),
                location: None,
                time_label: None,
                date: Some(String::from("18/10/2026")),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[tokio::test]
async fn test_delete_history() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    register_many(&service, 2).await;
    service.release_roster_now(&admin).await.unwrap();

    service.delete_history(&admin, 2026, 42).await.unwrap();

    assert!(service.history_list().await.unwrap().weeks.is_empty());
    assert!(matches!(
        service.delete_history(&admin, 2026, 42).await,
        Err(ApiError::ResourceNotFound { .. })
    ));
}

fn create_skater_request(index: u32) -> AddPlayerRequest {
    AddPlayerRequest {
        first_name: format!("Late{index:02}"),
        last_name: String::from("Skater"),
        contact: format!("289555{index:04}"),
        is_goalie: false,
        ..create_goalie_request(index)
    }
}

#[tokio::test]
async fn test_admin_add_reports_unsaved_write_and_replays_it() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    service.store().await.set_fail_writes(true);

    let result: Result<RegisterResponse, ApiError> =
        service.admin_add(&admin, create_skater_request(1)).await;

    assert!(matches!(result, Err(ApiError::Internal { .. })));
    assert_eq!(service.gate_status().await.total_players, 1);

    service.store().await.set_fail_writes(false);
    let report = service.run_scheduled_checks().await;

    assert_eq!(report.failed_writes, 0);
    let stored = service.store().await.list_participants().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].first_name, "Late01");
    let settings = service.store().await.settings().cloned().unwrap();
    assert_eq!(settings.spots_remaining, 19);
}

#[tokio::test]
async fn test_queued_writes_replay_in_order() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    service.store().await.set_fail_writes(true);

    let _ = service.admin_add(&admin, create_skater_request(1)).await;
    let id: i64 = service.admin_overview(&admin).await.participants[0].id;
    let removed: Result<AdminPlayer, ApiError> = service.remove_participant(&admin, id).await;
    assert!(matches!(removed, Err(ApiError::Internal { .. })));

    service.store().await.set_fail_writes(false);
    service.run_scheduled_checks().await;

    // The insert is replayed before the delete, so nothing comes back
    assert!(service.store().await.list_participants().unwrap().is_empty());
    assert_eq!(service.gate_status().await.total_players, 0);
}

#[tokio::test]
async fn test_admin_actions_succeed_once_store_recovers() {
    let (service, _clock) = create_open_service().await;
    let admin = admin(&service);
    service.store().await.set_fail_writes(true);
    assert!(service.toggle_code(&admin).await.is_err());

    service.store().await.set_fail_writes(false);
    let toggled: OverrideResponse = service.toggle_code(&admin).await.unwrap();

    assert_eq!(toggled.override_state, Some(OverrideState::Open));
    let settings = service.store().await.settings().cloned().unwrap();
    assert_eq!(settings.override_state, Some(OverrideState::Open));
}

#[tokio::test]
async fn test_reset_keeps_teams_archived_at_release() {
    let (service, clock) = create_open_service().await;
    register_many(&service, 4).await;
    let admin = admin(&service);
    let released: TeamsInfo = service.release_roster_now(&admin).await.unwrap();

    let white_id: i64 = service
        .admin_overview(&admin)
        .await
        .participants
        .iter()
        .find(|p| p.group == Some(Group::White))
        .map(|p| p.id)
        .unwrap();
    service.remove_participant(&admin, white_id).await.unwrap();

    clock.set(eastern(19, 0, 0));
    assert!(service.run_scheduled_checks().await.reset);

    let archived: TeamsInfo = service.history_week(2026, 42).await.unwrap();
    assert_eq!(archived, released);
}
