// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weekly lifecycle transitions.
//!
//! Each function takes the exclusively-held [`SignupState`] and the current
//! instant, computes the next [`GateState`] in full, commits it with a single
//! assignment, and returns the store writes as a [`Transition`].
//!
//! ## Gate Rules
//!
//! 1. During the critical lock period with a released roster the gate is
//!    locked and any override is cleared, unless the override is `Open`
//! 2. Otherwise an override decides the gate
//! 3. Otherwise the calendar decides the gate
//!
//! ## Scheduled Order
//!
//! The scheduler runs [`weekly_reset`], then [`auto_release_roster`], then
//! [`tick`] inside one lock acquisition.

use crate::effect::{Effect, Transition};
use crate::error::CoreError;
use crate::state::{GateState, SignupDefaults, SignupState};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rinkside_domain::{
    Allocation, Group, IsoWeek, OverrideState, ParticipantId, StructuralState, WeekSnapshot,
    allocate, decide_structural_state, is_critical_lock_period, is_release_minute, is_reset_hour,
    iso_week, next_game_date,
};
use tracing::{debug, info};

/// Computes the gate flags `now` calls for, without touching state.
///
/// # Arguments
///
/// * `gate` - The current gate flags
/// * `now` - The current instant in the schedule timezone
#[must_use]
pub fn evaluate_gate(gate: &GateState, now: &DateTime<Tz>) -> GateState {
    if gate.roster_released && is_critical_lock_period(now) {
        if gate.override_state == Some(OverrideState::Open) {
            return GateState {
                require_code: false,
                ..*gate
            };
        }
        return GateState {
            require_code: true,
            override_state: None,
            ..*gate
        };
    }

    let structural: StructuralState = decide_structural_state(now, gate.roster_released);
    let require_code: bool = gate.override_state.map_or(
        structural == StructuralState::Locked,
        |o| o == OverrideState::Locked,
    );

    GateState {
        require_code,
        ..*gate
    }
}

/// Brings the gate in line with the calendar and any override.
///
/// Idempotent: a second call at the same instant returns no effects.
///
/// # Arguments
///
/// * `state` - The signup state
/// * `now` - The current instant in the schedule timezone
///
/// # Returns
///
/// A `SaveSettings` effect if the gate changed, otherwise an empty
/// transition.
pub fn tick(state: &mut SignupState, now: &DateTime<Tz>) -> Transition {
    let next: GateState = evaluate_gate(&state.gate, now);
    if next == state.gate {
        debug!(require_code = next.require_code, "Gate unchanged");
        return Transition::none();
    }

    info!(
        require_code = next.require_code,
        was_require_code = state.gate.require_code,
        override_state = ?next.override_state,
        roster_released = next.roster_released,
        "Signup gate {}",
        if next.require_code { "locked" } else { "opened" }
    );

    state.gate = next;
    Transition::applied(vec![Effect::SaveSettings(state.to_settings())])
}

/// Forces the gate to `override_state` until cleared.
///
/// The gate follows the override immediately. Settings are always saved.
pub fn set_override(state: &mut SignupState, override_state: OverrideState) -> Transition {
    state.gate = GateState {
        require_code: override_state == OverrideState::Locked,
        override_state: Some(override_state),
        ..state.gate
    };

    info!(override_state = %override_state, "Override set");
    Transition::applied(vec![Effect::SaveSettings(state.to_settings())])
}

/// Overrides the gate to the opposite of what it currently is.
///
/// # Returns
///
/// The override that was applied, together with the transition.
pub fn toggle_override(state: &mut SignupState) -> (OverrideState, Transition) {
    let target: OverrideState = if state.gate.require_code {
        OverrideState::Open
    } else {
        OverrideState::Locked
    };
    (target, set_override(state, target))
}

/// Removes any override and lets the calendar decide again.
///
/// Settings are always saved.
pub fn clear_override(state: &mut SignupState, now: &DateTime<Tz>) -> Transition {
    let cleared: GateState = GateState {
        override_state: None,
        ..state.gate
    };
    state.gate = evaluate_gate(&cleared, now);

    info!(require_code = state.gate.require_code, "Override cleared");
    Transition::applied(vec![Effect::SaveSettings(state.to_settings())])
}

/// Starts a new week during the Monday midnight hour.
///
/// Runs at most once per ISO week. Outside the reset hour, or when the
/// reset already ran this week, nothing changes.
pub fn weekly_reset(
    state: &mut SignupState,
    now: &DateTime<Tz>,
    defaults: &SignupDefaults,
) -> Transition {
    let week: IsoWeek = iso_week(now);
    if !is_reset_hour(now) || state.gate.last_reset_week == Some(week) {
        debug!(%week, "Weekly reset not due");
        return Transition::none();
    }
    reset_week(state, now, defaults)
}

/// Starts a new week immediately.
///
/// Same post-conditions as [`weekly_reset`] but not gated by the hour or by
/// the once-per-week guard. The current week is recorded as the last reset
/// week, so an automatic reset later in the same ISO week does nothing.
pub fn force_weekly_reset(
    state: &mut SignupState,
    now: &DateTime<Tz>,
    defaults: &SignupDefaults,
) -> Transition {
    info!("Manual weekly reset requested");
    reset_week(state, now, defaults)
}

fn reset_week(state: &mut SignupState, now: &DateTime<Tz>, defaults: &SignupDefaults) -> Transition {
    let week: IsoWeek = iso_week(now);
    let mut effects: Vec<Effect> = Vec::new();

    // The snapshot taken at release is archived as is, later roster edits
    // only affect the live views.
    let released: Option<WeekSnapshot> = state
        .current_week
        .clone()
        .filter(|_| state.gate.roster_released)
        .filter(WeekSnapshot::has_players);
    if let Some(snapshot) = released {
        info!(week = %snapshot.week, "Archiving released roster");
        effects.push(Effect::ArchiveWeek(snapshot));
    }
    effects.push(Effect::ClearRosters);

    let cleared_players: usize = state.participants.len();
    let cleared_waitlist: usize = state.waitlist.len();

    state.participants.clear();
    state.waitlist.clear();
    state.current_week = None;
    state.spots_remaining = defaults.spots;
    state.over_capacity = 0;
    state.game.date = Some(next_game_date(now.date_naive()));
    state.gate = GateState {
        require_code: true,
        override_state: None,
        roster_released: false,
        last_reset_week: Some(week),
    };

    effects.push(Effect::SaveSettings(state.to_settings()));

    info!(
        %week,
        cleared_players,
        cleared_waitlist,
        spots = state.spots_remaining,
        game_date = %state.game.formatted_date(),
        "Weekly reset complete"
    );
    Transition::applied(effects)
}

/// Publishes the teams at Sunday noon.
///
/// Fires only during the release minute, only if the roster has not been
/// released yet, and only if anyone registered. Repeated calls within the
/// release minute are no-ops.
pub fn auto_release_roster(state: &mut SignupState, now: &DateTime<Tz>) -> Transition {
    if !is_release_minute(now) {
        return Transition::none();
    }
    if state.gate.roster_released {
        debug!("Roster already released");
        return Transition::none();
    }
    if state.participants.is_empty() {
        info!("No players registered, skipping roster release");
        return Transition::none();
    }
    release(state, now)
}

/// Publishes the teams immediately.
///
/// Re-releasing an already released week re-allocates everyone and
/// replaces that week's history row.
///
/// # Errors
///
/// Returns `CoreError::NoParticipants` if nobody is registered.
pub fn release_roster_now(
    state: &mut SignupState,
    now: &DateTime<Tz>,
) -> Result<Transition, CoreError> {
    if state.participants.is_empty() {
        return Err(CoreError::NoParticipants);
    }
    Ok(release(state, now))
}

fn release(state: &mut SignupState, now: &DateTime<Tz>) -> Transition {
    let allocation: Allocation = allocate(&state.participants);
    let assignments: Vec<(ParticipantId, Group)> = allocation.assignments();

    for participant in &mut state.participants {
        participant.group = assignments
            .iter()
            .find(|(id, _)| *id == participant.id)
            .map(|(_, group)| *group);
    }

    let snapshot: WeekSnapshot = WeekSnapshot {
        week: iso_week(now),
        released_at: Some(now.with_timezone(&Utc)),
        game: state.game.clone(),
        white: allocation.white,
        dark: allocation.dark,
        white_average: allocation.white_average,
        dark_average: allocation.dark_average,
    };

    info!(
        week = %snapshot.week,
        white = snapshot.white.len(),
        dark = snapshot.dark.len(),
        white_average = ?snapshot.white_average,
        dark_average = ?snapshot.dark_average,
        "Roster released"
    );

    state.current_week = Some(snapshot.clone());
    state.gate = GateState {
        require_code: true,
        override_state: None,
        roster_released: true,
        ..state.gate
    };

    let group_updates: Vec<(ParticipantId, Option<Group>)> = state
        .participants
        .iter()
        .map(|p| (p.id, p.group))
        .collect();

    Transition::applied(vec![
        Effect::AssignGroups(group_updates),
        Effect::ArchiveWeek(snapshot),
        Effect::SaveSettings(state.to_settings()),
    ])
}
