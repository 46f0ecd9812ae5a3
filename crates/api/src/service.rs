// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The signup service.
//!
//! `SignupService` owns the signup state behind a single lock. Every
//! operation, scheduled or requested, takes the lock, runs one transition,
//! and collects the store writes it produced. The store lock is taken
//! before the state lock is released, so writes land in the order the
//! transitions ran.
//!
//! Store failures never undo an in-memory transition. A failed write and
//! every write after it stay queued in order, and the queue is replayed on
//! the next commit or scheduled check. Admin operations whose writes did not
//! all reach the store report `ApiError::Internal`.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;
use rinkside::{
    Clock, Effect, LoadedState, Promotion, RegistrationOutcome, SignupDefaults, SignupState,
    SignupStore, Transition, admin_add, auto_release_roster, clear_override, force_weekly_reset,
    promote_waitlist, register_participant, release_roster_now, remove_participant,
    remove_waitlist, set_override, tick, toggle_override, toggle_paid, update_game_details,
    update_signup_code, update_spots, verify_signup_code, weekly_reset,
};
use rinkside_domain::{
    HistorySummary, IsoWeek, MAX_GOALIES, OverrideState, Participant, ParticipantId,
    StructuralState, WaitlistEntry, WeekSnapshot, decide_structural_state, iso_week,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::auth::{AdminSecret, AuthenticatedAdmin};
use crate::error::ApiError;
use crate::request_response::{
    AddPlayerRequest, AdminOverviewResponse, AdminPlayer, AdminWaitlistEntry, GameDetailsInfo,
    GateStatusResponse, HistoryItem, HistoryListResponse, OverrideResponse, PromoteResponse,
    RegisterRequest, RegisterResponse, RosterPlayer, RosterResponse, TeamsInfo,
    TogglePaidResponse, UpdateDetailsRequest, WaitlistPosition, WaitlistResponse,
};

/// What one scheduled check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduledCheckReport {
    /// The weekly reset ran.
    pub reset: bool,
    /// The roster was released.
    pub released: bool,
    /// The gate changed.
    pub gate_changed: bool,
    /// Store writes still queued after the check.
    pub failed_writes: usize,
}

/// The signup service.
pub struct SignupService<S: SignupStore> {
    state: Mutex<SignupState>,
    store: Mutex<S>,
    clock: Arc<dyn Clock>,
    defaults: SignupDefaults,
    admin: AdminSecret,
    /// Writes that have not reached the store, oldest first. Locked only
    /// while the store lock is held.
    pending: Mutex<VecDeque<Effect>>,
}

impl<S: SignupStore> std::fmt::Debug for SignupService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupService")
            .field("clock", &self.clock)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<S: SignupStore + Send> SignupService<S> {
    /// Loads the signup state from the store and builds the service.
    ///
    /// A fresh install gets the defaults written back immediately.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store
    /// * `clock` - The time source
    /// * `defaults` - Spot count, signup code, and game details for a fresh week
    /// * `admin` - The hashed admin password
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state cannot be read or the defaults
    /// cannot be written on a fresh install.
    pub fn load(
        mut store: S,
        clock: Arc<dyn Clock>,
        defaults: SignupDefaults,
        admin: AdminSecret,
    ) -> Result<Self, ApiError> {
        let loaded: LoadedState = store.load_state(&defaults).map_err(|e| ApiError::Internal {
            message: format!("Failed to load signup state: {e}"),
        })?;

        if loaded.fresh_install {
            info!("No stored settings found, starting from defaults");
            store
                .save_settings(&loaded.state.to_settings())
                .map_err(|e| ApiError::Internal {
                    message: format!("Failed to save initial settings: {e}"),
                })?;
        }

        info!(
            participants = loaded.state.participants.len(),
            waitlist = loaded.state.waitlist.len(),
            require_code = loaded.state.gate.require_code,
            roster_released = loaded.state.gate.roster_released,
            "Signup state loaded"
        );

        Ok(Self {
            state: Mutex::new(loaded.state),
            store: Mutex::new(store),
            clock,
            defaults,
            admin,
            pending: Mutex::new(VecDeque::new()),
        })
    }

    /// Checks the admin password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the password is wrong.
    pub fn authenticate(&self, password: &str) -> Result<AuthenticatedAdmin, ApiError> {
        self.admin.authenticate(password)
    }

    /// Returns the configured defaults.
    #[must_use]
    pub const fn defaults(&self) -> &SignupDefaults {
        &self.defaults
    }

    #[cfg(test)]
    pub(crate) async fn store(&self) -> MutexGuard<'_, S> {
        self.store.lock().await
    }

    /// Queues a transition's writes behind any earlier unsaved ones and
    /// flushes the queue. The store lock is taken before the state lock is
    /// released.
    ///
    /// Returns the number of writes still queued.
    async fn commit(&self, state: MutexGuard<'_, SignupState>, transition: Transition) -> usize {
        let mut store: MutexGuard<'_, S> = self.store.lock().await;
        drop(state);
        let mut pending: MutexGuard<'_, VecDeque<Effect>> = self.pending.lock().await;
        pending.extend(transition.effects);
        flush(&mut *store, &mut *pending)
    }

    /// Commits an admin transition and reports writes that did not land.
    async fn commit_reported(
        &self,
        state: MutexGuard<'_, SignupState>,
        transition: Transition,
        action: &str,
    ) -> Result<(), ApiError> {
        match self.commit(state, transition).await {
            0 => Ok(()),
            queued => Err(ApiError::Internal {
                message: format!(
                    "{action} was applied but not saved; {queued} write(s) queued for retry"
                ),
            }),
        }
    }

    /// Runs the periodic checks: weekly reset, automatic release, gate tick.
    ///
    /// All three run under one lock acquisition, in that order. Writes left
    /// queued by an earlier failure are replayed first.
    pub async fn run_scheduled_checks(&self) -> ScheduledCheckReport {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();

        let reset: Transition = weekly_reset(&mut state, &now, &self.defaults);
        let release: Transition = auto_release_roster(&mut state, &now);
        let gate: Transition = tick(&mut state, &now);

        let mut report: ScheduledCheckReport = ScheduledCheckReport {
            reset: reset.applied,
            released: release.applied,
            gate_changed: gate.applied,
            failed_writes: 0,
        };

        let mut transition: Transition = reset;
        transition.merge(release);
        transition.merge(gate);

        if !transition.applied && transition.effects.is_empty() {
            debug!(require_code = state.gate.require_code, "Scheduled check, nothing to do");
        }

        report.failed_writes = self.commit(state, transition).await;
        report
    }

    /// Reports the gate and roster counts.
    ///
    /// Read-only; the gate reflects the last tick.
    pub async fn gate_status(&self) -> GateStatusResponse {
        let state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        build_status(&state, &now)
    }

    /// Checks a signup code against the current one.
    pub async fn verify_signup_code(&self, code: &str) -> bool {
        let state: MutexGuard<'_, SignupState> = self.state.lock().await;
        verify_signup_code(&state, code)
    }

    /// Registers a player from the public form.
    ///
    /// The gate is brought up to date first, in the same lock acquisition.
    ///
    /// # Errors
    ///
    /// Returns an error if the signup code is needed and wrong, any field is
    /// invalid, the player is already registered, or the rules were not
    /// accepted.
    pub async fn register_participant(
        &self,
        request: RegisterRequest,
    ) -> Result<RegisterResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();

        let mut transition: Transition = tick(&mut state, &now);
        match register_participant(&mut state, &now, request.into()) {
            Ok((outcome, registered)) => {
                transition.merge(registered);
                // Queued writes are replayed later, the player keeps the spot
                self.commit(state, transition).await;
                Ok(RegisterResponse::from(outcome))
            }
            Err(e) => {
                self.commit(state, transition).await;
                Err(ApiError::from(e))
            }
        }
    }

    /// Returns the public roster.
    pub async fn roster(&self) -> RosterResponse {
        let state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let teams: Option<WeekSnapshot> = state.released_teams();
        RosterResponse {
            released: state.gate.roster_released,
            players: state.participants.iter().map(RosterPlayer::from).collect(),
            teams: teams.as_ref().map(TeamsInfo::from),
        }
    }

    /// Returns the public waitlist.
    pub async fn waitlist(&self) -> WaitlistResponse {
        let state: MutexGuard<'_, SignupState> = self.state.lock().await;
        WaitlistResponse {
            entries: state
                .waitlist
                .iter()
                .enumerate()
                .map(|(index, entry)| WaitlistPosition {
                    position: index + 1,
                    name: entry.full_name(),
                    is_goalie: entry.is_goalie,
                })
                .collect(),
        }
    }

    /// Lists archived weeks, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub async fn history_list(&self) -> Result<HistoryListResponse, ApiError> {
        let mut store: MutexGuard<'_, S> = self.store.lock().await;
        let weeks: Vec<HistorySummary> = store.list_history().map_err(|e| ApiError::Internal {
            message: format!("Failed to list history: {e}"),
        })?;
        Ok(HistoryListResponse {
            weeks: weeks.iter().map(HistoryItem::from).collect(),
        })
    }

    /// Returns the teams archived for one week.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the week was never archived.
    pub async fn history_week(&self, year: i32, week: u32) -> Result<TeamsInfo, ApiError> {
        let mut store: MutexGuard<'_, S> = self.store.lock().await;
        let iso: IsoWeek = IsoWeek::new(year, week);
        let snapshot: Option<WeekSnapshot> =
            store.get_week(iso).map_err(|e| ApiError::Internal {
                message: format!("Failed to read history: {e}"),
            })?;
        snapshot
            .as_ref()
            .map(TeamsInfo::from)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("History week"),
                message: format!("No teams archived for {iso}"),
            })
    }

    /// Returns everything the admin dashboard shows.
    pub async fn admin_overview(&self, _admin: &AuthenticatedAdmin) -> AdminOverviewResponse {
        let state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        let teams: Option<WeekSnapshot> = state.released_teams();
        AdminOverviewResponse {
            status: build_status(&state, &now),
            signup_code: state.signup_code.value().to_string(),
            participants: state.participants.iter().map(AdminPlayer::from).collect(),
            waitlist: state
                .waitlist
                .iter()
                .enumerate()
                .map(|(index, entry)| AdminWaitlistEntry::new(index + 1, entry))
                .collect(),
            teams: teams.as_ref().map(TeamsInfo::from),
        }
    }

    /// Allocates and publishes the teams now.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody is registered, or `ApiError::Internal` if
    /// the release could not be saved.
    pub async fn release_roster_now(
        &self,
        _admin: &AuthenticatedAdmin,
    ) -> Result<TeamsInfo, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        let transition: Transition = release_roster_now(&mut state, &now)?;
        let teams: Option<TeamsInfo> = state.released_teams().as_ref().map(TeamsInfo::from);
        self.commit_reported(state, transition, "Roster release").await?;
        teams.ok_or_else(|| ApiError::Internal {
            message: String::from("Release produced no teams"),
        })
    }

    /// Forces signup open or locked.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the change could not be saved.
    pub async fn set_override(
        &self,
        _admin: &AuthenticatedAdmin,
        override_state: OverrideState,
    ) -> Result<OverrideResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let transition: Transition = set_override(&mut state, override_state);
        let response: OverrideResponse = override_response(&state);
        self.commit_reported(state, transition, "Override").await?;
        Ok(response)
    }

    /// Removes the override and lets the calendar decide.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the change could not be saved.
    pub async fn clear_override(
        &self,
        _admin: &AuthenticatedAdmin,
    ) -> Result<OverrideResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        let transition: Transition = clear_override(&mut state, &now);
        let response: OverrideResponse = override_response(&state);
        self.commit_reported(state, transition, "Clearing the override").await?;
        Ok(response)
    }

    /// Flips the gate by overriding it to the opposite of its current state.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the change could not be saved.
    pub async fn toggle_code(
        &self,
        _admin: &AuthenticatedAdmin,
    ) -> Result<OverrideResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let (_, transition): (OverrideState, Transition) = toggle_override(&mut state);
        let response: OverrideResponse = override_response(&state);
        self.commit_reported(state, transition, "Code toggle").await?;
        Ok(response)
    }

    /// Runs the weekly reset immediately, ignoring the calendar.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if the reset could not be saved.
    pub async fn force_weekly_reset_for_testing(
        &self,
        _admin: &AuthenticatedAdmin,
    ) -> Result<(), ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        let transition: Transition = force_weekly_reset(&mut state, &now, &self.defaults);
        self.commit_reported(state, transition, "Weekly reset").await
    }

    /// Adds a player by hand, to the roster or the waitlist.
    ///
    /// # Errors
    ///
    /// Returns an error if any field is invalid, the player is already
    /// registered, both goalie spots are taken, or the player could not be
    /// saved.
    pub async fn admin_add(
        &self,
        _admin: &AuthenticatedAdmin,
        request: AddPlayerRequest,
    ) -> Result<RegisterResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        let (outcome, transition): (RegistrationOutcome, Transition) =
            admin_add(&mut state, &now, request.into())?;
        self.commit_reported(state, transition, "Adding the player").await?;
        Ok(RegisterResponse::from(outcome))
    }

    /// Moves a waitlisted player onto the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or it is a goalie and
    /// both goalie spots are taken, or the promotion could not be saved.
    pub async fn promote_waitlist(
        &self,
        _admin: &AuthenticatedAdmin,
        id: i64,
    ) -> Result<PromoteResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let now: DateTime<Tz> = self.clock.now();
        let (promotion, transition): (Promotion, Transition) =
            promote_waitlist(&mut state, &now, ParticipantId::new(id))?;
        self.commit_reported(state, transition, "Promotion").await?;
        Ok(PromoteResponse {
            participant: AdminPlayer::from(&promotion.participant),
            over_capacity: promotion.over_capacity,
        })
    }

    /// Removes a waitlist entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or the removal could
    /// not be saved.
    pub async fn remove_waitlist(
        &self,
        _admin: &AuthenticatedAdmin,
        id: i64,
    ) -> Result<AdminWaitlistEntry, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let position: usize = state
            .waitlist
            .iter()
            .position(|e| e.id.value() == id)
            .map_or(0, |index| index + 1);
        let (entry, transition): (WaitlistEntry, Transition) =
            remove_waitlist(&mut state, ParticipantId::new(id))?;
        self.commit_reported(state, transition, "Removing the waitlist entry").await?;
        Ok(AdminWaitlistEntry::new(position, &entry))
    }

    /// Removes a player from the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist or the change could not
    /// be saved.
    pub async fn remove_participant(
        &self,
        _admin: &AuthenticatedAdmin,
        id: i64,
    ) -> Result<AdminPlayer, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let (participant, transition): (Participant, Transition) =
            remove_participant(&mut state, ParticipantId::new(id))?;
        self.commit_reported(state, transition, "Removing the player").await?;
        Ok(AdminPlayer::from(&participant))
    }

    /// Flips a player's payment flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the player does not exist or the change could not
    /// be saved.
    pub async fn toggle_paid(
        &self,
        _admin: &AuthenticatedAdmin,
        id: i64,
    ) -> Result<TogglePaidResponse, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let (paid, transition): (bool, Transition) =
            toggle_paid(&mut state, ParticipantId::new(id))?;
        self.commit_reported(state, transition, "Payment update").await?;
        Ok(TogglePaidResponse { id, paid })
    }

    /// Sets the remaining spot count.
    ///
    /// # Errors
    ///
    /// Returns an error if the count is outside 0 to 30 or could not be
    /// saved.
    pub async fn update_spots(
        &self,
        _admin: &AuthenticatedAdmin,
        spots: i64,
    ) -> Result<u32, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let transition: Transition = update_spots(&mut state, spots)?;
        let remaining: u32 = state.spots_remaining;
        self.commit_reported(state, transition, "Spot update").await?;
        Ok(remaining)
    }

    /// Changes the signup code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not four digits or could not be
    /// saved.
    pub async fn update_signup_code(
        &self,
        _admin: &AuthenticatedAdmin,
        code: &str,
    ) -> Result<(), ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let transition: Transition = update_signup_code(&mut state, code)?;
        self.commit_reported(state, transition, "Code update").await?;
        Ok(())
    }

    /// Edits the game details.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be parsed or the details could
    /// not be saved.
    pub async fn update_game_details(
        &self,
        _admin: &AuthenticatedAdmin,
        request: UpdateDetailsRequest,
    ) -> Result<GameDetailsInfo, ApiError> {
        let mut state: MutexGuard<'_, SignupState> = self.state.lock().await;
        let transition: Transition = update_game_details(&mut state, request.into())?;
        let game: GameDetailsInfo = GameDetailsInfo::from(&state.game);
        self.commit_reported(state, transition, "Game details update").await?;
        Ok(game)
    }

    /// Deletes one archived week.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ResourceNotFound` if the week was never archived.
    pub async fn delete_history(
        &self,
        _admin: &AuthenticatedAdmin,
        year: i32,
        week: u32,
    ) -> Result<(), ApiError> {
        let mut store: MutexGuard<'_, S> = self.store.lock().await;
        let iso: IsoWeek = IsoWeek::new(year, week);
        let deleted: bool = store.delete_week(iso).map_err(|e| ApiError::Internal {
            message: format!("Failed to delete history: {e}"),
        })?;
        if deleted {
            info!(week = %iso, "History week deleted");
            Ok(())
        } else {
            Err(ApiError::ResourceNotFound {
                resource_type: String::from("History week"),
                message: format!("No teams archived for {iso}"),
            })
        }
    }
}

fn build_status(state: &SignupState, now: &DateTime<Tz>) -> GateStatusResponse {
    let structural: StructuralState = decide_structural_state(now, state.gate.roster_released);
    let week: IsoWeek = iso_week(now);
    GateStatusResponse {
        require_code: state.gate.require_code,
        is_structurally_locked: structural == StructuralState::Locked,
        override_state: state.gate.override_state,
        roster_released: state.gate.roster_released,
        spots_remaining: state.spots_remaining,
        goalie_count: state.goalie_count(),
        max_goalies: MAX_GOALIES,
        total_players: state.participants.len(),
        waitlist_count: state.waitlist.len(),
        is_full: state.spots_remaining == 0,
        game: GameDetailsInfo::from(&state.game),
        year: week.year,
        week: week.week,
    }
}

/// Applies queued writes in order, stopping at the first failure.
///
/// Returns the number of writes left in the queue.
fn flush<S: SignupStore>(store: &mut S, pending: &mut VecDeque<Effect>) -> usize {
    while let Some(effect) = pending.front() {
        if let Err(e) = store.apply_effect(effect) {
            error!(
                effect = effect.name(),
                queued = pending.len(),
                error = %e,
                "Store write failed, keeping writes queued"
            );
            return pending.len();
        }
        pending.pop_front();
    }
    0
}

const fn override_response(state: &SignupState) -> OverrideResponse {
    OverrideResponse {
        override_state: state.gate.override_state,
        require_code: state.gate.require_code,
    }
}
