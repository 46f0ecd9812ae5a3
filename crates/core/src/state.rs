// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, Utc};
use rinkside_domain::{
    GameDetails, IsoWeek, OverrideState, Participant, ParticipantId, SignupCode, WaitlistEntry,
    WeekSnapshot, average_rating, next_game_date,
};
use serde::{Deserialize, Serialize};

/// Signup gate flags.
///
/// `require_code` is the single source of truth for whether public
/// registration needs the signup code. The other flags are the inputs the
/// lifecycle uses to recompute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateState {
    /// Whether registration requires the signup code.
    pub require_code: bool,
    /// Administrator override, if one is active.
    pub override_state: Option<OverrideState>,
    /// Whether this week's teams have been published.
    pub roster_released: bool,
    /// The ISO week in which the weekly reset last ran.
    pub last_reset_week: Option<IsoWeek>,
}

impl Default for GateState {
    fn default() -> Self {
        Self {
            require_code: true,
            override_state: None,
            roster_released: false,
            last_reset_week: None,
        }
    }
}

/// Values a fresh install starts from and the weekly reset returns to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDefaults {
    /// Skater spots opened each week.
    pub spots: u32,
    /// Signup code used on a fresh install.
    pub signup_code: SignupCode,
    /// Game details used on a fresh install.
    pub game: GameDetails,
}

impl SignupDefaults {
    /// Creates defaults with the standard game details for the Sunday on or
    /// after `today`.
    #[must_use]
    pub fn new(spots: u32, signup_code: SignupCode, today: NaiveDate) -> Self {
        Self {
            spots,
            signup_code,
            game: GameDetails::with_date(next_game_date(today)),
        }
    }
}

/// The settings record written to the store.
///
/// Participants, waitlist entries, and history rows are stored separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    /// Remaining skater spots.
    pub spots_remaining: u32,
    /// Skaters on the roster beyond the spot count.
    #[serde(default)]
    pub over_capacity: u32,
    /// Current signup code.
    pub signup_code: SignupCode,
    /// Gate flag.
    pub require_code: bool,
    /// Administrator override.
    pub override_state: Option<OverrideState>,
    /// Week of the last reset.
    pub last_reset_week: Option<IsoWeek>,
    /// Whether teams are published.
    pub roster_released: bool,
    /// The released snapshot, if any.
    pub current_week: Option<WeekSnapshot>,
    /// Game details.
    pub game_details: GameDetails,
}

/// The complete in-memory signup state.
///
/// Owned by a single lock holder; every transition takes `&mut SignupState`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupState {
    /// Gate flags.
    pub gate: GateState,
    /// Remaining skater spots.
    pub spots_remaining: u32,
    /// Skaters an admin placed on the roster when no spot was free. Removing
    /// one of them does not free a spot.
    pub over_capacity: u32,
    /// Current signup code.
    pub signup_code: SignupCode,
    /// Details of the next game.
    pub game: GameDetails,
    /// Teams published this week.
    pub current_week: Option<WeekSnapshot>,
    /// Registered players in registration order.
    pub participants: Vec<Participant>,
    /// Waiting players in arrival order.
    pub waitlist: Vec<WaitlistEntry>,
    last_issued_id: i64,
}

impl SignupState {
    /// Creates the state of a fresh install.
    #[must_use]
    pub fn new(defaults: &SignupDefaults) -> Self {
        Self {
            gate: GateState::default(),
            spots_remaining: defaults.spots,
            over_capacity: 0,
            signup_code: defaults.signup_code.clone(),
            game: defaults.game.clone(),
            current_week: None,
            participants: Vec::new(),
            waitlist: Vec::new(),
            last_issued_id: 0,
        }
    }

    /// Rebuilds the state from what the store holds.
    ///
    /// # Arguments
    ///
    /// * `settings` - The stored settings, or `None` on a fresh install
    /// * `participants` - Stored roster in registration order
    /// * `waitlist` - Stored waitlist in arrival order
    /// * `defaults` - Used when no settings are stored
    #[must_use]
    pub fn restore(
        settings: Option<PersistedSettings>,
        participants: Vec<Participant>,
        waitlist: Vec<WaitlistEntry>,
        defaults: &SignupDefaults,
    ) -> Self {
        let last_issued_id: i64 = participants
            .iter()
            .map(|p| p.id.value())
            .chain(waitlist.iter().map(|w| w.id.value()))
            .max()
            .unwrap_or(0);

        let mut state: Self = settings.map_or_else(
            || Self::new(defaults),
            |s| Self {
                gate: GateState {
                    require_code: s.require_code,
                    override_state: s.override_state,
                    roster_released: s.roster_released,
                    last_reset_week: s.last_reset_week,
                },
                spots_remaining: s.spots_remaining,
                over_capacity: s.over_capacity,
                signup_code: s.signup_code,
                game: s.game_details,
                current_week: s.current_week,
                participants: Vec::new(),
                waitlist: Vec::new(),
                last_issued_id: 0,
            },
        );
        state.participants = participants;
        state.waitlist = waitlist;
        state.last_issued_id = last_issued_id;
        state
    }

    /// Captures the settings record for the store.
    #[must_use]
    pub fn to_settings(&self) -> PersistedSettings {
        PersistedSettings {
            spots_remaining: self.spots_remaining,
            over_capacity: self.over_capacity,
            signup_code: self.signup_code.clone(),
            require_code: self.gate.require_code,
            override_state: self.gate.override_state,
            last_reset_week: self.gate.last_reset_week,
            roster_released: self.gate.roster_released,
            current_week: self.current_week.clone(),
            game_details: self.game.clone(),
        }
    }

    /// Issues a new id, strictly greater than every id issued before.
    ///
    /// Ids follow the epoch milliseconds of `now` so they sort in
    /// registration order across restarts.
    pub(crate) fn next_participant_id(&mut self, now: DateTime<Utc>) -> ParticipantId {
        let id: i64 = now.timestamp_millis().max(self.last_issued_id + 1);
        self.last_issued_id = id;
        ParticipantId::new(id)
    }

    /// Takes a skater spot, or counts the skater as over capacity when none
    /// is free.
    ///
    /// Returns `true` if the roster went over capacity.
    pub(crate) const fn take_spot(&mut self) -> bool {
        if self.spots_remaining > 0 {
            self.spots_remaining -= 1;
            false
        } else {
            self.over_capacity += 1;
            true
        }
    }

    /// Gives back the spot a removed skater held.
    pub(crate) const fn release_spot(&mut self) {
        if self.over_capacity > 0 {
            self.over_capacity -= 1;
        } else {
            self.spots_remaining += 1;
        }
    }

    /// Number of goalies on the roster.
    #[must_use]
    pub fn goalie_count(&self) -> usize {
        self.participants.iter().filter(|p| p.is_goalie).count()
    }

    /// The released teams as they stand now.
    ///
    /// Players removed after release are dropped from their team and
    /// member records reflect later edits such as payment status.
    /// Returns `None` until the roster is released.
    #[must_use]
    pub fn released_teams(&self) -> Option<WeekSnapshot> {
        if !self.gate.roster_released {
            return None;
        }
        let snapshot: &WeekSnapshot = self.current_week.as_ref()?;

        let refresh = |team: &[Participant]| -> Vec<Participant> {
            team.iter()
                .filter_map(|member| self.participants.iter().find(|p| p.id == member.id))
                .cloned()
                .collect()
        };
        let white: Vec<Participant> = refresh(&snapshot.white);
        let dark: Vec<Participant> = refresh(&snapshot.dark);

        Some(WeekSnapshot {
            week: snapshot.week,
            released_at: snapshot.released_at,
            game: snapshot.game.clone(),
            white_average: average_rating(&white),
            dark_average: average_rating(&dark),
            white,
            dark,
        })
    }
}
