// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::PersistedSettings;
use rinkside_domain::{Group, Participant, ParticipantId, WaitlistEntry, WeekSnapshot};

/// A store write produced by a transition.
///
/// Effects own their data so they can be applied after the state lock
/// is released.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Overwrite the settings record.
    SaveSettings(PersistedSettings),
    /// Add a player to the roster.
    InsertParticipant(Participant),
    /// Remove a player from the roster.
    DeleteParticipant(ParticipantId),
    /// Record a payment status change.
    UpdatePaid {
        /// The player.
        id: ParticipantId,
        /// New payment status.
        paid: bool,
    },
    /// Record team assignments.
    AssignGroups(Vec<(ParticipantId, Option<Group>)>),
    /// Add a player to the waitlist.
    InsertWaitlistEntry(WaitlistEntry),
    /// Remove a player from the waitlist.
    DeleteWaitlistEntry(ParticipantId),
    /// Empty both the roster and the waitlist.
    ClearRosters,
    /// Write a week to history, replacing any row for the same week.
    ArchiveWeek(WeekSnapshot),
}

impl Effect {
    /// Short name used in log lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SaveSettings(_) => "save_settings",
            Self::InsertParticipant(_) => "insert_participant",
            Self::DeleteParticipant(_) => "delete_participant",
            Self::UpdatePaid { .. } => "update_paid",
            Self::AssignGroups(_) => "assign_groups",
            Self::InsertWaitlistEntry(_) => "insert_waitlist_entry",
            Self::DeleteWaitlistEntry(_) => "delete_waitlist_entry",
            Self::ClearRosters => "clear_rosters",
            Self::ArchiveWeek(_) => "archive_week",
        }
    }
}

/// The result of a lifecycle or roster transition.
///
/// `applied == false` means a guard declined the transition and nothing
/// changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transition {
    /// Whether the state changed.
    pub applied: bool,
    /// Store writes to perform, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    /// A transition that changed nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            applied: false,
            effects: Vec::new(),
        }
    }

    /// A transition that changed state and needs these writes.
    #[must_use]
    pub const fn applied(effects: Vec<Effect>) -> Self {
        Self {
            applied: true,
            effects,
        }
    }

    /// Appends another transition's effects after this one's.
    pub fn merge(&mut self, other: Self) {
        self.applied |= other.applied;
        self.effects.extend(other.effects);
    }
}
