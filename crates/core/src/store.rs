// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage seams.
//!
//! Transitions never call the store. They return [`Effect`]s which the
//! service applies through [`SignupStore::apply_effect`] after releasing the
//! state lock.

use crate::effect::Effect;
use crate::state::{PersistedSettings, SignupDefaults, SignupState};
use rinkside_domain::{
    Group, HistorySummary, IsoWeek, Participant, ParticipantId, WaitlistEntry, WeekSnapshot,
};
use std::collections::BTreeMap;

/// Common error type for all store traits.
pub trait Store {
    /// The backend's error type.
    type Error: std::error::Error + Send + Sync + 'static;
}

/// The singleton settings record.
pub trait SettingsStore: Store {
    /// Loads the settings, or `None` on a fresh install.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load_settings(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;

    /// Overwrites the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save_settings(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

/// This week's roster and waitlist.
#[allow(clippy::missing_errors_doc)]
pub trait RosterStore: Store {
    /// Adds a roster entry.
    fn insert_participant(&mut self, participant: &Participant) -> Result<(), Self::Error>;
    /// Removes a roster entry. Removing a missing entry is not an error.
    fn delete_participant(&mut self, id: ParticipantId) -> Result<(), Self::Error>;
    /// Updates a player's payment status.
    fn update_participant_paid(&mut self, id: ParticipantId, paid: bool)
    -> Result<(), Self::Error>;
    /// Updates a player's team.
    fn update_participant_group(
        &mut self,
        id: ParticipantId,
        group: Option<Group>,
    ) -> Result<(), Self::Error>;
    /// Lists the roster in registration order.
    fn list_participants(&mut self) -> Result<Vec<Participant>, Self::Error>;
    /// Adds a waitlist entry.
    fn insert_waitlist_entry(&mut self, entry: &WaitlistEntry) -> Result<(), Self::Error>;
    /// Removes a waitlist entry. Removing a missing entry is not an error.
    fn delete_waitlist_entry(&mut self, id: ParticipantId) -> Result<(), Self::Error>;
    /// Lists the waitlist in arrival order.
    fn list_waitlist(&mut self) -> Result<Vec<WaitlistEntry>, Self::Error>;
    /// Empties both the roster and the waitlist.
    fn clear_rosters(&mut self) -> Result<(), Self::Error>;
}

/// Archived weeks.
#[allow(clippy::missing_errors_doc)]
pub trait HistoryStore: Store {
    /// Stores a week, replacing any existing row for the same week.
    fn archive_week(&mut self, snapshot: &WeekSnapshot) -> Result<(), Self::Error>;
    /// Lists archived weeks, newest first.
    fn list_history(&mut self) -> Result<Vec<HistorySummary>, Self::Error>;
    /// Loads one archived week.
    fn get_week(&mut self, week: IsoWeek) -> Result<Option<WeekSnapshot>, Self::Error>;
    /// Deletes one archived week. Returns `false` if it did not exist.
    fn delete_week(&mut self, week: IsoWeek) -> Result<bool, Self::Error>;
}

/// The state loaded at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedState {
    /// The rebuilt signup state.
    pub state: SignupState,
    /// `true` if no settings were stored yet.
    pub fresh_install: bool,
}

/// Everything the signup service needs from a backend.
pub trait SignupStore: SettingsStore + RosterStore + HistoryStore {
    /// Performs one store write.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the write fails.
    fn apply_effect(&mut self, effect: &Effect) -> Result<(), Self::Error> {
        match effect {
            Effect::SaveSettings(settings) => self.save_settings(settings),
            Effect::InsertParticipant(participant) => self.insert_participant(participant),
            Effect::DeleteParticipant(id) => self.delete_participant(*id),
            Effect::UpdatePaid { id, paid } => self.update_participant_paid(*id, *paid),
            Effect::AssignGroups(assignments) => {
                for (id, group) in assignments {
                    self.update_participant_group(*id, *group)?;
                }
                Ok(())
            }
            Effect::InsertWaitlistEntry(entry) => self.insert_waitlist_entry(entry),
            Effect::DeleteWaitlistEntry(id) => self.delete_waitlist_entry(*id),
            Effect::ClearRosters => self.clear_rosters(),
            Effect::ArchiveWeek(snapshot) => self.archive_week(snapshot),
        }
    }

    /// Rebuilds the signup state from storage.
    ///
    /// # Errors
    ///
    /// Returns the backend error if any read fails.
    fn load_state(&mut self, defaults: &SignupDefaults) -> Result<LoadedState, Self::Error> {
        let settings: Option<PersistedSettings> = self.load_settings()?;
        let participants: Vec<Participant> = self.list_participants()?;
        let waitlist: Vec<WaitlistEntry> = self.list_waitlist()?;
        let fresh_install: bool = settings.is_none();

        Ok(LoadedState {
            state: SignupState::restore(settings, participants, waitlist, defaults),
            fresh_install,
        })
    }
}

impl<T: SettingsStore + RosterStore + HistoryStore> SignupStore for T {}

/// Error returned by [`MemoryStore`] when writes are switched off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStoreError(pub String);

impl std::fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Memory store error: {}", self.0)
    }
}

impl std::error::Error for MemoryStoreError {}

/// An in-process store.
///
/// Counts writes and can be told to fail them, which makes it useful for
/// checking what a transition persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: Option<PersistedSettings>,
    participants: Vec<Participant>,
    waitlist: Vec<WaitlistEntry>,
    history: BTreeMap<IsoWeek, WeekSnapshot>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write fail (or succeed again).
    pub const fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }

    /// The last saved settings.
    #[must_use]
    pub const fn settings(&self) -> Option<&PersistedSettings> {
        self.settings.as_ref()
    }

    fn write(&mut self) -> Result<(), MemoryStoreError> {
        if self.fail_writes {
            return Err(MemoryStoreError(String::from("writes disabled")));
        }
        self.writes += 1;
        Ok(())
    }
}

impl Store for MemoryStore {
    type Error = MemoryStoreError;
}

impl SettingsStore for MemoryStore {
    fn load_settings(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.write()?;
        self.settings = Some(settings.clone());
        Ok(())
    }
}

impl RosterStore for MemoryStore {
    fn insert_participant(&mut self, participant: &Participant) -> Result<(), Self::Error> {
        self.write()?;
        self.participants.push(participant.clone());
        Ok(())
    }

    fn delete_participant(&mut self, id: ParticipantId) -> Result<(), Self::Error> {
        self.write()?;
        self.participants.retain(|p| p.id != id);
        Ok(())
    }

    fn update_participant_paid(
        &mut self,
        id: ParticipantId,
        paid: bool,
    ) -> Result<(), Self::Error> {
        self.write()?;
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.paid = paid;
        }
        Ok(())
    }

    fn update_participant_group(
        &mut self,
        id: ParticipantId,
        group: Option<Group>,
    ) -> Result<(), Self::Error> {
        self.write()?;
        if let Some(p) = self.participants.iter_mut().find(|p| p.id == id) {
            p.group = group;
        }
        Ok(())
    }

    fn list_participants(&mut self) -> Result<Vec<Participant>, Self::Error> {
        let mut participants: Vec<Participant> = self.participants.clone();
        participants.sort_by_key(|p| p.id);
        Ok(participants)
    }

    fn insert_waitlist_entry(&mut self, entry: &WaitlistEntry) -> Result<(), Self::Error> {
        self.write()?;
        self.waitlist.push(entry.clone());
        Ok(())
    }

    fn delete_waitlist_entry(&mut self, id: ParticipantId) -> Result<(), Self::Error> {
        self.write()?;
        self.waitlist.retain(|w| w.id != id);
        Ok(())
    }

    fn list_waitlist(&mut self) -> Result<Vec<WaitlistEntry>, Self::Error> {
        let mut waitlist: Vec<WaitlistEntry> = self.waitlist.clone();
        waitlist.sort_by_key(|w| w.id);
        Ok(waitlist)
    }

    fn clear_rosters(&mut self) -> Result<(), Self::Error> {
        self.write()?;
        self.participants.clear();
        self.waitlist.clear();
        Ok(())
    }
}

impl HistoryStore for MemoryStore {
    fn archive_week(&mut self, snapshot: &WeekSnapshot) -> Result<(), Self::Error> {
        self.write()?;
        self.history.insert(snapshot.week, snapshot.clone());
        Ok(())
    }

    fn list_history(&mut self) -> Result<Vec<HistorySummary>, Self::Error> {
        Ok(self
            .history
            .values()
            .rev()
            .map(|s| HistorySummary {
                week: s.week,
                released_at: s.released_at,
            })
            .collect())
    }

    fn get_week(&mut self, week: IsoWeek) -> Result<Option<WeekSnapshot>, Self::Error> {
        Ok(self.history.get(&week).cloned())
    }

    fn delete_week(&mut self, week: IsoWeek) -> Result<bool, Self::Error> {
        self.write()?;
        Ok(self.history.remove(&week).is_some())
    }
}
