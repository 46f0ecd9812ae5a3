// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Rinkside.
//!
//! This crate stores the signup settings, the weekly roster and waitlist,
//! and the history of released rosters. It is built on Diesel over `SQLite`
//! and implements the store traits defined in the `rinkside` core crate.
//!
//! ## Tables
//!
//! - `settings`: one row per settings field, JSON-encoded values
//! - `participants`: this week's roster
//! - `waitlist`: players waiting for a spot
//! - `history`: released rosters, unique per ISO week
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated in-memory `SQLite` databases
//! - Each `new_in_memory()` call receives its own database

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use rinkside::{HistoryStore, PersistedSettings, RosterStore, SettingsStore, Store};
use rinkside_domain::{
    Group, HistorySummary, IsoWeek, Participant, ParticipantId, WaitlistEntry, WeekSnapshot,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use backend::sqlite::{self, Storage};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// `SQLite` persistence adapter.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_rinkside_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::open(&shared_memory_url, Storage::Memory)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path
            .as_ref()
            .to_str()
            .ok_or_else(|| PersistenceError::InvalidPath(path.as_ref().display().to_string()))?;

        let conn: SqliteConnection = sqlite::open(path_str, Storage::File)?;

        Ok(Self { conn })
    }
}

impl Store for Persistence {
    type Error = PersistenceError;
}

impl SettingsStore for Persistence {
    fn load_settings(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        queries::settings::load_settings(&mut self.conn)
    }

    fn save_settings(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        mutations::settings::save_settings(&mut self.conn, settings)
    }
}

impl RosterStore for Persistence {
    fn insert_participant(&mut self, participant: &Participant) -> Result<(), Self::Error> {
        mutations::roster::insert_participant(&mut self.conn, participant)
    }

    fn delete_participant(&mut self, id: ParticipantId) -> Result<(), Self::Error> {
        mutations::roster::delete_participant(&mut self.conn, id)
    }

    fn update_participant_paid(
        &mut self,
        id: ParticipantId,
        paid: bool,
    ) -> Result<(), Self::Error> {
        mutations::roster::update_participant_paid(&mut self.conn, id, paid)
    }

    fn update_participant_group(
        &mut self,
        id: ParticipantId,
        group: Option<Group>,
    ) -> Result<(), Self::Error> {
        mutations::roster::update_participant_group(&mut self.conn, id, group)
    }

    fn list_participants(&mut self) -> Result<Vec<Participant>, Self::Error> {
        queries::roster::list_participants(&mut self.conn)
    }

    fn insert_waitlist_entry(&mut self, entry: &WaitlistEntry) -> Result<(), Self::Error> {
        mutations::roster::insert_waitlist_entry(&mut self.conn, entry)
    }

    fn delete_waitlist_entry(&mut self, id: ParticipantId) -> Result<(), Self::Error> {
        mutations::roster::delete_waitlist_entry(&mut self.conn, id)
    }

    fn list_waitlist(&mut self) -> Result<Vec<WaitlistEntry>, Self::Error> {
        queries::roster::list_waitlist(&mut self.conn)
    }

    fn clear_rosters(&mut self) -> Result<(), Self::Error> {
        mutations::roster::clear_rosters(&mut self.conn)
    }
}

impl HistoryStore for Persistence {
    fn archive_week(&mut self, snapshot: &WeekSnapshot) -> Result<(), Self::Error> {
        mutations::history::archive_week(&mut self.conn, snapshot)
    }

    fn list_history(&mut self) -> Result<Vec<HistorySummary>, Self::Error> {
        queries::history::list_history(&mut self.conn)
    }

    fn get_week(&mut self, week: IsoWeek) -> Result<Option<WeekSnapshot>, Self::Error> {
        queries::history::get_week(&mut self.conn, week)
    }

    fn delete_week(&mut self, week: IsoWeek) -> Result<bool, Self::Error> {
        mutations::history::delete_week(&mut self.conn, week)
    }
}
