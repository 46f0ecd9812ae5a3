// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rinkside_domain::{Participant, WaitlistEntry};

use crate::data_models::{ParticipantRow, WaitlistRow};
use crate::diesel_schema::{participants, waitlist};
use crate::error::PersistenceError;

/// Lists the roster in registration order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_participants(
    conn: &mut SqliteConnection,
) -> Result<Vec<Participant>, PersistenceError> {
    participants::table
        .order(participants::participant_id.asc())
        .select(ParticipantRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Participant::try_from)
        .collect()
}

/// Lists the waitlist in arrival order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_waitlist(conn: &mut SqliteConnection) -> Result<Vec<WaitlistEntry>, PersistenceError> {
    waitlist::table
        .order(waitlist::entry_id.asc())
        .select(WaitlistRow::as_select())
        .load(conn)?
        .into_iter()
        .map(WaitlistEntry::try_from)
        .collect()
}
