// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rinkside_domain::{Group, Participant, ParticipantId, WaitlistEntry};
use tracing::{debug, info};

use crate::data_models::{ParticipantRow, WaitlistRow};
use crate::diesel_schema::{participants, waitlist};
use crate::error::PersistenceError;

/// Inserts a roster row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_participant(
    conn: &mut SqliteConnection,
    participant: &Participant,
) -> Result<(), PersistenceError> {
    diesel::insert_into(participants::table)
        .values(ParticipantRow::from(participant))
        .execute(conn)?;
    debug!(id = %participant.id, "Inserted participant");
    Ok(())
}

/// Deletes a roster row, if present.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_participant(
    conn: &mut SqliteConnection,
    id: ParticipantId,
) -> Result<(), PersistenceError> {
    diesel::delete(participants::table.filter(participants::participant_id.eq(id.value())))
        .execute(conn)?;
    Ok(())
}

/// Sets the payment flag on a roster row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_participant_paid(
    conn: &mut SqliteConnection,
    id: ParticipantId,
    paid: bool,
) -> Result<(), PersistenceError> {
    diesel::update(participants::table.filter(participants::participant_id.eq(id.value())))
        .set(participants::paid.eq(i32::from(paid)))
        .execute(conn)?;
    Ok(())
}

/// Sets the team on a roster row.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_participant_group(
    conn: &mut SqliteConnection,
    id: ParticipantId,
    group: Option<Group>,
) -> Result<(), PersistenceError> {
    diesel::update(participants::table.filter(participants::participant_id.eq(id.value())))
        .set(participants::team.eq(group.map(|g| g.as_str())))
        .execute(conn)?;
    Ok(())
}

/// Inserts a waitlist row.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_waitlist_entry(
    conn: &mut SqliteConnection,
    entry: &WaitlistEntry,
) -> Result<(), PersistenceError> {
    diesel::insert_into(waitlist::table)
        .values(WaitlistRow::from(entry))
        .execute(conn)?;
    debug!(id = %entry.id, "Inserted waitlist entry");
    Ok(())
}

/// Deletes a waitlist row, if present.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_waitlist_entry(
    conn: &mut SqliteConnection,
    id: ParticipantId,
) -> Result<(), PersistenceError> {
    diesel::delete(waitlist::table.filter(waitlist::entry_id.eq(id.value()))).execute(conn)?;
    Ok(())
}

/// Empties the roster and the waitlist in one transaction.
///
/// # Errors
///
/// Returns an error if either delete fails.
pub fn clear_rosters(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let (players, waiting) = conn.transaction::<_, PersistenceError, _>(|conn| {
        let players: usize = diesel::delete(participants::table).execute(conn)?;
        let waiting: usize = diesel::delete(waitlist::table).execute(conn)?;
        Ok((players, waiting))
    })?;
    info!(players, waiting, "Cleared roster and waitlist");
    Ok(())
}
