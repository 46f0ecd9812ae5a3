// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rinkside_domain::{IsoWeek, WeekSnapshot};
use tracing::info;

use crate::data_models::{NewHistoryRow, week_columns};
use crate::diesel_schema::history;
use crate::error::PersistenceError;

/// Writes a week to history, replacing any row for the same week.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn archive_week(
    conn: &mut SqliteConnection,
    snapshot: &WeekSnapshot,
) -> Result<(), PersistenceError> {
    let row: NewHistoryRow = NewHistoryRow::try_from(snapshot)?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(
            history::table
                .filter(history::year.eq(row.year))
                .filter(history::week_number.eq(row.week_number)),
        )
        .execute(conn)?;
        diesel::insert_into(history::table)
            .values(&row)
            .execute(conn)?;
        Ok(())
    })?;

    info!(week = %snapshot.week, "Archived week");
    Ok(())
}

/// Deletes one archived week.
///
/// # Returns
///
/// `true` if a row was deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_week(conn: &mut SqliteConnection, week: IsoWeek) -> Result<bool, PersistenceError> {
    let (year, week_number) = week_columns(week)?;
    let deleted: usize = diesel::delete(
        history::table
            .filter(history::year.eq(year))
            .filter(history::week_number.eq(week_number)),
    )
    .execute(conn)?;

    info!(%week, deleted, "Deleted archived week");
    Ok(deleted > 0)
}
