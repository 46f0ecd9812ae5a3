// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use rinkside_domain::{HistorySummary, IsoWeek, WeekSnapshot};

use crate::data_models::{HistoryRow, summary_from_columns, week_columns};
use crate::diesel_schema::history;
use crate::error::PersistenceError;

/// Lists archived weeks, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_history(conn: &mut SqliteConnection) -> Result<Vec<HistorySummary>, PersistenceError> {
    let rows: Vec<(i32, i32, Option<String>)> = history::table
        .order((history::year.desc(), history::week_number.desc()))
        .select((history::year, history::week_number, history::released_at))
        .load(conn)?;

    rows.into_iter()
        .map(|(year, week_number, released_at)| {
            summary_from_columns(year, week_number, released_at.as_deref())
        })
        .collect()
}

/// Loads one archived week.
///
/// # Errors
///
/// Returns an error if the query fails or the row is invalid.
pub fn get_week(
    conn: &mut SqliteConnection,
    week: IsoWeek,
) -> Result<Option<WeekSnapshot>, PersistenceError> {
    let (year, week_number) = week_columns(week)?;

    history::table
        .filter(history::year.eq(year))
        .filter(history::week_number.eq(week_number))
        .select(HistoryRow::as_select())
        .first(conn)
        .optional()?
        .map(WeekSnapshot::try_from)
        .transpose()
}
