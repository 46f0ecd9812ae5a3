// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and conversions between rows and domain values.
//!
//! Booleans are stored as `0`/`1` integers and timestamps as RFC 3339 text.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rinkside_domain::{
    Contact, GameDetails, Group, IsoWeek, Participant, ParticipantId, Rating, WaitlistEntry,
    WeekSnapshot,
};

use crate::diesel_schema::{history, participants, waitlist};
use crate::error::PersistenceError;

/// A roster row.
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = participants)]
pub struct ParticipantRow {
    pub participant_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub payment_method: String,
    pub paid: i32,
    pub rating: i32,
    pub is_goalie: i32,
    pub team: Option<String>,
    pub registered_at: String,
    pub rules_agreed: i32,
}

/// A waitlist row.
#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = waitlist)]
pub struct WaitlistRow {
    pub entry_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub payment_method: String,
    pub rating: i32,
    pub is_goalie: i32,
    pub joined_at: String,
}

/// A history row as read back, without its surrogate id.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = history)]
pub struct HistoryRow {
    pub year: i32,
    pub week_number: i32,
    pub released_at: Option<String>,
    pub game_location: String,
    pub game_time: String,
    pub game_date: Option<String>,
    pub white_team_json: String,
    pub dark_team_json: String,
    pub white_avg: Option<f64>,
    pub dark_avg: Option<f64>,
}

/// A history row to write. The id is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = history)]
pub struct NewHistoryRow {
    pub year: i32,
    pub week_number: i32,
    pub released_at: Option<String>,
    pub game_location: String,
    pub game_time: String,
    pub game_date: Option<String>,
    pub white_team_json: String,
    pub dark_team_json: String,
    pub white_avg: Option<f64>,
    pub dark_avg: Option<f64>,
}

const fn flag(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

const fn is_set(value: i32) -> bool {
    value != 0
}

fn corrupt(table: &'static str, reason: impl ToString) -> PersistenceError {
    PersistenceError::CorruptRecord {
        table,
        reason: reason.to_string(),
    }
}

fn parse_timestamp(table: &'static str, value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| corrupt(table, format!("timestamp '{value}': {e}")))
}

fn parse_date(table: &'static str, value: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| corrupt(table, format!("date '{value}': {e}")))
}

/// Converts an ISO week into `(year, week_number)` column values.
///
/// # Errors
///
/// Returns an error if the week number does not fit the column.
pub fn week_columns(week: IsoWeek) -> Result<(i32, i32), PersistenceError> {
    let week_number: i32 = week
        .week
        .to_i32()
        .ok_or_else(|| corrupt("history", format!("week number {}", week.week)))?;
    Ok((week.year, week_number))
}

fn week_from_columns(year: i32, week_number: i32) -> Result<IsoWeek, PersistenceError> {
    let week: u32 = week_number
        .to_u32()
        .ok_or_else(|| corrupt("history", format!("week number {week_number}")))?;
    Ok(IsoWeek::new(year, week))
}

impl From<&Participant> for ParticipantRow {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.id.value(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            contact: p.contact.value().to_string(),
            payment_method: p.payment_method.clone(),
            paid: flag(p.paid),
            rating: i32::from(p.rating.value()),
            is_goalie: flag(p.is_goalie),
            team: p.group.map(|g| g.as_str().to_string()),
            registered_at: p.registered_at.to_rfc3339(),
            rules_agreed: flag(p.rules_agreed),
        }
    }
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = PersistenceError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "participants";
        let group: Option<Group> = row
            .team
            .as_deref()
            .map(str::parse::<Group>)
            .transpose()
            .map_err(|e| corrupt(TABLE, e))?;

        Ok(Self {
            id: ParticipantId::new(row.participant_id),
            contact: Contact::parse(&row.contact).map_err(|e| corrupt(TABLE, e))?,
            rating: Rating::new(i64::from(row.rating)).map_err(|e| corrupt(TABLE, e))?,
            registered_at: parse_timestamp(TABLE, &row.registered_at)?,
            first_name: row.first_name,
            last_name: row.last_name,
            payment_method: row.payment_method,
            is_goalie: is_set(row.is_goalie),
            paid: is_set(row.paid),
            rules_agreed: is_set(row.rules_agreed),
            group,
        })
    }
}

impl From<&WaitlistEntry> for WaitlistRow {
    fn from(w: &WaitlistEntry) -> Self {
        Self {
            entry_id: w.id.value(),
            first_name: w.first_name.clone(),
            last_name: w.last_name.clone(),
            contact: w.contact.value().to_string(),
            payment_method: w.payment_method.clone(),
            rating: i32::from(w.rating.value()),
            is_goalie: flag(w.is_goalie),
            joined_at: w.joined_at.to_rfc3339(),
        }
    }
}

impl TryFrom<WaitlistRow> for WaitlistEntry {
    type Error = PersistenceError;

    fn try_from(row: WaitlistRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "waitlist";
        Ok(Self {
            id: ParticipantId::new(row.entry_id),
            contact: Contact::parse(&row.contact).map_err(|e| corrupt(TABLE, e))?,
            rating: Rating::new(i64::from(row.rating)).map_err(|e| corrupt(TABLE, e))?,
            joined_at: parse_timestamp(TABLE, &row.joined_at)?,
            first_name: row.first_name,
            last_name: row.last_name,
            payment_method: row.payment_method,
            is_goalie: is_set(row.is_goalie),
        })
    }
}

impl TryFrom<&WeekSnapshot> for NewHistoryRow {
    type Error = PersistenceError;

    fn try_from(s: &WeekSnapshot) -> Result<Self, Self::Error> {
        let (year, week_number) = week_columns(s.week)?;
        Ok(Self {
            year,
            week_number,
            released_at: s.released_at.map(|t| t.to_rfc3339()),
            game_location: s.game.location.clone(),
            game_time: s.game.time_label.clone(),
            game_date: s.game.date.map(|d| d.format("%Y-%m-%d").to_string()),
            white_team_json: serde_json::to_string(&s.white)?,
            dark_team_json: serde_json::to_string(&s.dark)?,
            white_avg: s.white_average,
            dark_avg: s.dark_average,
        })
    }
}

impl TryFrom<HistoryRow> for WeekSnapshot {
    type Error = PersistenceError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "history";
        Ok(Self {
            week: week_from_columns(row.year, row.week_number)?,
            released_at: row
                .released_at
                .as_deref()
                .map(|t| parse_timestamp(TABLE, t))
                .transpose()?,
            game: GameDetails {
                location: row.game_location,
                time_label: row.game_time,
                date: row
                    .game_date
                    .as_deref()
                    .map(|d| parse_date(TABLE, d))
                    .transpose()?,
            },
            white: serde_json::from_str(&row.white_team_json)?,
            dark: serde_json::from_str(&row.dark_team_json)?,
            white_average: row.white_avg,
            dark_average: row.dark_avg,
        })
    }
}

/// Converts a `(year, week_number, released_at)` summary row.
///
/// # Errors
///
/// Returns an error if the row holds invalid values.
pub fn summary_from_columns(
    year: i32,
    week_number: i32,
    released_at: Option<&str>,
) -> Result<rinkside_domain::HistorySummary, PersistenceError> {
    Ok(rinkside_domain::HistorySummary {
        week: week_from_columns(year, week_number)?,
        released_at: released_at
            .map(|t| parse_timestamp("history", t))
            .transpose()?,
    })
}
