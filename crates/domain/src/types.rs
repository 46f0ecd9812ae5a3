// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum number of goalies on a weekly roster.
pub const MAX_GOALIES: usize = 2;

/// Default number of skater spots opened each week.
pub const DEFAULT_SPOTS: u32 = 20;

/// Upper bound an administrator may set the spot counter to.
pub const MAX_SPOTS: u32 = 30;

/// Unique participant identifier.
///
/// Identifiers are issued in increasing order, so sorting by id
/// reproduces registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(i64);

impl ParticipantId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Self-reported skill rating in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Creates a rating, rejecting values outside `1..=10`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is out of range.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(v) if (1..=10).contains(&v) => Ok(Self(v)),
            _ => Err(DomainError::InvalidRating(value)),
        }
    }

    /// Returns the numeric rating.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

/// A participant's contact phone number, stored as `(xxx) xxx-xxxx`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contact(String);

impl Contact {
    /// Parses a phone number containing exactly ten digits.
    ///
    /// Any non-digit characters are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContact` if the number does not
    /// contain exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 10 {
            return Err(DomainError::InvalidContact(String::from(
                "Please enter a valid 10-digit phone number",
            )));
        }
        Ok(Self(format!(
            "({}) {}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..10]
        )))
    }

    /// Returns the formatted phone number.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns only the digits, used for duplicate detection.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

/// The standing signup code. Exactly four ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupCode(String);

impl SignupCode {
    /// Parses a four-digit code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSignupCode` unless the input is exactly
    /// four ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.len() != 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidSignupCode(String::from(
                "Code must be exactly 4 digits",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derives a code in `1000..=9999` from an arbitrary seed.
    #[must_use]
    pub fn from_seed(seed: u16) -> Self {
        Self((1000 + seed % 9000).to_string())
    }

    /// Returns the code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Checks a submitted code against this one.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted.trim()
    }
}

/// One of the two weekly teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    /// The white-jersey team.
    White,
    /// The dark-jersey team.
    Dark,
}

impl Group {
    /// Returns the display name of the team.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Dark => "Dark",
        }
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "White" => Ok(Self::White),
            "Dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown team: {s}")),
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Administrator-forced gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideState {
    /// Signup requires the code regardless of the calendar.
    Locked,
    /// Signup is open regardless of the calendar.
    Open,
}

impl OverrideState {
    /// Returns the lowercase name used on the wire and in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Open => "open",
        }
    }
}

impl std::fmt::Display for OverrideState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calendar-only decision, before override or release effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructuralState {
    /// Outside the signup window.
    Locked,
    /// Inside the signup window.
    Open,
}

/// An ISO-8601 week, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IsoWeek {
    /// ISO week-numbering year.
    pub year: i32,
    /// ISO week number (1-53).
    pub week: u32,
}

impl IsoWeek {
    /// Creates a new ISO week marker.
    #[must_use]
    pub const fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }
}

impl std::fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {}, {}", self.week, self.year)
    }
}

/// Where and when the weekly game is played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetails {
    /// Rink name.
    pub location: String,
    /// Free-form start time label, e.g. "Sunday 8:30 PM".
    pub time_label: String,
    /// Calendar date of the next game.
    pub date: Option<NaiveDate>,
}

impl GameDetails {
    /// Default rink.
    pub const DEFAULT_LOCATION: &'static str = "WFCU Greenshield";
    /// Default start time label.
    pub const DEFAULT_TIME_LABEL: &'static str = "Sunday 8:30 PM";

    /// Creates the default game details for a given date.
    #[must_use]
    pub fn with_date(date: NaiveDate) -> Self {
        Self {
            location: String::from(Self::DEFAULT_LOCATION),
            time_label: String::from(Self::DEFAULT_TIME_LABEL),
            date: Some(date),
        }
    }

    /// Formats the date as e.g. "Sunday, October 18, 2026", or "TBD".
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.map_or_else(
            || String::from("TBD"),
            |d| d.format("%A, %B %-d, %Y").to_string(),
        )
    }
}

/// A registered player on this week's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique id, increasing in registration order.
    pub id: ParticipantId,
    /// First name, trimmed.
    pub first_name: String,
    /// Last name, trimmed.
    pub last_name: String,
    /// Phone number.
    pub contact: Contact,
    /// How the player intends to pay (cash, e-transfer, ...).
    pub payment_method: String,
    /// Skill rating.
    pub rating: Rating,
    /// Whether the player is a goalie (the scarce role).
    pub is_goalie: bool,
    /// Team assignment, set when the roster is released.
    pub group: Option<Group>,
    /// Whether payment has been received.
    pub paid: bool,
    /// When the player registered.
    pub registered_at: DateTime<Utc>,
    /// Whether the player accepted the game rules.
    pub rules_agreed: bool,
}

impl Participant {
    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A player waiting for a spot to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Unique id, shared with the participant id space.
    pub id: ParticipantId,
    /// First name, trimmed.
    pub first_name: String,
    /// Last name, trimmed.
    pub last_name: String,
    /// Phone number.
    pub contact: Contact,
    /// Payment method.
    pub payment_method: String,
    /// Skill rating.
    pub rating: Rating,
    /// Whether the player is a goalie.
    pub is_goalie: bool,
    /// When the player joined the waitlist.
    pub joined_at: DateTime<Utc>,
}

impl WaitlistEntry {
    /// Returns "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The released teams for one week.
///
/// Created at release and archived into history; immutable once archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSnapshot {
    /// The ISO week the roster belongs to.
    pub week: IsoWeek,
    /// When the roster was released.
    pub released_at: Option<DateTime<Utc>>,
    /// Game details at release time.
    pub game: GameDetails,
    /// White team in display order.
    pub white: Vec<Participant>,
    /// Dark team in display order.
    pub dark: Vec<Participant>,
    /// Mean rating of the white team, one decimal. `None` when empty.
    pub white_average: Option<f64>,
    /// Mean rating of the dark team, one decimal. `None` when empty.
    pub dark_average: Option<f64>,
}

impl WeekSnapshot {
    /// Returns `true` if at least one team has members.
    #[must_use]
    pub fn has_players(&self) -> bool {
        !self.white.is_empty() || !self.dark.is_empty()
    }
}

/// A row of the history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// The archived week.
    pub week: IsoWeek,
    /// When that week's roster was released.
    pub released_at: Option<DateTime<Utc>>,
}
