// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These types are distinct from the domain types: public views never carry
//! phone numbers or ratings, and admin views flatten the domain newtypes.

use chrono::{DateTime, NaiveDate, Utc};
use rinkside::{AdminAddRequest, GameDetailsUpdate, NewRegistration, RegistrationOutcome};
use rinkside_domain::{
    GameDetails, Group, HistorySummary, OverrideState, Participant, WaitlistEntry, WeekSnapshot,
};
use serde::{Deserialize, Serialize};

/// API request to register from the public form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub contact: String,
    /// Payment method.
    pub payment_method: String,
    /// Self-reported rating, 1 to 10.
    pub rating: i64,
    /// Whether the registrant accepted the game rules.
    #[serde(default)]
    pub rules_agreed: bool,
    /// Signup code, needed while signup is locked.
    #[serde(default)]
    pub signup_code: Option<String>,
}

impl From<RegisterRequest> for NewRegistration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            contact: request.contact,
            payment_method: request.payment_method,
            rating: request.rating,
            rules_agreed: request.rules_agreed,
            signup_code: request.signup_code,
        }
    }
}

/// API response for a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegisterResponse {
    /// The player took a roster spot.
    Accepted {
        /// The new player's id.
        participant_id: i64,
        /// The player's full name.
        name: String,
        /// A success message.
        message: String,
    },
    /// The roster was full and the player joined the waitlist.
    Waitlisted {
        /// The new waitlist entry's id.
        entry_id: i64,
        /// The player's full name.
        name: String,
        /// One-based waitlist position.
        position: usize,
        /// A success message.
        message: String,
    },
}

impl From<RegistrationOutcome> for RegisterResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        match outcome {
            RegistrationOutcome::Accepted { participant } => Self::Accepted {
                participant_id: participant.id.value(),
                name: participant.full_name(),
                message: format!("{} is registered for Sunday", participant.full_name()),
            },
            RegistrationOutcome::Waitlisted { entry, position } => Self::Waitlisted {
                entry_id: entry.id.value(),
                name: entry.full_name(),
                position,
                message: format!(
                    "The game is full. {} is number {position} on the waitlist",
                    entry.full_name()
                ),
            },
        }
    }
}

/// API request to check a signup code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyCodeRequest {
    /// The submitted code.
    pub code: String,
}

/// API response for a signup code check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    /// Whether the code unlocks registration.
    pub valid: bool,
}

/// Game details as shown to players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetailsInfo {
    /// Rink name.
    pub location: String,
    /// Start time label.
    pub time_label: String,
    /// Game date, if known.
    pub date: Option<NaiveDate>,
    /// Display form of the date.
    pub formatted_date: String,
}

impl From<&GameDetails> for GameDetailsInfo {
    fn from(game: &GameDetails) -> Self {
        Self {
            location: game.location.clone(),
            time_label: game.time_label.clone(),
            date: game.date,
            formatted_date: game.formatted_date(),
        }
    }
}

/// API response describing the signup gate and roster counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStatusResponse {
    /// Whether registration needs the signup code.
    pub require_code: bool,
    /// Whether the calendar alone would lock signup now.
    pub is_structurally_locked: bool,
    /// Active admin override.
    pub override_state: Option<OverrideState>,
    /// Whether this week's teams are published.
    pub roster_released: bool,
    /// Remaining skater spots.
    pub spots_remaining: u32,
    /// Registered goalies.
    pub goalie_count: usize,
    /// Goalie spots per game.
    pub max_goalies: usize,
    /// Registered players.
    pub total_players: usize,
    /// Players on the waitlist.
    pub waitlist_count: usize,
    /// Whether new registrations go to the waitlist.
    pub is_full: bool,
    /// Next game.
    pub game: GameDetailsInfo,
    /// Current ISO year.
    pub year: i32,
    /// Current ISO week.
    pub week: u32,
}

/// A player as shown on the public roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPlayer {
    /// Full name.
    pub name: String,
    /// Whether the player is a goalie.
    pub is_goalie: bool,
}

impl From<&Participant> for RosterPlayer {
    fn from(participant: &Participant) -> Self {
        Self {
            name: participant.full_name(),
            is_goalie: participant.is_goalie,
        }
    }
}

/// Released teams for one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsInfo {
    /// ISO year.
    pub year: i32,
    /// ISO week.
    pub week: u32,
    /// When the teams were published.
    pub released_at: Option<DateTime<Utc>>,
    /// Game the teams were drawn for.
    pub game: GameDetailsInfo,
    /// White team, goalies first.
    pub white: Vec<RosterPlayer>,
    /// Dark team, goalies first.
    pub dark: Vec<RosterPlayer>,
    /// Mean rating of the white team.
    pub white_average: Option<f64>,
    /// Mean rating of the dark team.
    pub dark_average: Option<f64>,
}

impl From<&WeekSnapshot> for TeamsInfo {
    fn from(snapshot: &WeekSnapshot) -> Self {
        Self {
            year: snapshot.week.year,
            week: snapshot.week.week,
            released_at: snapshot.released_at,
            game: GameDetailsInfo::from(&snapshot.game),
            white: snapshot.white.iter().map(RosterPlayer::from).collect(),
            dark: snapshot.dark.iter().map(RosterPlayer::from).collect(),
            white_average: snapshot.white_average,
            dark_average: snapshot.dark_average,
        }
    }
}

/// API response for the public roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    /// Whether teams are published.
    pub released: bool,
    /// Registered players in registration order.
    pub players: Vec<RosterPlayer>,
    /// The published teams, once released.
    pub teams: Option<TeamsInfo>,
}

/// A waitlist entry as shown publicly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistPosition {
    /// One-based position.
    pub position: usize,
    /// Full name.
    pub name: String,
    /// Whether the player is a goalie.
    pub is_goalie: bool,
}

/// API response for the public waitlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistResponse {
    /// Waiting players in arrival order.
    pub entries: Vec<WaitlistPosition>,
}

/// One archived week in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// ISO year.
    pub year: i32,
    /// ISO week.
    pub week: u32,
    /// Display label, e.g. `Week 42, 2026`.
    pub label: String,
    /// When the teams were published.
    pub released_at: Option<DateTime<Utc>>,
}

impl From<&HistorySummary> for HistoryItem {
    fn from(summary: &HistorySummary) -> Self {
        Self {
            year: summary.week.year,
            week: summary.week.week,
            label: summary.week.to_string(),
            released_at: summary.released_at,
        }
    }
}

/// API response listing archived weeks, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryListResponse {
    /// Archived weeks.
    pub weeks: Vec<HistoryItem>,
}

/// A player as shown to the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPlayer {
    /// Player id.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number as entered.
    pub contact: String,
    /// Payment method.
    pub payment_method: String,
    /// Rating.
    pub rating: u8,
    /// Whether the player is a goalie.
    pub is_goalie: bool,
    /// Team, once released.
    pub group: Option<Group>,
    /// Whether the player has paid.
    pub paid: bool,
    /// Registration instant.
    pub registered_at: DateTime<Utc>,
    /// Whether the player accepted the game rules.
    pub rules_agreed: bool,
}

impl From<&Participant> for AdminPlayer {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id.value(),
            first_name: participant.first_name.clone(),
            last_name: participant.last_name.clone(),
            contact: participant.contact.value().to_string(),
            payment_method: participant.payment_method.clone(),
            rating: participant.rating.value(),
            is_goalie: participant.is_goalie,
            group: participant.group,
            paid: participant.paid,
            registered_at: participant.registered_at,
            rules_agreed: participant.rules_agreed,
        }
    }
}

/// A waitlist entry as shown to the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminWaitlistEntry {
    /// Entry id.
    pub id: i64,
    /// One-based position.
    pub position: usize,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number as entered.
    pub contact: String,
    /// Payment method.
    pub payment_method: String,
    /// Rating.
    pub rating: u8,
    /// Whether the player is a goalie.
    pub is_goalie: bool,
    /// When the player joined the waitlist.
    pub joined_at: DateTime<Utc>,
}

impl AdminWaitlistEntry {
    /// Builds the admin view of an entry at a one-based position.
    #[must_use]
    pub fn new(position: usize, entry: &WaitlistEntry) -> Self {
        Self {
            id: entry.id.value(),
            position,
            first_name: entry.first_name.clone(),
            last_name: entry.last_name.clone(),
            contact: entry.contact.value().to_string(),
            payment_method: entry.payment_method.clone(),
            rating: entry.rating.value(),
            is_goalie: entry.is_goalie,
            joined_at: entry.joined_at,
        }
    }
}

/// API response for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOverviewResponse {
    /// Gate and counts.
    pub status: GateStatusResponse,
    /// The current signup code.
    pub signup_code: String,
    /// Registered players in registration order.
    pub participants: Vec<AdminPlayer>,
    /// Waiting players in arrival order.
    pub waitlist: Vec<AdminWaitlistEntry>,
    /// The published teams, once released.
    pub teams: Option<TeamsInfo>,
}

/// API request carrying only the admin password.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminRequest {
    /// Admin password.
    pub password: String,
}

/// API request to set the signup override.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverrideRequest {
    /// Admin password.
    pub password: String,
    /// The override to apply.
    pub state: OverrideState,
}

/// API response after changing the override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideResponse {
    /// The active override, if any.
    pub override_state: Option<OverrideState>,
    /// Whether registration now needs the signup code.
    pub require_code: bool,
}

/// API request to add a player by hand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddPlayerRequest {
    /// Admin password.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number.
    pub contact: String,
    /// Payment method; cash when absent.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Rating, 1 to 10.
    pub rating: i64,
    /// Whether the player is a goalie.
    #[serde(default)]
    pub is_goalie: bool,
    /// Add to the waitlist instead of the roster.
    #[serde(default)]
    pub to_waitlist: bool,
}

impl From<AddPlayerRequest> for AdminAddRequest {
    fn from(request: AddPlayerRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            contact: request.contact,
            payment_method: request.payment_method,
            rating: request.rating,
            is_goalie: request.is_goalie,
            to_waitlist: request.to_waitlist,
        }
    }
}

/// API request naming one player or waitlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerIdRequest {
    /// Admin password.
    pub password: String,
    /// Player or waitlist entry id.
    pub id: i64,
}

/// API response after a waitlist promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoteResponse {
    /// The promoted player.
    pub participant: AdminPlayer,
    /// Whether the roster is now over capacity.
    pub over_capacity: bool,
}

/// API response after toggling a payment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePaidResponse {
    /// Player id.
    pub id: i64,
    /// The new payment flag.
    pub paid: bool,
}

/// API request to set the remaining spot count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateSpotsRequest {
    /// Admin password.
    pub password: String,
    /// New spot count, 0 to 30.
    pub spots: i64,
}

/// API request to change the signup code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCodeRequest {
    /// Admin password.
    pub password: String,
    /// New four-digit code.
    pub code: String,
}

/// API request to edit the game details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateDetailsRequest {
    /// Admin password.
    pub password: String,
    /// New rink name.
    #[serde(default)]
    pub location: Option<String>,
    /// New start time label.
    #[serde(default)]
    pub time_label: Option<String>,
    /// New date as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

impl From<UpdateDetailsRequest> for GameDetailsUpdate {
    fn from(request: UpdateDetailsRequest) -> Self {
        Self {
            location: request.location,
            time_label: request.time_label,
            date: request.date,
        }
    }
}

/// Generic API response for admin actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// A human-readable result.
    pub message: String,
}

impl ActionResponse {
    /// Creates a response with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
