// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration and roster administration.
//!
//! Every operation validates its input completely before touching state;
//! a rejected request leaves the state unchanged.

use crate::effect::{Effect, Transition};
use crate::error::CoreError;
use crate::state::SignupState;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rinkside_domain::{
    Contact, DomainError, MAX_GOALIES, Participant, ParticipantId, Rating, SignupCode,
    WaitlistEntry, parse_game_date, validate_name, validate_payment_method, validate_spot_count,
    validate_unique_participant,
};
use tracing::info;

/// Payment method recorded when an administrator does not name one.
pub const DEFAULT_ADMIN_PAYMENT_METHOD: &str = "Cash";

/// A public registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number, any formatting.
    pub contact: String,
    /// Payment method.
    pub payment_method: String,
    /// Self-reported rating.
    pub rating: i64,
    /// Whether the registrant accepted the game rules.
    pub rules_agreed: bool,
    /// The signup code, needed while signup is locked.
    pub signup_code: Option<String>,
}

/// A player added directly by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAddRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number, any formatting.
    pub contact: String,
    /// Payment method; defaults to cash.
    pub payment_method: Option<String>,
    /// Rating.
    pub rating: i64,
    /// Whether the player is a goalie.
    pub is_goalie: bool,
    /// Place the player on the waitlist instead of the roster.
    pub to_waitlist: bool,
}

/// Partial update of the game details. Blank fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDetailsUpdate {
    /// New rink name.
    pub location: Option<String>,
    /// New start time label.
    pub time_label: Option<String>,
    /// New date as `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Where a registration ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The player took a spot on the roster.
    Accepted {
        /// The new roster entry.
        participant: Participant,
    },
    /// The roster was full; the player joined the waitlist.
    Waitlisted {
        /// The new waitlist entry.
        entry: WaitlistEntry,
        /// One-based position in the waitlist.
        position: usize,
    },
}

/// The result of moving a player off the waitlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// The new roster entry.
    pub participant: Participant,
    /// `true` if no spot was free, so the roster is now over capacity.
    pub over_capacity: bool,
}

/// Player fields that passed validation.
struct ValidatedPlayer {
    first_name: String,
    last_name: String,
    contact: Contact,
    payment_method: String,
    rating: Rating,
}

fn validate_player(
    state: &SignupState,
    first_name: &str,
    last_name: &str,
    contact: &str,
    payment_method: &str,
    rating: i64,
) -> Result<ValidatedPlayer, DomainError> {
    let first_name: String = validate_name("First name", first_name)?;
    let last_name: String = validate_name("Last name", last_name)?;
    let contact: Contact = Contact::parse(contact)?;
    let payment_method: String = validate_payment_method(payment_method)?;
    let rating: Rating = Rating::new(rating)?;

    validate_unique_participant(
        &first_name,
        &last_name,
        &contact,
        &state.participants,
        &state.waitlist,
    )?;

    Ok(ValidatedPlayer {
        first_name,
        last_name,
        contact,
        payment_method,
        rating,
    })
}

/// Checks a submitted signup code.
///
/// Always `true` while signup is open.
#[must_use]
pub fn verify_signup_code(state: &SignupState, code: &str) -> bool {
    !state.gate.require_code || state.signup_code.matches(code)
}

/// Registers a player from the public form.
///
/// The gate must be open or the correct code supplied. If a spot is free
/// the player joins the roster and the spot is taken; otherwise the player
/// joins the waitlist. Public registrations are never goalies.
///
/// # Arguments
///
/// * `state` - The signup state, with the gate already brought up to date
/// * `now` - The current instant
/// * `request` - The registration form
///
/// # Errors
///
/// Returns an error if:
/// - Signup is locked and the code is missing or wrong
/// - Any field is invalid, or the player is already registered
/// - A spot is free but the rules were not accepted
pub fn register_participant(
    state: &mut SignupState,
    now: &DateTime<Tz>,
    request: NewRegistration,
) -> Result<(RegistrationOutcome, Transition), CoreError> {
    if state.gate.require_code {
        let code_ok: bool = request
            .signup_code
            .as_deref()
            .is_some_and(|code| state.signup_code.matches(code));
        if !code_ok {
            return Err(CoreError::SignupCodeRequired);
        }
    }

    let player: ValidatedPlayer = validate_player(
        state,
        &request.first_name,
        &request.last_name,
        &request.contact,
        &request.payment_method,
        request.rating,
    )?;

    if state.spots_remaining > 0 && !request.rules_agreed {
        return Err(CoreError::RulesNotAccepted);
    }

    let now_utc: DateTime<Utc> = now.with_timezone(&Utc);
    let id: ParticipantId = state.next_participant_id(now_utc);

    if state.spots_remaining == 0 {
        return Ok(join_waitlist(state, id, player, false, now_utc));
    }

    let participant: Participant = Participant {
        id,
        first_name: player.first_name,
        last_name: player.last_name,
        contact: player.contact,
        payment_method: player.payment_method,
        rating: player.rating,
        is_goalie: false,
        group: None,
        paid: false,
        registered_at: now_utc,
        rules_agreed: true,
    };

    state.participants.push(participant.clone());
    state.spots_remaining -= 1;

    info!(
        id = %participant.id,
        name = %participant.full_name(),
        spots_remaining = state.spots_remaining,
        "Player registered"
    );

    let transition: Transition = Transition::applied(vec![
        Effect::InsertParticipant(participant.clone()),
        Effect::SaveSettings(state.to_settings()),
    ]);
    Ok((RegistrationOutcome::Accepted { participant }, transition))
}

fn join_waitlist(
    state: &mut SignupState,
    id: ParticipantId,
    player: ValidatedPlayer,
    is_goalie: bool,
    now: DateTime<Utc>,
) -> (RegistrationOutcome, Transition) {
    let entry: WaitlistEntry = WaitlistEntry {
        id,
        first_name: player.first_name,
        last_name: player.last_name,
        contact: player.contact,
        payment_method: player.payment_method,
        rating: player.rating,
        is_goalie,
        joined_at: now,
    };

    state.waitlist.push(entry.clone());
    let position: usize = state.waitlist.len();

    info!(id = %entry.id, name = %entry.full_name(), position, "Player waitlisted");

    let transition: Transition =
        Transition::applied(vec![Effect::InsertWaitlistEntry(entry.clone())]);
    (RegistrationOutcome::Waitlisted { entry, position }, transition)
}

/// Adds a player on behalf of an administrator.
///
/// Goalies are marked paid and do not take a spot, up to [`MAX_GOALIES`].
/// Skaters take a spot when one is free; otherwise the roster goes over
/// capacity.
///
/// # Errors
///
/// Returns an error if any field is invalid, the player is already
/// registered, or both goalie spots are taken.
pub fn admin_add(
    state: &mut SignupState,
    now: &DateTime<Tz>,
    request: AdminAddRequest,
) -> Result<(RegistrationOutcome, Transition), CoreError> {
    let payment_method: &str = request
        .payment_method
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(DEFAULT_ADMIN_PAYMENT_METHOD);

    let player: ValidatedPlayer = validate_player(
        state,
        &request.first_name,
        &request.last_name,
        &request.contact,
        payment_method,
        request.rating,
    )?;

    if !request.to_waitlist && request.is_goalie && state.goalie_count() >= MAX_GOALIES {
        return Err(DomainError::GoalieLimitReached { max: MAX_GOALIES }.into());
    }

    let now_utc: DateTime<Utc> = now.with_timezone(&Utc);
    let id: ParticipantId = state.next_participant_id(now_utc);

    if request.to_waitlist {
        return Ok(join_waitlist(state, id, player, request.is_goalie, now_utc));
    }

    let participant: Participant = Participant {
        id,
        first_name: player.first_name,
        last_name: player.last_name,
        contact: player.contact,
        payment_method: player.payment_method,
        rating: player.rating,
        is_goalie: request.is_goalie,
        group: None,
        paid: request.is_goalie,
        registered_at: now_utc,
        rules_agreed: false,
    };

    let mut effects: Vec<Effect> = vec![Effect::InsertParticipant(participant.clone())];
    if !participant.is_goalie {
        state.take_spot();
        effects.push(Effect::SaveSettings(state.to_settings()));
    }
    state.participants.push(participant.clone());

    info!(
        id = %participant.id,
        name = %participant.full_name(),
        is_goalie = participant.is_goalie,
        spots_remaining = state.spots_remaining,
        "Player added by admin"
    );

    Ok((
        RegistrationOutcome::Accepted { participant },
        Transition::applied(effects),
    ))
}

/// Moves a waitlisted player onto the roster, keeping their id.
///
/// A skater takes a spot if one is free; if none is, the promotion still
/// happens and is reported as over capacity. A goalie takes no spot.
/// Promoted players start unpaid.
///
/// # Errors
///
/// Returns an error if the entry does not exist or a goalie would exceed
/// [`MAX_GOALIES`].
pub fn promote_waitlist(
    state: &mut SignupState,
    now: &DateTime<Tz>,
    id: ParticipantId,
) -> Result<(Promotion, Transition), CoreError> {
    let index: usize = state
        .waitlist
        .iter()
        .position(|w| w.id == id)
        .ok_or(CoreError::WaitlistEntryNotFound(id))?;

    if state.waitlist[index].is_goalie && state.goalie_count() >= MAX_GOALIES {
        return Err(DomainError::GoalieLimitReached { max: MAX_GOALIES }.into());
    }

    let entry: WaitlistEntry = state.waitlist.remove(index);
    let participant: Participant = Participant {
        id: entry.id,
        first_name: entry.first_name,
        last_name: entry.last_name,
        contact: entry.contact,
        payment_method: entry.payment_method,
        rating: entry.rating,
        is_goalie: entry.is_goalie,
        group: None,
        paid: false,
        registered_at: now.with_timezone(&Utc),
        rules_agreed: false,
    };

    let over_capacity: bool = !participant.is_goalie && state.take_spot();
    state.participants.push(participant.clone());

    info!(
        id = %participant.id,
        name = %participant.full_name(),
        over_capacity,
        spots_remaining = state.spots_remaining,
        "Player promoted from waitlist"
    );

    let transition: Transition = Transition::applied(vec![
        Effect::DeleteWaitlistEntry(id),
        Effect::InsertParticipant(participant.clone()),
        Effect::SaveSettings(state.to_settings()),
    ]);
    Ok((
        Promotion {
            participant,
            over_capacity,
        },
        transition,
    ))
}

/// Removes a player from the waitlist.
///
/// # Errors
///
/// Returns `CoreError::WaitlistEntryNotFound` if the entry does not exist.
pub fn remove_waitlist(
    state: &mut SignupState,
    id: ParticipantId,
) -> Result<(WaitlistEntry, Transition), CoreError> {
    let index: usize = state
        .waitlist
        .iter()
        .position(|w| w.id == id)
        .ok_or(CoreError::WaitlistEntryNotFound(id))?;
    let entry: WaitlistEntry = state.waitlist.remove(index);

    info!(id = %entry.id, name = %entry.full_name(), "Waitlist entry removed");
    Ok((
        entry,
        Transition::applied(vec![Effect::DeleteWaitlistEntry(id)]),
    ))
}

/// Removes a player from the roster. A skater's spot is freed.
///
/// # Errors
///
/// Returns `CoreError::ParticipantNotFound` if the player does not exist.
pub fn remove_participant(
    state: &mut SignupState,
    id: ParticipantId,
) -> Result<(Participant, Transition), CoreError> {
    let index: usize = state
        .participants
        .iter()
        .position(|p| p.id == id)
        .ok_or(CoreError::ParticipantNotFound(id))?;
    let participant: Participant = state.participants.remove(index);

    let mut effects: Vec<Effect> = vec![Effect::DeleteParticipant(id)];
    if !participant.is_goalie {
        state.release_spot();
        effects.push(Effect::SaveSettings(state.to_settings()));
    }

    info!(
        id = %participant.id,
        name = %participant.full_name(),
        spots_remaining = state.spots_remaining,
        "Player removed"
    );
    Ok((participant, Transition::applied(effects)))
}

/// Flips a player's payment status.
///
/// # Returns
///
/// The new payment status and the transition.
///
/// # Errors
///
/// Returns `CoreError::ParticipantNotFound` if the player does not exist.
pub fn toggle_paid(
    state: &mut SignupState,
    id: ParticipantId,
) -> Result<(bool, Transition), CoreError> {
    let participant: &mut Participant = state
        .participants
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(CoreError::ParticipantNotFound(id))?;
    participant.paid = !participant.paid;
    let paid: bool = participant.paid;

    info!(%id, paid, "Payment status changed");
    Ok((
        paid,
        Transition::applied(vec![Effect::UpdatePaid { id, paid }]),
    ))
}

/// Sets the number of free skater spots.
///
/// # Errors
///
/// Returns an error unless `0 <= count <= MAX_SPOTS`.
pub fn update_spots(state: &mut SignupState, count: i64) -> Result<Transition, CoreError> {
    let spots: u32 = validate_spot_count(count)?;
    state.spots_remaining = spots;
    // An explicit count replaces any over-capacity bookkeeping
    state.over_capacity = 0;

    info!(spots, "Spot count updated");
    Ok(Transition::applied(vec![Effect::SaveSettings(
        state.to_settings(),
    )]))
}

/// Replaces the signup code.
///
/// # Errors
///
/// Returns an error unless the code is exactly four digits.
pub fn update_signup_code(state: &mut SignupState, code: &str) -> Result<Transition, CoreError> {
    let code: SignupCode = SignupCode::parse(code)?;
    state.signup_code = code;

    info!("Signup code updated");
    Ok(Transition::applied(vec![Effect::SaveSettings(
        state.to_settings(),
    )]))
}

/// Updates the game details. Blank fields keep their current value.
///
/// # Errors
///
/// Returns an error if a non-blank date does not parse.
pub fn update_game_details(
    state: &mut SignupState,
    update: GameDetailsUpdate,
) -> Result<Transition, CoreError> {
    let non_blank = |value: Option<String>| -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let date: Option<NaiveDate> = non_blank(update.date)
        .map(|d| parse_game_date(&d))
        .transpose()?;

    if let Some(location) = non_blank(update.location) {
        state.game.location = location;
    }
    if let Some(time_label) = non_blank(update.time_label) {
        state.game.time_label = time_label;
    }
    if date.is_some() {
        state.game.date = date;
    }

    info!(
        location = %state.game.location,
        time = %state.game.time_label,
        date = %state.game.formatted_date(),
        "Game details updated"
    );
    Ok(Transition::applied(vec![Effect::SaveSettings(
        state.to_settings(),
    )]))
}
