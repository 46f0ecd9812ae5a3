// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Balanced team generation.
//!
//! Splits the week's participants into the White and Dark teams.
//!
//! ## Allocation Rules
//!
//! 1. Goalies and skaters are each sorted by case-insensitive full name,
//!    ties broken by registration order
//! 2. With two or more goalies the first goes to White and the second to
//!    Dark; a single goalie goes to White
//! 3. Goalies beyond the second are folded into the skater pool
//! 4. Skaters are dealt alternately, starting with the smaller team; the turn
//!    is forced to the smaller team whenever the sizes differ by more than one
//! 5. Each team is displayed goalies first, then alphabetically
//!
//! ## Invariants
//!
//! - No randomness: the same participants always produce the same teams
//! - Every participant is placed on exactly one team
//! - With at most one goalie, team sizes differ by at most one

use crate::types::{Group, Participant};
use std::cmp::Ordering;

/// The outcome of a team allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// White team in display order, each member's `group` set to `White`.
    pub white: Vec<Participant>,
    /// Dark team in display order, each member's `group` set to `Dark`.
    pub dark: Vec<Participant>,
    /// Mean white rating rounded to one decimal; `None` for an empty team.
    pub white_average: Option<f64>,
    /// Mean dark rating rounded to one decimal; `None` for an empty team.
    pub dark_average: Option<f64>,
}

impl Allocation {
    /// Returns the team each participant was placed on.
    #[must_use]
    pub fn assignments(&self) -> Vec<(crate::types::ParticipantId, Group)> {
        self.white
            .iter()
            .map(|p| (p.id, Group::White))
            .chain(self.dark.iter().map(|p| (p.id, Group::Dark)))
            .collect()
    }
}

/// Allocates participants into two balanced teams.
///
/// # Arguments
///
/// * `participants` - Everyone on this week's roster, in any order
///
/// # Returns
///
/// The two teams in display order together with their average ratings.
#[must_use]
pub fn allocate(participants: &[Participant]) -> Allocation {
    let (mut goalies, mut skaters): (Vec<&Participant>, Vec<&Participant>) =
        participants.iter().partition(|p| p.is_goalie);
    goalies.sort_by(|a, b| compare_by_name(a, b));

    let mut white: Vec<Participant> = Vec::new();
    let mut dark: Vec<Participant> = Vec::new();

    let mut goalies = goalies.into_iter();
    if let Some(first) = goalies.next() {
        white.push(first.clone());
    }
    if let Some(second) = goalies.next() {
        dark.push(second.clone());
    }
    // Extra goalies are balanced like everyone else
    skaters.extend(goalies);
    skaters.sort_by(|a, b| compare_by_name(a, b));

    let mut white_turn = white.len() <= dark.len();
    for skater in skaters {
        if white_turn {
            white.push(skater.clone());
        } else {
            dark.push(skater.clone());
        }

        white_turn = !white_turn;

        if white.len().abs_diff(dark.len()) > 1 {
            white_turn = white.len() < dark.len();
        }
    }

    let white = finish_team(white, Group::White);
    let dark = finish_team(dark, Group::Dark);

    Allocation {
        white_average: average_rating(&white),
        dark_average: average_rating(&dark),
        white,
        dark,
    }
}

/// Mean rating rounded to one decimal, or `None` for an empty team.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(team: &[Participant]) -> Option<f64> {
    if team.is_empty() {
        return None;
    }
    let sum: u32 = team.iter().map(|p| u32::from(p.rating.value())).sum();
    let mean = f64::from(sum) / team.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

/// Sets the group on every member and sorts the team for display.
fn finish_team(mut team: Vec<Participant>, group: Group) -> Vec<Participant> {
    for member in &mut team {
        member.group = Some(group);
    }
    team.sort_by(compare_for_display);
    team
}

/// Goalies first, then by name.
fn compare_for_display(a: &Participant, b: &Participant) -> Ordering {
    b.is_goalie
        .cmp(&a.is_goalie)
        .then_with(|| compare_by_name(a, b))
}

/// Case-insensitive full name, then registration order.
fn compare_by_name(a: &Participant, b: &Participant) -> Ordering {
    a.full_name()
        .to_lowercase()
        .cmp(&b.full_name().to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}
