// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod clock;
mod effect;
mod error;
mod lifecycle;
mod registration;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use clock::{Clock, ManualClock, SystemClock};
pub use effect::{Effect, Transition};
pub use error::CoreError;
pub use lifecycle::{
    auto_release_roster, clear_override, evaluate_gate, force_weekly_reset, release_roster_now,
    set_override, tick, toggle_override, weekly_reset,
};
pub use registration::{
    AdminAddRequest, DEFAULT_ADMIN_PAYMENT_METHOD, GameDetailsUpdate, NewRegistration, Promotion,
    RegistrationOutcome, admin_add, promote_waitlist, register_participant, remove_participant,
    remove_waitlist, toggle_paid, update_game_details, update_signup_code, update_spots,
    verify_signup_code,
};
pub use state::{GateState, PersistedSettings, SignupDefaults, SignupState};
pub use store::{
    HistoryStore, LoadedState, MemoryStore, MemoryStoreError, RosterStore, SettingsStore,
    SignupStore, Store,
};
