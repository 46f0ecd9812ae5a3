// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for Rinkside.
//!
//! This crate turns requests into core transitions and core results into
//! response DTOs. It owns the signup state lock, applies store writes, and
//! checks the admin password.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod request_response;
mod service;

#[cfg(test)]
mod tests;

pub use auth::{AdminSecret, AuthenticatedAdmin, generate_signup_code};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use request_response::{
    ActionResponse, AddPlayerRequest, AdminOverviewResponse, AdminPlayer, AdminRequest,
    AdminWaitlistEntry, GameDetailsInfo, GateStatusResponse, HistoryItem, HistoryListResponse,
    OverrideRequest, OverrideResponse, PlayerIdRequest, PromoteResponse, RegisterRequest,
    RegisterResponse, RosterPlayer, RosterResponse, TeamsInfo, TogglePaidResponse,
    UpdateCodeRequest, UpdateDetailsRequest, UpdateSpotsRequest, VerifyCodeRequest,
    VerifyCodeResponse, WaitlistPosition, WaitlistResponse,
};
pub use service::{ScheduledCheckReport, SignupService};
