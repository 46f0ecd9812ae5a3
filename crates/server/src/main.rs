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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod scheduler;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use rinkside::{Clock, SignupDefaults, SystemClock};
use rinkside_api::{
    ActionResponse, AddPlayerRequest, AdminOverviewResponse, AdminPlayer, AdminRequest,
    AdminSecret, AdminWaitlistEntry, ApiError, AuthenticatedAdmin, GameDetailsInfo,
    GateStatusResponse, HistoryListResponse, OverrideRequest, OverrideResponse, PlayerIdRequest,
    PromoteResponse, RegisterRequest, RegisterResponse, RosterResponse, SignupService, TeamsInfo,
    TogglePaidResponse, UpdateCodeRequest, UpdateDetailsRequest, UpdateSpotsRequest,
    VerifyCodeRequest, VerifyCodeResponse, WaitlistResponse, generate_signup_code,
};
use rinkside_domain::{DEFAULT_SPOTS, MAX_SPOTS, SignupCode};
use rinkside_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::scheduler::SchedulerConfig;

/// Rinkside Server - weekly signup and team draw for Sunday night hockey
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Admin password for the admin endpoints
    #[arg(long)]
    admin_password: String,

    /// Seconds between scheduled checks
    #[arg(long)]
    tick_seconds: Option<u64>,

    /// Development mode: check the schedule every 5 seconds
    #[arg(long)]
    dev: bool,

    /// Skater spots a fresh week starts with
    #[arg(
        long,
        default_value_t = DEFAULT_SPOTS,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_SPOTS))
    )]
    default_spots: u32,

    /// Signup code for a fresh install. A random code is generated if omitted.
    #[arg(long)]
    signup_code: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The signup service.
    service: Arc<SignupService<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl AppState {
    fn authenticate(&self, password: &str) -> Result<AuthenticatedAdmin, HttpError> {
        Ok(self.service.authenticate(password)?)
    }
}

/// Handler for GET `/api/status`.
async fn handle_status(AxumState(app_state): AxumState<AppState>) -> Json<GateStatusResponse> {
    Json(app_state.service.gate_status().await)
}

/// Handler for POST `/api/verify-code`.
async fn handle_verify_code(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<VerifyCodeRequest>,
) -> Json<VerifyCodeResponse> {
    let valid: bool = app_state.service.verify_signup_code(&req.code).await;
    Json(VerifyCodeResponse { valid })
}

/// Handler for POST `/api/register`.
///
/// Places the player on the roster or, when the game is full, the waitlist.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    info!(
        first_name = %req.first_name,
        last_name = %req.last_name,
        "Handling register request"
    );
    let response: RegisterResponse = app_state.service.register_participant(req).await?;
    Ok(Json(response))
}

/// Handler for GET `/api/roster`.
async fn handle_roster(AxumState(app_state): AxumState<AppState>) -> Json<RosterResponse> {
    Json(app_state.service.roster().await)
}

/// Handler for GET `/api/waitlist`.
async fn handle_waitlist(AxumState(app_state): AxumState<AppState>) -> Json<WaitlistResponse> {
    Json(app_state.service.waitlist().await)
}

/// Handler for GET `/api/history`.
async fn handle_history_list(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HistoryListResponse>, HttpError> {
    Ok(Json(app_state.service.history_list().await?))
}

/// Handler for GET `/api/history/{year}/{week}`.
async fn handle_history_week(
    AxumState(app_state): AxumState<AppState>,
    Path((year, week)): Path<(i32, u32)>,
) -> Result<Json<TeamsInfo>, HttpError> {
    Ok(Json(app_state.service.history_week(year, week).await?))
}

/// Handler for POST `/api/admin/overview`.
async fn handle_admin_overview(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<AdminOverviewResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.admin_overview(&admin).await))
}

/// Handler for POST `/api/admin/release-roster`.
async fn handle_release_roster(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<TeamsInfo>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    info!("Handling manual roster release");
    Ok(Json(app_state.service.release_roster_now(&admin).await?))
}

/// Handler for POST `/api/admin/override`.
async fn handle_override(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<OverrideRequest>,
) -> Result<Json<OverrideResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    info!(state = %req.state, "Handling override request");
    Ok(Json(app_state.service.set_override(&admin, req.state).await?))
}

/// Handler for POST `/api/admin/clear-override`.
async fn handle_clear_override(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<OverrideResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.clear_override(&admin).await?))
}

/// Handler for POST `/api/admin/toggle-code`.
async fn handle_toggle_code(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<OverrideResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.toggle_code(&admin).await?))
}

/// Handler for POST `/api/admin/manual-reset`.
async fn handle_manual_reset(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<ActionResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    info!("Handling manual weekly reset");
    app_state.service.force_weekly_reset_for_testing(&admin).await?;
    Ok(Json(ActionResponse::new("Weekly reset complete")))
}

/// Handler for POST `/api/admin/add-player`.
async fn handle_add_player(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddPlayerRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.admin_add(&admin, req).await?))
}

/// Handler for POST `/api/admin/remove-player`.
async fn handle_remove_player(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlayerIdRequest>,
) -> Result<Json<AdminPlayer>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(
        app_state.service.remove_participant(&admin, req.id).await?,
    ))
}

/// Handler for POST `/api/admin/promote-waitlist`.
async fn handle_promote_waitlist(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlayerIdRequest>,
) -> Result<Json<PromoteResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.promote_waitlist(&admin, req.id).await?))
}

/// Handler for POST `/api/admin/remove-waitlist`.
async fn handle_remove_waitlist(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlayerIdRequest>,
) -> Result<Json<AdminWaitlistEntry>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.remove_waitlist(&admin, req.id).await?))
}

/// Handler for POST `/api/admin/toggle-paid`.
async fn handle_toggle_paid(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PlayerIdRequest>,
) -> Result<Json<TogglePaidResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(app_state.service.toggle_paid(&admin, req.id).await?))
}

/// Handler for POST `/api/admin/update-spots`.
async fn handle_update_spots(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpdateSpotsRequest>,
) -> Result<Json<ActionResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    let spots: u32 = app_state.service.update_spots(&admin, req.spots).await?;
    Ok(Json(ActionResponse::new(format!(
        "{spots} spots remaining"
    ))))
}

/// Handler for POST `/api/admin/update-code`.
async fn handle_update_code(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpdateCodeRequest>,
) -> Result<Json<ActionResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    app_state
        .service
        .update_signup_code(&admin, &req.code)
        .await?;
    Ok(Json(ActionResponse::new("Signup code updated")))
}

/// Handler for POST `/api/admin/update-details`.
async fn handle_update_details(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<UpdateDetailsRequest>,
) -> Result<Json<GameDetailsInfo>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    Ok(Json(
        app_state.service.update_game_details(&admin, req).await?,
    ))
}

/// Handler for DELETE `/api/admin/history/{year}/{week}`.
async fn handle_delete_history(
    AxumState(app_state): AxumState<AppState>,
    Path((year, week)): Path<(i32, u32)>,
    Json(req): Json<AdminRequest>,
) -> Result<Json<ActionResponse>, HttpError> {
    let admin: AuthenticatedAdmin = app_state.authenticate(&req.password)?;
    app_state.service.delete_history(&admin, year, week).await?;
    Ok(Json(ActionResponse::new(format!(
        "Deleted history for week {week}, {year}"
    ))))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(handle_status))
        .route("/api/verify-code", post(handle_verify_code))
        .route("/api/register", post(handle_register))
        .route("/api/roster", get(handle_roster))
        .route("/api/waitlist", get(handle_waitlist))
        .route("/api/history", get(handle_history_list))
        .route("/api/history/{year}/{week}", get(handle_history_week))
        .route("/api/admin/overview", post(handle_admin_overview))
        .route("/api/admin/release-roster", post(handle_release_roster))
        .route("/api/admin/override", post(handle_override))
        .route("/api/admin/clear-override", post(handle_clear_override))
        .route("/api/admin/toggle-code", post(handle_toggle_code))
        .route("/api/admin/manual-reset", post(handle_manual_reset))
        .route("/api/admin/add-player", post(handle_add_player))
        .route("/api/admin/remove-player", post(handle_remove_player))
        .route("/api/admin/promote-waitlist", post(handle_promote_waitlist))
        .route("/api/admin/remove-waitlist", post(handle_remove_waitlist))
        .route("/api/admin/toggle-paid", post(handle_toggle_paid))
        .route("/api/admin/update-spots", post(handle_update_spots))
        .route("/api/admin/update-code", post(handle_update_code))
        .route("/api/admin/update-details", post(handle_update_details))
        .route(
            "/api/admin/history/{year}/{week}",
            delete(handle_delete_history),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rinkside Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let signup_code: SignupCode = match &args.signup_code {
        Some(code) => SignupCode::parse(code)?,
        None => generate_signup_code(),
    };
    let defaults: SignupDefaults =
        SignupDefaults::new(args.default_spots, signup_code, clock.now().date_naive());
    let admin: AdminSecret = AdminSecret::new(&args.admin_password)?;

    let service: Arc<SignupService<Persistence>> = Arc::new(SignupService::load(
        persistence,
        clock,
        defaults,
        admin,
    )?);

    let scheduler_config: SchedulerConfig = SchedulerConfig::from_args(args.tick_seconds, args.dev);
    scheduler::spawn(Arc::clone(&service), scheduler_config);

    let app: Router = build_router(AppState { service });

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
