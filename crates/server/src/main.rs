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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use clinic_schedule::{Clock, DEFAULT_SCHEDULE_PATTERN, ScheduleInitializer, SystemClock};
use clinic_schedule_api::{
    ApiError, AssignmentInfo, CreateOverrideRequest, DoctorInfo, FieldError,
    InitializationResponse, OverrideInfo, RegisterDoctorRequest, SetDoctorStatusRequest,
    SetSchedulePatternRequest, StatusResponse, UpdateOverrideRequest, create_override,
    delete_override_for_date, get_assignment, get_calendar, get_override_for_date,
    initialize_schedules, list_doctors, list_overrides, register_doctor, remove_doctor_schedule,
    set_doctor_schedule, set_doctor_status, update_override,
};
use clinic_schedule_domain::ClinicTimezone;
use clinic_schedule_persistence::SqlitePersistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Clinic Schedule Server - HTTP server for the clinic doctor schedule
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone of the clinic, used to decide what "today" is
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Pattern given to doctors without one by bulk initialization
    #[arg(long, default_value = DEFAULT_SCHEDULE_PATTERN)]
    default_pattern: String,
}

/// Application state shared across handlers.
///
/// Handlers lock the persistence layer for the length of one use case, so
/// writes are serialized within the process.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for doctors, patterns and overrides.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Source of "now" and the clinic-local date.
    clock: Arc<dyn Clock + Send + Sync>,
    /// Bulk initialization with the configured default pattern.
    initializer: Arc<ScheduleInitializer>,
}

/// Query parameters for the assignment endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignmentQuery {
    /// The date to resolve. Defaults to the clinic-local today.
    date: Option<String>,
}

/// Query parameters for the calendar endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CalendarQuery {
    /// First date, inclusive.
    from: Option<String>,
    /// Last date, inclusive.
    to: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always `false`.
    success: bool,
    /// Error message.
    message: String,
    /// Offending request fields, when the request itself was invalid.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    errors: Vec<FieldError>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field-level detail for 400 responses.
    errors: Vec<FieldError>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ValidationFailed { .. } | ApiError::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
            errors: err.field_errors(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Malformed request body: {}", rejection.body_text()),
            errors: Vec::new(),
        }
    }
}

/// Handler for GET `/doctors/schedule-overrides`.
async fn handle_list_overrides(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<OverrideInfo>>, HttpError> {
    info!("Handling list_overrides request");

    let mut persistence = app_state.persistence.lock().await;
    let overrides: Vec<OverrideInfo> = list_overrides(&mut persistence, app_state.clock.as_ref())?;
    drop(persistence);

    Ok(Json(overrides))
}

/// Handler for GET `/doctors/schedule-override/{date}`.
///
/// Returns `null` when the date has no override.
async fn handle_get_override(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Option<OverrideInfo>>, HttpError> {
    info!(date = %date, "Handling get_override request");

    let mut persistence = app_state.persistence.lock().await;
    let found: Option<OverrideInfo> =
        get_override_for_date(&mut persistence, app_state.clock.as_ref(), &date)?;
    drop(persistence);

    Ok(Json(found))
}

/// Handler for POST `/doctors/schedule-override`.
async fn handle_create_override(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<CreateOverrideRequest>, JsonRejection>,
) -> Result<Json<OverrideInfo>, HttpError> {
    let Json(request) = payload?;
    info!(date = ?request.date, "Handling create_override request");

    let mut persistence = app_state.persistence.lock().await;
    let created: OverrideInfo =
        create_override(&mut persistence, app_state.clock.as_ref(), &request)?;
    drop(persistence);

    Ok(Json(created))
}

/// Handler for PUT `/doctors/schedule-override/{id}`.
async fn handle_update_override(
    AxumState(app_state): AxumState<AppState>,
    Path(override_id): Path<String>,
    payload: Result<Json<UpdateOverrideRequest>, JsonRejection>,
) -> Result<Json<OverrideInfo>, HttpError> {
    let Json(request) = payload?;
    info!(override_id = %override_id, "Handling update_override request");

    let mut persistence = app_state.persistence.lock().await;
    let updated: OverrideInfo = update_override(
        &mut persistence,
        app_state.clock.as_ref(),
        &override_id,
        &request,
    )?;
    drop(persistence);

    Ok(Json(updated))
}

/// Handler for DELETE `/doctors/schedule-override/{date}`.
async fn handle_delete_override(
    AxumState(app_state): AxumState<AppState>,
    Path(date): Path<String>,
) -> Result<Json<StatusResponse>, HttpError> {
    info!(date = %date, "Handling delete_override request");

    let mut persistence = app_state.persistence.lock().await;
    let response: StatusResponse =
        delete_override_for_date(&mut persistence, app_state.clock.as_ref(), &date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/doctors/{id}/schedule`.
async fn handle_set_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(doctor_id): Path<String>,
    payload: Result<Json<SetSchedulePatternRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, HttpError> {
    let Json(request) = payload?;
    info!(doctor_id = %doctor_id, "Handling set_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let response: StatusResponse = set_doctor_schedule(&mut persistence, &doctor_id, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/doctors/{id}/schedule`.
async fn handle_remove_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<StatusResponse>, HttpError> {
    info!(doctor_id = %doctor_id, "Handling remove_schedule request");

    let mut persistence = app_state.persistence.lock().await;
    let response: StatusResponse = remove_doctor_schedule(&mut persistence, &doctor_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/doctors/initialize-schedules`.
async fn handle_initialize_schedules(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<InitializationResponse>, HttpError> {
    info!("Handling initialize_schedules request");

    let mut persistence = app_state.persistence.lock().await;
    let response: InitializationResponse =
        initialize_schedules(&mut persistence, &app_state.initializer)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/doctors/schedule/assignment`.
async fn handle_get_assignment(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<AssignmentInfo>, HttpError> {
    info!(date = ?query.date, "Handling get_assignment request");

    let mut persistence = app_state.persistence.lock().await;
    let assignment: AssignmentInfo = get_assignment(
        &mut persistence,
        app_state.clock.as_ref(),
        query.date.as_deref(),
    )?;
    drop(persistence);

    Ok(Json(assignment))
}

/// Handler for GET `/doctors/schedule/calendar`.
async fn handle_get_calendar(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<AssignmentInfo>>, HttpError> {
    info!(from = ?query.from, to = ?query.to, "Handling get_calendar request");

    let mut persistence = app_state.persistence.lock().await;
    let calendar: Vec<AssignmentInfo> =
        get_calendar(&mut persistence, query.from.as_deref(), query.to.as_deref())?;
    drop(persistence);

    Ok(Json(calendar))
}

/// Handler for POST `/doctors`.
async fn handle_register_doctor(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<RegisterDoctorRequest>, JsonRejection>,
) -> Result<Json<DoctorInfo>, HttpError> {
    let Json(request) = payload?;
    info!("Handling register_doctor request");

    let mut persistence = app_state.persistence.lock().await;
    let doctor: DoctorInfo =
        register_doctor(&mut persistence, app_state.clock.as_ref(), &request)?;
    drop(persistence);

    Ok(Json(doctor))
}

/// Handler for GET `/doctors`.
async fn handle_list_doctors(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<DoctorInfo>>, HttpError> {
    info!("Handling list_doctors request");

    let mut persistence = app_state.persistence.lock().await;
    let doctors: Vec<DoctorInfo> = list_doctors(&mut persistence)?;
    drop(persistence);

    Ok(Json(doctors))
}

/// Handler for PUT `/doctors/{id}/status`.
async fn handle_set_doctor_status(
    AxumState(app_state): AxumState<AppState>,
    Path(doctor_id): Path<String>,
    payload: Result<Json<SetDoctorStatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, HttpError> {
    let Json(request) = payload?;
    info!(doctor_id = %doctor_id, active = ?request.active, "Handling set_doctor_status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: StatusResponse = set_doctor_status(&mut persistence, &doctor_id, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
///
/// The single-override routes share one path parameter: it is a date for
/// GET and DELETE and an override id for PUT.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/doctors", get(handle_list_doctors).post(handle_register_doctor))
        .route("/doctors/schedule-overrides", get(handle_list_overrides))
        .route("/doctors/schedule-override", post(handle_create_override))
        .route(
            "/doctors/schedule-override/{key}",
            get(handle_get_override)
                .put(handle_update_override)
                .delete(handle_delete_override),
        )
        .route(
            "/doctors/initialize-schedules",
            post(handle_initialize_schedules),
        )
        .route("/doctors/schedule/assignment", get(handle_get_assignment))
        .route("/doctors/schedule/calendar", get(handle_get_calendar))
        .route(
            "/doctors/{id}/schedule",
            put(handle_set_schedule).delete(handle_remove_schedule),
        )
        .route("/doctors/{id}/status", put(handle_set_doctor_status))
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

    info!("Initializing Clinic Schedule Server");

    // Reject bad configuration before touching the database
    let timezone: ClinicTimezone = ClinicTimezone::parse(&args.timezone)?;
    let initializer: ScheduleInitializer = ScheduleInitializer::new(&args.default_pattern)?;
    info!(
        timezone = timezone.name(),
        default_pattern = initializer.default_pattern(),
        "Loaded schedule configuration"
    );

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(SystemClock::new(timezone)),
        initializer: Arc::new(initializer),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
