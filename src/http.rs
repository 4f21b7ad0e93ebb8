use crate::backend::SlotRegistry;
use crate::configuration::Configuration;
use crate::error::SlotError;
use crate::types::{SlotStats, TimeSlot};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use validator::Validate;

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct DateQuery {
    #[validate(regex(path = *ISO_DATE, message = "date must be a calendar date in YYYY-MM-DD format"))]
    date: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct SlotRequest {
    #[validate(regex(path = *ISO_DATE, message = "date must be a calendar date in YYYY-MM-DD format"))]
    date: String,
    #[validate(range(min = 10, max = 23, message = "hour must be between 10 and 23"))]
    hour: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct ToggleRequest {
    #[validate(regex(path = *ISO_DATE, message = "date must be a calendar date in YYYY-MM-DD format"))]
    date: String,
    #[validate(range(min = 10, max = 23, message = "hour must be between 10 and 23"))]
    hour: i32,
    is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotListResponse {
    success: bool,
    data: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookedHoursResponse {
    success: bool,
    booked_hours: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotResponse {
    success: bool,
    message: String,
    data: TimeSlot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManagementData {
    time_slots: Vec<TimeSlot>,
    stats: SlotStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManagementResponse {
    success: bool,
    data: ManagementData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl ErrorResponse {
    fn new(message: &str) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

pub fn create_app<T: SlotRegistry, C: Configuration>(registry: T, configuration: C) -> Router {
    let state = AppState {
        registry,
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/time-slots", get(list_slots))
        .route("/time-slots/booked", get(booked_hours))
        .route("/time-slots/book", post(book_slot));

    let admin = Router::new()
        .route("/time-slots/toggle", patch(toggle_slot))
        .route("/time-slots/release", post(release_slot))
        .route("/time-slots/manage", get(manage_slots))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<T, C>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

/// Admin gate. Identifying individual users is out of scope; the routes
/// behind this layer assume the caller is already trusted.
async fn admin_auth<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    request: Request,
    next: Next,
) -> Result<Response, ErrorReply> {
    let Some(provided) = request.headers().get("x-admin-password") else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Missing credentials")),
        ));
    };
    if provided.to_str().unwrap_or("") != state.configuration.admin_password() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(
                "Access denied. Admin privileges required.",
            )),
        ));
    }
    Ok(next.run(request).await)
}

/// Runs the derive-based field checks, then parses the date string into a
/// real calendar date (the regex alone lets 2024-02-30 through).
fn parse_date_request<R: Validate>(request: &R, raw_date: &str) -> Result<NaiveDate, ErrorReply> {
    request.validate().map_err(|err| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(&err.to_string())),
        )
    })?;
    NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new("date is not a valid calendar date")),
        )
    })
}

fn error_reply(err: SlotError) -> ErrorReply {
    match err {
        SlotError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(&err.to_string())),
        ),
        SlotError::Disabled | SlotError::AlreadyBooked => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&err.to_string())),
        ),
        SlotError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Internal server error")),
        ),
    }
}

async fn list_slots<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<SlotListResponse>, ErrorReply> {
    let date = parse_date_request(&query, &query.date)?;
    let data = state.registry.slots(date).map_err(error_reply)?;
    Ok(Json(SlotListResponse {
        success: true,
        data,
    }))
}

async fn booked_hours<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<BookedHoursResponse>, ErrorReply> {
    let date = parse_date_request(&query, &query.date)?;
    let booked_hours = state.registry.blocked_hours(date).map_err(error_reply)?;
    Ok(Json(BookedHoursResponse {
        success: true,
        booked_hours,
    }))
}

async fn toggle_slot<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<SlotResponse>, ErrorReply> {
    let date = parse_date_request(&request, &request.date)?;
    let slot = state
        .registry
        .set_active(date, request.hour, request.is_active)
        .map_err(error_reply)?;
    Ok(Json(SlotResponse {
        success: true,
        message: "Time slot status updated successfully".into(),
        data: slot,
    }))
}

async fn book_slot<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<SlotRequest>,
) -> Result<Json<SlotResponse>, ErrorReply> {
    let date = parse_date_request(&request, &request.date)?;
    let slot = state
        .registry
        .book(date, request.hour)
        .map_err(error_reply)?;
    Ok(Json(SlotResponse {
        success: true,
        message: "Time slot booked successfully".into(),
        data: slot,
    }))
}

async fn release_slot<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<SlotRequest>,
) -> Result<Json<SlotResponse>, ErrorReply> {
    let date = parse_date_request(&request, &request.date)?;
    let slot = state
        .registry
        .release(date, request.hour)
        .map_err(error_reply)?;
    Ok(Json(SlotResponse {
        success: true,
        message: "Time slot released successfully".into(),
        data: slot,
    }))
}

async fn manage_slots<T: SlotRegistry, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ManagementResponse>, ErrorReply> {
    let date = parse_date_request(&query, &query.date)?;
    let time_slots = state.registry.slots(date).map_err(error_reply)?;
    let stats = SlotStats::for_slots(&time_slots);
    Ok(Json(ManagementResponse {
        success: true,
        data: ManagementData { time_slots, stats },
    }))
}
