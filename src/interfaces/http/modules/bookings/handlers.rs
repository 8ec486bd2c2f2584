//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::*;
use crate::application::{BookingFilter, BookingService, BookingStats};
use crate::domain::{BookingStatus, DomainError};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

impl BookingAppState {
    fn dto(&self, booking: crate::domain::Booking) -> BookingDto {
        BookingDto::from_booking(booking, self.service.currency())
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = ApiResponse<Vec<BookingDto>>),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
    Query(query): Query<BookingListQuery>,
) -> ApiResult<Vec<BookingDto>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(BookingStatus::parse(raw).ok_or_else(|| {
            DomainError::Validation(format!("unknown booking status '{}'", raw))
        })?),
        None => None,
    };
    let filter = BookingFilter {
        room_id: query.room_id,
        status,
    };

    let bookings = state.service.list_bookings(&filter).await?;
    Ok(Json(ApiResponse::success(
        bookings.into_iter().map(|b| state.dto(b)).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created as Pending", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room unavailable for the stay"),
        (status = 422, description = "Invalid party or contact details")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let range = request.range();
    let booking = state
        .service
        .create_booking(&request.room_id, range, request.party, request.guest)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(state.dto(booking))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/stats",
    tag = "Bookings",
    responses(
        (status = 200, description = "Dashboard figures", body = ApiResponse<BookingStats>)
    )
)]
pub async fn booking_stats(State(state): State<BookingAppState>) -> ApiResult<BookingStats> {
    let stats = state.service.stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
) -> ApiResult<BookingDto> {
    let booking = state.service.get_booking(&id).await?;
    Ok(Json(ApiResponse::success(state.dto(booking))))
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/status",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking changed concurrently"),
        (status = 422, description = "Transition not allowed")
    )
)]
pub async fn transition_booking(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
    Json(request): Json<TransitionRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .transition_booking(&id, request.status)
        .await?;
    Ok(Json(ApiResponse::success(state.dto(booking))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/quote",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ID")),
    request_body = ManualQuoteRequest,
    responses(
        (status = 200, description = "Quote applied", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not awaiting a quote")
    )
)]
pub async fn apply_manual_quote(
    State(state): State<BookingAppState>,
    Path(id): Path<String>,
    Json(request): Json<ManualQuoteRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .service
        .apply_manual_quote(&id, request.amount)
        .await?;
    Ok(Json(ApiResponse::success(state.dto(booking))))
}
