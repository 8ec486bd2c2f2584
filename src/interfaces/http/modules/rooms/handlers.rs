//! Room catalog HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use super::dto::*;
use crate::application::{BookingService, RoomFilter};
use crate::domain::{DateRange, DomainError, PriceQuote, RoomCategory};
use crate::interfaces::http::common::{ApiResponse, ApiResult};

#[derive(Clone)]
pub struct RoomAppState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    params(RoomListQuery),
    responses(
        (status = 200, description = "Rooms in the catalog", body = ApiResponse<Vec<RoomDto>>),
        (status = 422, description = "Unknown category")
    )
)]
pub async fn list_rooms(
    State(state): State<RoomAppState>,
    Query(query): Query<RoomListQuery>,
) -> ApiResult<Vec<RoomDto>> {
    let category = match query.category.as_deref() {
        Some(raw) => Some(RoomCategory::parse(raw).ok_or_else(|| {
            DomainError::Validation(format!("unknown room category '{}'", raw))
        })?),
        None => None,
    };
    let filter = RoomFilter {
        category,
        search: query.search,
    };

    let currency = state.service.currency();
    let rooms = state
        .service
        .list_rooms(&filter)
        .await?
        .into_iter()
        .map(|r| RoomDto::from_room(r, currency))
        .collect();
    Ok(Json(ApiResponse::success(rooms)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    params(("id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomAppState>,
    Path(id): Path<String>,
) -> ApiResult<RoomDto> {
    let room = state.service.get_room(&id).await?;
    Ok(Json(ApiResponse::success(RoomDto::from_room(
        room,
        state.service.currency(),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/availability",
    tag = "Rooms",
    params(("id" = String, Path, description = "Room ID"), StayQuery),
    responses(
        (status = 200, description = "Availability decision", body = ApiResponse<AvailabilityDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn check_availability(
    State(state): State<RoomAppState>,
    Path(id): Path<String>,
    Query(stay): Query<StayQuery>,
) -> ApiResult<AvailabilityDto> {
    let range = stay.range();
    let result = state.service.check_availability(&id, range).await?;
    Ok(Json(ApiResponse::success(AvailabilityDto::new(
        &id, range, result,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/quote",
    tag = "Rooms",
    params(("id" = String, Path, description = "Room ID")),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Itemised price", body = ApiResponse<PriceQuote>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Invalid party")
    )
)]
pub async fn quote(
    State(state): State<RoomAppState>,
    Path(id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<PriceQuote> {
    let range = DateRange::new(request.check_in, request.check_out);
    let quote = state.service.quote(&id, range, request.party).await?;
    Ok(Json(ApiResponse::success(quote)))
}
