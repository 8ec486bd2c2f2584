//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::bookings::{self, BookingAppState, BookingDto};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::rooms::{self, AvailabilityDto, RoomAppState, RoomDto};
use crate::application::{BookingService, BookingStats};
use crate::domain::{
    BookingStatus, ContactInfo, NightlyRate, PartySize, PriceQuote, RoomCategory,
    UnavailableReason,
};

/// Router state. Each handler module extracts its own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
    pub health: HealthState,
    pub metrics: MetricsState,
}

impl FromRef<AppState> for RoomAppState {
    fn from_ref(s: &AppState) -> Self {
        RoomAppState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<AppState> for BookingAppState {
    fn from_ref(s: &AppState) -> Self {
        BookingAppState {
            service: Arc::clone(&s.service),
        }
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        s.metrics.clone()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        rooms::list_rooms,
        rooms::get_room,
        rooms::check_availability,
        rooms::quote,
        bookings::list_bookings,
        bookings::create_booking,
        bookings::booking_stats,
        bookings::get_booking,
        bookings::transition_booking,
        bookings::apply_manual_quote,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            RoomDto,
            RoomCategory,
            AvailabilityDto,
            UnavailableReason,
            rooms::QuoteRequest,
            PriceQuote,
            NightlyRate,
            PartySize,
            BookingDto,
            BookingStatus,
            ContactInfo,
            BookingStats,
            bookings::CreateBookingRequest,
            bookings::TransitionRequest,
            bookings::ManualQuoteRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Rooms", description = "Catalog, availability and pricing"),
        (name = "Bookings", description = "Booking creation and lifecycle"),
    ),
    info(
        title = "Resort Booking API",
        version = "0.1.0",
        description = "Room availability, pricing and booking lifecycle for a resort"
    )
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// `db` is pinged by `/health` when present; `prometheus` backs `/metrics`.
pub fn create_api_router(
    service: Arc<BookingService>,
    db: Option<DatabaseConnection>,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let state = AppState {
        service,
        health: HealthState::new(db),
        metrics: MetricsState { handle: prometheus },
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(prometheus_metrics))
        .route("/api/v1/rooms", get(rooms::list_rooms))
        .route("/api/v1/rooms/{id}", get(rooms::get_room))
        .route(
            "/api/v1/rooms/{id}/availability",
            get(rooms::check_availability),
        )
        .route("/api/v1/rooms/{id}/quote", post(rooms::quote))
        .route(
            "/api/v1/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route("/api/v1/bookings/stats", get(bookings::booking_stats))
        .route("/api/v1/bookings/{id}", get(bookings::get_booking))
        .route(
            "/api/v1/bookings/{id}/status",
            post(bookings::transition_booking),
        )
        .route(
            "/api/v1/bookings/{id}/quote",
            put(bookings::apply_manual_quote),
        )
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
