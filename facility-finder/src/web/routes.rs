//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::directory::DIRECTORY_PATH;
use crate::discovery::{DiscoveryError, DiscoverySnapshot, LoadOutcome, SearchOutcome};
use crate::domain::{Facility, FacilityId, UserLocation};
use crate::markers::MarkerPlan;
use crate::source::seed_facilities;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(DIRECTORY_PATH, get(facility_directory))
        .route("/api/facilities", get(facilities))
        .route("/api/locate", post(locate))
        .route("/api/directory/load", post(load_directory))
        .route("/api/search/nearby", post(search_nearby))
        .route("/api/filters/types/toggle", post(toggle_type))
        .route("/api/filters/types/select-all", post(select_all_types))
        .route("/api/filters/types/clear", post(clear_types))
        .route("/api/selection/toggle", post(toggle_facility))
        .route("/api/markers", get(markers))
        .route("/api/geocode", get(geocode))
        .route("/api/reset", post(reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The same-origin facility listing.
async fn facility_directory() -> Json<Vec<Facility>> {
    Json(seed_facilities())
}

/// Visible facilities, ranked, with filter state.
async fn facilities(State(state): State<AppState>) -> Json<DiscoverySnapshot> {
    Json(state.discovery.snapshot().await)
}

async fn locate(
    State(state): State<AppState>,
) -> Result<Json<ActionResponse<LocateResult>>, AppError> {
    let result = state.discovery.locate().await.map(LocateResult::from);
    respond(&state, result).await
}

async fn load_directory(State(state): State<AppState>) -> Json<ActionResponse<LoadOutcome>> {
    let mut outcome = state.discovery.load_directory().await;
    let notice = outcome.notice.take();

    Json(ActionResponse {
        result: Some(outcome),
        notice,
        state: state.discovery.snapshot().await,
    })
}

async fn search_nearby(
    State(state): State<AppState>,
    Json(req): Json<SearchNearbyRequest>,
) -> Result<Json<ActionResponse<SearchOutcome>>, AppError> {
    let center = match (req.lat, req.lng) {
        (None, None) => None,
        (Some(lat), Some(lng)) => {
            Some(
                UserLocation::new(lat, lng).map_err(|e| AppError::BadRequest {
                    message: format!("Invalid centre: {e}"),
                })?,
            )
        }
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lng must be given together".to_string(),
            });
        }
    };

    let result = state
        .discovery
        .search_nearby(center, req.radius_meters)
        .await;
    respond(&state, result).await
}

async fn toggle_type(
    State(state): State<AppState>,
    Json(req): Json<ToggleTypeRequest>,
) -> Json<ActionResponse<ToggleResult>> {
    let selected = state.discovery.toggle_type(&req.label).await;
    Json(ActionResponse {
        result: Some(ToggleResult { selected }),
        notice: None,
        state: state.discovery.snapshot().await,
    })
}

async fn select_all_types(State(state): State<AppState>) -> Json<DiscoverySnapshot> {
    state.discovery.select_all_types().await;
    Json(state.discovery.snapshot().await)
}

async fn clear_types(State(state): State<AppState>) -> Json<DiscoverySnapshot> {
    state.discovery.clear_types().await;
    Json(state.discovery.snapshot().await)
}

async fn toggle_facility(
    State(state): State<AppState>,
    Json(req): Json<ToggleFacilityRequest>,
) -> Result<Json<ActionResponse<ToggleResult>>, AppError> {
    let result = state
        .discovery
        .toggle_facility(&FacilityId::new(req.id))
        .await
        .map(|selected| ToggleResult { selected });
    respond(&state, result).await
}

async fn markers(State(state): State<AppState>) -> Json<MarkerPlan> {
    Json(state.discovery.markers().await)
}

/// Recentre the map on a searched place.
async fn geocode(
    State(state): State<AppState>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<ActionResponse<GeocodeResult>>, AppError> {
    let result = state
        .discovery
        .recenter(&req.q)
        .await
        .map(GeocodeResult::from);
    respond(&state, result).await
}

/// Forget stored data and return to the seed list.
async fn reset(State(state): State<AppState>) -> Json<DiscoverySnapshot> {
    state.discovery.clear().await;
    Json(state.discovery.snapshot().await)
}

/// Wrap an action result with the resulting state.
///
/// Caller mistakes become HTTP errors. Every other failure was already
/// recovered by the engine and is reported as a notice.
async fn respond<T: Serialize>(
    state: &AppState,
    result: Result<T, DiscoveryError>,
) -> Result<Json<ActionResponse<T>>, AppError> {
    let (result, notice) = match result {
        Ok(value) => (Some(value), None),
        Err(e) => match AppError::rejecting(&e) {
            Some(rejection) => return Err(rejection),
            None => (None, Some(e.notice())),
        },
    };

    Ok(Json(ActionResponse {
        result,
        notice,
        state: state.discovery.snapshot().await,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
}

impl AppError {
    /// The HTTP error for a caller mistake, or `None` for a recovered failure.
    fn rejecting(e: &DiscoveryError) -> Option<Self> {
        let message = e.to_string();
        match e {
            DiscoveryError::InvalidRequest(_) => Some(AppError::BadRequest { message }),
            DiscoveryError::UnknownFacility(_) => Some(AppError::NotFound { message }),
            DiscoveryError::SearchInProgress => Some(AppError::Conflict { message }),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
