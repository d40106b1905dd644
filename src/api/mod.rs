//! HTTP API routes and handlers

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::config::GolfcastConfig;
use crate::courses::{Course, CourseSearch};
use crate::error::{GolfcastError, Result};
use crate::golf::GolfOutlook;
use crate::location_resolver::{LocationInput, LocationResolver};
use crate::outlook::OutlookService;
use crate::weather::WeatherService;

/// Shared state handed to every request handler
pub struct AppState {
    pub config: GolfcastConfig,
    pub weather: WeatherService,
    pub courses: CourseSearch,
}

impl AppState {
    pub fn new(config: GolfcastConfig) -> Result<Self> {
        let weather = WeatherService::new(config.clone())?;
        let courses = CourseSearch::new(&config)?;
        Ok(Self {
            config,
            weather,
            courses,
        })
    }
}

/// Query parameters accepted by the forecast and courses endpoints
#[derive(Debug, Deserialize)]
pub struct LocationParams {
    lat: Option<f64>,
    lon: Option<f64>,
    location: Option<String>,
}

impl LocationParams {
    /// Coordinates take precedence over a textual location
    fn into_input(self) -> Result<LocationInput> {
        match (self.lat, self.lon, self.location) {
            (Some(lat), Some(lon), _) => LocationInput::coordinates(lat, lon),
            (_, _, Some(location)) => LocationInput::parse(&location),
            _ => Err(GolfcastError::validation(
                "Provide either lat and lon or a location query parameter",
            )),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/forecast", get(get_forecast))
        .route("/courses", get(get_courses))
        .route("/health", get(get_health))
        .with_state(state)
}

async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<GolfOutlook>> {
    let input = params.into_input()?;
    let location = LocationResolver::resolve_location(&state.weather, input).await?;
    let outlook = OutlookService::generate(&state.weather, &location).await?;
    Ok(Json(outlook))
}

async fn get_courses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Vec<Course>>> {
    let input = params.into_input()?;
    let location = LocationResolver::resolve_location(&state.weather, input).await?;

    // Courses are an optional signal; a failed search degrades to an
    // empty list instead of failing the request
    match state
        .courses
        .search_nearby(location.latitude, location.longitude)
        .await
    {
        Ok(courses) => Ok(Json(courses)),
        Err(e) => {
            warn!("Course search failed for {}: {e}", location.name);
            Ok(Json(Vec::new()))
        }
    }
}

async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
