//! HTTP API for the lookup frontend

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::TrackerError;
use crate::config::MapConfig;
use crate::lookup::LookupService;
use crate::map_view::{MapSettings, MapViewModel};
use crate::models::LocationRecord;

/// Shared state behind every API handler
pub struct AppState {
    pub lookup: LookupService,
    pub map: MapConfig,
}

/// Query string for `GET /api/lookup`
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub query: String,
}

/// Lookup result as rendered to the frontend
#[derive(Serialize, Deserialize)]
pub struct ApiLookup {
    pub ip: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub city: String,
    pub isp: String,
    pub timezone: String,
    pub map: ApiMapView,
    /// Banner message, present exactly when no coordinates are
    pub error: Option<String>,
}

/// Map view as rendered to the frontend
#[derive(Serialize, Deserialize)]
pub struct ApiMapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub marker: [f64; 2],
}

impl From<MapViewModel> for ApiMapView {
    fn from(view: MapViewModel) -> Self {
        Self {
            center: [view.center.latitude, view.center.longitude],
            zoom: view.zoom,
            marker: [view.marker.latitude, view.marker.longitude],
        }
    }
}

impl ApiLookup {
    fn render(record: LocationRecord, map: &MapConfig) -> Self {
        let view = MapViewModel::for_record(&record, map);
        let error = if record.is_resolved() {
            None
        } else {
            Some(TrackerError::lookup("no result").user_message())
        };

        Self {
            ip: record.ip,
            latitude: record.coordinates.map(|c| c.latitude),
            longitude: record.coordinates.map(|c| c.longitude),
            city: record.city,
            isp: record.isp,
            timezone: record.timezone,
            map: view.into(),
            error,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/self", get(get_self))
        .route("/lookup", get(get_lookup))
        .route("/map", get(get_map))
        .with_state(state)
}

/// Detect the visitor's public IP and resolve it; called once per page load
async fn get_self(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiLookup>, StatusCode> {
    let record = state.lookup.lookup_self().await.map_err(|e| {
        error!("Public IP detection failed: {:#}", e);
        StatusCode::BAD_GATEWAY
    })?;

    Ok(Json(ApiLookup::render(record, &state.map)))
}

/// Resolve a user-submitted IP or domain
async fn get_lookup(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LookupQuery>,
) -> Json<ApiLookup> {
    let record = state.lookup.lookup(&params.query).await;
    Json(ApiLookup::render(record, &state.map))
}

/// Static map configuration for the frontend widget
async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapSettings> {
    Json(MapSettings::from(&state.map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    #[test]
    fn test_render_resolved_record() {
        let map = MapConfig::default();
        let record = LocationRecord {
            ip: "1.2.3.4".to_string(),
            coordinates: Some(Coordinates::new(10.0, 20.0)),
            city: "X".to_string(),
            isp: "Y".to_string(),
            timezone: "UTC -08:00".to_string(),
        };

        let rendered = ApiLookup::render(record, &map);
        assert_eq!(rendered.ip, "1.2.3.4");
        assert_eq!(rendered.latitude, Some(10.0));
        assert_eq!(rendered.longitude, Some(20.0));
        assert_eq!(rendered.map.center, [10.0, 20.0]);
        assert_eq!(rendered.map.marker, [10.0, 20.0]);
        assert!(rendered.error.is_none());
    }

    #[test]
    fn test_render_empty_record_shows_banner_and_fallback() {
        let map = MapConfig::default();
        let rendered = ApiLookup::render(LocationRecord::empty(), &map);

        assert!(rendered.latitude.is_none());
        assert!(rendered.longitude.is_none());
        assert_eq!(rendered.map.center, [-33.8688, 151.2093]);
        assert!(rendered.error.unwrap().contains("unable to find anything"));
    }
}
