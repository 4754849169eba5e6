use std::fmt::Display;

use geo_types::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    directions_request::DirectionsRequest, error::DirectionsError,
    optimized_route::OptimizedRoute, polyline,
};

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Hash, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelMode::Driving => "driving",
                TravelMode::Walking => "walking",
                TravelMode::Bicycling => "bicycling",
                TravelMode::Transit => "transit",
            }
        )
    }
}

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,

    #[serde(default)]
    error_message: Option<String>,

    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    waypoint_order: Vec<usize>,

    overview_polyline: Option<OverviewPolyline>,
}

#[derive(Deserialize)]
struct OverviewPolyline {
    points: String,
}

pub struct GoogleDirectionsClientParams {
    pub api_key: String,
    pub url: String,
}

impl GoogleDirectionsClientParams {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            url: GOOGLE_DIRECTIONS_API_URL.to_string(),
        }
    }
}

pub const GOOGLE_DIRECTIONS_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// The Directions API refuses requests with more waypoints than this.
pub const MAX_WAYPOINTS: usize = 25;

pub struct GoogleDirectionsClient {
    params: GoogleDirectionsClientParams,
    client: reqwest::Client,
}

impl GoogleDirectionsClient {
    pub fn new(params: GoogleDirectionsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_route(
        &self,
        request: &DirectionsRequest,
        travel_mode: TravelMode,
    ) -> Result<OptimizedRoute, DirectionsError> {
        if request.waypoint_count() > MAX_WAYPOINTS {
            return Err(DirectionsError::TooManyWaypoints {
                count: request.waypoint_count(),
                max: MAX_WAYPOINTS,
            });
        }

        let mut query = vec![
            ("origin", format_point(&request.origin)),
            ("destination", format_point(&request.destination)),
            ("mode", travel_mode.to_string()),
            ("key", self.params.api_key.clone()),
        ];

        if let Some(waypoints) = waypoints_param(request) {
            query.push(("waypoints", waypoints));
        }

        debug!(
            "GoogleDirectionsApi: Requesting route with {} waypoints",
            request.waypoint_count()
        );

        let response = self
            .client
            .get(&self.params.url)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api { status, message });
        }

        let body: DirectionsResponse = response.json().await?;

        parse_response(body)
    }
}

fn format_point(point: &Point) -> String {
    format!("{},{}", point.y(), point.x())
}

fn waypoints_param(request: &DirectionsRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let mut param = String::new();
    if request.optimize_waypoints {
        param.push_str("optimize:true|");
    }

    let points: Vec<String> = request.waypoints.iter().map(format_point).collect();
    param.push_str(&points.join("|"));

    Some(param)
}

fn parse_response(body: DirectionsResponse) -> Result<OptimizedRoute, DirectionsError> {
    if body.status != "OK" {
        return Err(DirectionsError::Status {
            status: body.status,
            message: body.error_message.unwrap_or_default(),
        });
    }

    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or(DirectionsError::IncompleteResponse)?;

    let path = match route.overview_polyline {
        Some(overview) => polyline::decode(&overview.points)?,
        None => vec![],
    };

    Ok(OptimizedRoute {
        waypoint_order: route.waypoint_order,
        path,
    })
}
