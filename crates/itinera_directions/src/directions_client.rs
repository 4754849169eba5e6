use tracing::debug;

use crate::{
    as_the_crow_flies::as_the_crow_flies_route,
    cache::{DirectionsCache, NoCache},
    directions_provider::DirectionsProvider,
    directions_request::DirectionsRequest,
    error::DirectionsError,
    google_directions_api::{GoogleDirectionsClient, GoogleDirectionsClientParams},
    optimized_route::OptimizedRoute,
    route_optimizer::RouteOptimizer,
};

pub const GOOGLE_MAPS_API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";

pub struct DirectionsClient<C = NoCache>
where
    C: DirectionsCache,
{
    provider: DirectionsProvider,
    google_client: Option<GoogleDirectionsClient>,
    cache: C,
}

impl DirectionsClient<NoCache> {
    pub fn new(provider: DirectionsProvider, api_key: Option<String>) -> Self {
        Self::with_cache(provider, api_key, NoCache)
    }
}

impl<C> DirectionsClient<C>
where
    C: DirectionsCache,
{
    pub fn with_cache(provider: DirectionsProvider, api_key: Option<String>, cache: C) -> Self {
        Self {
            provider,
            google_client: api_key.map(|api_key| {
                GoogleDirectionsClient::new(GoogleDirectionsClientParams::new(api_key))
            }),
            cache,
        }
    }

    pub fn provider(&self) -> DirectionsProvider {
        self.provider
    }

    pub async fn fetch_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<OptimizedRoute, DirectionsError> {
        if let Some(route) = self.cache.get(request, &self.provider) {
            debug!("Using cached route for {:?}", self.provider);
            return Ok(route);
        }

        let route = match self.provider {
            DirectionsProvider::GoogleApi { travel_mode } => {
                let client = self
                    .google_client
                    .as_ref()
                    .ok_or(DirectionsError::MissingApiKey)?;
                client.fetch_route(request, travel_mode).await?
            }
            DirectionsProvider::AsTheCrowFlies => as_the_crow_flies_route(request),
        };

        self.cache.put(request, &self.provider, &route);

        Ok(route)
    }
}

impl<C> RouteOptimizer for DirectionsClient<C>
where
    C: DirectionsCache,
{
    async fn optimize_route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<OptimizedRoute, DirectionsError> {
        self.fetch_route(request).await
    }
}
