pub mod as_the_crow_flies;
pub mod cache;
pub mod directions_client;
pub mod directions_provider;
pub mod directions_request;
pub mod error;
pub mod google_directions_api;
pub mod optimized_route;
pub mod polyline;
pub mod route_optimizer;
