pub mod catalog;
pub mod error;
pub mod itinerary;
pub mod location;
pub mod reorderer;
pub mod schema;
pub mod storage;
pub mod trip_store;

#[cfg(test)]
pub(crate) mod test_utils;
