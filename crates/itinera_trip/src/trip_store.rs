use fxhash::FxHashSet;
use tracing::{debug, info, warn};

use crate::{
    error::{StorageError, TripError},
    location::LocationId,
    storage::{TRIP_STORAGE_KEY, TripStorage},
};

/// Sorted snapshot of the destinations of a trip, regardless of their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership(Vec<LocationId>);

impl Membership {
    fn of(ids: &[LocationId]) -> Self {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        Self(ids)
    }
}

/// Ordered, de-duplicated destinations of the trip.
///
/// Every mutation is written to the storage before it is applied in memory:
/// once a call returns `Ok`, the change is durable, and when the write fails
/// the store keeps its previous state.
pub struct TripStore<S>
where
    S: TripStorage,
{
    storage: S,
    ids: Vec<LocationId>,
}

impl<S> TripStore<S>
where
    S: TripStorage,
{
    /// Restores the last persisted trip. A missing or corrupt snapshot is an empty trip.
    pub fn open(storage: S) -> Self {
        let ids = load_snapshot(&storage).unwrap_or_else(|err| {
            warn!("Failed to read trip snapshot: {}", err);
            Vec::new()
        });

        debug!("Restored trip with {} destinations", ids.len());

        Self { storage, ids }
    }

    /// Re-reads the persisted trip, picking up changes written through another store.
    ///
    /// On a read error the in-memory trip is kept.
    pub fn reload(&mut self) -> Result<(), TripError> {
        self.ids = load_snapshot(&self.storage)?;

        Ok(())
    }

    pub fn ids(&self) -> &[LocationId] {
        &self.ids
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.ids.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn membership(&self) -> Membership {
        Membership::of(&self.ids)
    }

    /// Appends `id` to the trip. Returns `false` when it was already part of it.
    pub fn add(&mut self, id: LocationId) -> Result<bool, TripError> {
        if self.contains(id) {
            debug!("Destination {} is already in the trip", id);
            return Ok(false);
        }

        let mut ids = self.ids.clone();
        ids.push(id);
        self.commit(ids)?;

        info!("Added destination {} to the trip", id);
        Ok(true)
    }

    /// Removes `id` from the trip. Returns `false` when it was not part of it.
    pub fn remove(&mut self, id: LocationId) -> Result<bool, TripError> {
        if !self.contains(id) {
            return Ok(false);
        }

        let ids = self
            .ids
            .iter()
            .copied()
            .filter(|&trip_id| trip_id != id)
            .collect();
        self.commit(ids)?;

        info!("Removed destination {} from the trip", id);
        Ok(true)
    }

    /// Replaces the order of the trip. `order` must contain exactly the current destinations.
    pub fn replace_order(&mut self, order: &[LocationId]) -> Result<(), TripError> {
        if Membership::of(order) != self.membership() {
            return Err(TripError::NotAPermutation {
                current: self.ids.clone(),
                given: order.to_vec(),
            });
        }

        self.commit(order.to_vec())
    }

    /// Empties the trip and deletes its snapshot.
    pub fn clear(&mut self) -> Result<(), TripError> {
        self.storage.remove(TRIP_STORAGE_KEY)?;
        self.ids.clear();

        info!("Cleared the trip");
        Ok(())
    }

    fn commit(&mut self, ids: Vec<LocationId>) -> Result<(), TripError> {
        let snapshot = serde_json::to_string(&ids)?;
        self.storage.save(TRIP_STORAGE_KEY, &snapshot)?;
        self.ids = ids;

        Ok(())
    }
}

fn load_snapshot<S>(storage: &S) -> Result<Vec<LocationId>, StorageError>
where
    S: TripStorage,
{
    let ids = match storage.load(TRIP_STORAGE_KEY)? {
        Some(snapshot) => parse_snapshot(&snapshot).unwrap_or_else(|err| {
            warn!("Ignoring corrupt trip snapshot: {}", err);
            Vec::new()
        }),
        None => Vec::new(),
    };

    Ok(ids)
}

/// Parses a snapshot, keeping the first occurrence of repeated ids.
fn parse_snapshot(snapshot: &str) -> Result<Vec<LocationId>, serde_json::Error> {
    let ids: Vec<LocationId> = serde_json::from_str(snapshot)?;

    let mut seen = FxHashSet::default();
    Ok(ids.into_iter().filter(|id| seen.insert(*id)).collect())
}
