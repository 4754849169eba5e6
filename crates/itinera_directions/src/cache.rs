use std::{
    hash::{Hash, Hasher},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use fxhash::FxHasher64;
use geo_types::Point;
use tracing::{debug, warn};

use crate::{
    directions_provider::DirectionsProvider, directions_request::DirectionsRequest,
    optimized_route::OptimizedRoute,
};

pub const CACHE_FOLDER_ENV_VAR: &str = "ITINERA_CACHE_FOLDER";

pub trait DirectionsCache: Send + Sync {
    fn get(
        &self,
        request: &DirectionsRequest,
        provider: &DirectionsProvider,
    ) -> Option<OptimizedRoute>;

    fn put(
        &self,
        request: &DirectionsRequest,
        provider: &DirectionsProvider,
        route: &OptimizedRoute,
    );
}

#[derive(Default)]
pub struct NoCache;

impl DirectionsCache for NoCache {
    fn get(&self, _: &DirectionsRequest, _: &DirectionsProvider) -> Option<OptimizedRoute> {
        None
    }

    fn put(&self, _: &DirectionsRequest, _: &DirectionsProvider, _: &OptimizedRoute) {}
}

fn hash_point<H: Hasher>(point: &Point, hasher: &mut H) {
    hasher.write_u64(point.x().to_bits());
    hasher.write_u64(point.y().to_bits());
}

fn get_filename(request: &DirectionsRequest, provider: &DirectionsProvider) -> String {
    let mut hasher = FxHasher64::default();

    request.waypoint_count().hash(&mut hasher);
    for point in request.stops() {
        hash_point(point, &mut hasher);
    }
    request.optimize_waypoints.hash(&mut hasher);
    provider.hash(&mut hasher);

    format!("{:016x}.json", hasher.finish())
}

/// Stores one JSON file per distinct request in a folder.
pub struct FileCache {
    folder: PathBuf,
}

impl FileCache {
    pub fn new<P: AsRef<Path>>(folder: P) -> Result<Self, anyhow::Error> {
        let folder = folder.as_ref();

        if !folder.is_dir() {
            return Err(anyhow::anyhow!(format!(
                "Path {} is not a directory",
                folder.display()
            )));
        }

        Ok(Self {
            folder: folder.to_path_buf(),
        })
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let cache_folder_path = std::env::var(CACHE_FOLDER_ENV_VAR)?;
        Self::new(cache_folder_path)
    }

    fn read(&self, file_path: &Path) -> Result<Option<OptimizedRoute>, anyhow::Error> {
        if !file_path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(file_path)?;
        let route: OptimizedRoute = serde_json::from_reader(file)?;

        Ok(Some(route))
    }

    fn write(&self, file_path: &Path, route: &OptimizedRoute) -> Result<(), anyhow::Error> {
        let file = std::fs::File::create(file_path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer(&mut writer, route)?;
        writer.flush()?;

        Ok(())
    }
}

impl DirectionsCache for FileCache {
    fn get(
        &self,
        request: &DirectionsRequest,
        provider: &DirectionsProvider,
    ) -> Option<OptimizedRoute> {
        let file_path = self.folder.join(get_filename(request, provider));

        match self.read(&file_path) {
            Ok(route) => route,
            Err(err) => {
                debug!("Ignoring unreadable cache entry {:?}: {}", file_path, err);
                None
            }
        }
    }

    fn put(
        &self,
        request: &DirectionsRequest,
        provider: &DirectionsProvider,
        route: &OptimizedRoute,
    ) {
        let file_path = self.folder.join(get_filename(request, provider));

        if let Err(err) = self.write(&file_path, route) {
            warn!("Failed to cache route in {:?}: {}", file_path, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google_directions_api::TravelMode;

    fn request() -> DirectionsRequest {
        DirectionsRequest::optimized(
            Point::new(79.86, 6.93),
            Point::new(80.63, 7.29),
            vec![Point::new(80.21, 6.03)],
        )
    }

    #[test]
    fn test_filename_depends_on_provider_and_points() {
        let crow = DirectionsProvider::AsTheCrowFlies;
        let google = DirectionsProvider::GoogleApi {
            travel_mode: TravelMode::Driving,
        };

        assert_eq!(get_filename(&request(), &crow), get_filename(&request(), &crow));
        assert_ne!(get_filename(&request(), &crow), get_filename(&request(), &google));

        let mut moved = request();
        moved.waypoints[0] = Point::new(80.22, 6.03);
        assert_ne!(get_filename(&request(), &crow), get_filename(&moved, &crow));
    }

    #[test]
    fn test_file_cache_round_trip() {
        let folder = std::env::temp_dir().join(format!("itinera-cache-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&folder).unwrap();

        let cache = FileCache::new(&folder).unwrap();
        let provider = DirectionsProvider::AsTheCrowFlies;
        let route = OptimizedRoute {
            waypoint_order: vec![0],
            path: vec![Point::new(79.86, 6.93), Point::new(80.63, 7.29)],
        };

        assert_eq!(cache.get(&request(), &provider), None);
        cache.put(&request(), &provider, &route);
        assert_eq!(cache.get(&request(), &provider), Some(route));

        std::fs::remove_dir_all(&folder).unwrap();
    }

    #[test]
    fn test_file_cache_requires_directory() {
        let missing = std::env::temp_dir().join(format!("itinera-missing-{}", uuid::Uuid::new_v4()));

        assert!(FileCache::new(missing).is_err());
    }
}
