use std::{fs::File, io::BufReader, path::Path};

use fxhash::FxHashMap;
use tracing::{debug, warn};

use crate::{
    error::CatalogError,
    location::{LocationId, LocationRecord},
};

/// Pseudo-category matching every destination.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Default, Clone)]
pub struct CatalogFilter {
    /// Case-insensitive text matched against name, province and category
    pub query: Option<String>,

    /// Exact category, `None` or [`ALL_CATEGORIES`] for every category
    pub category: Option<String>,
}

/// Read-only list of destinations, indexed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    locations: Vec<LocationRecord>,
    index: FxHashMap<LocationId, usize>,
}

impl Catalog {
    /// Builds the catalog from raw JSON entries, skipping the invalid ones.
    pub fn from_records(records: Vec<serde_json::Value>) -> Self {
        let mut catalog = Catalog::default();

        for (position, value) in records.into_iter().enumerate() {
            let location: LocationRecord = match serde_json::from_value(value) {
                Ok(location) => location,
                Err(err) => {
                    warn!("Skipping catalog entry {}: {}", position, err);
                    continue;
                }
            };

            if let Err(err) = location.validate() {
                warn!("Skipping catalog entry {} ({}): {}", position, location.id, err);
                continue;
            }

            if catalog.index.contains_key(&location.id) {
                warn!(
                    "Skipping catalog entry {}: duplicate id {}",
                    position, location.id
                );
                continue;
            }

            catalog
                .index
                .insert(location.id, catalog.locations.len());
            catalog.locations.push(location);
        }

        catalog
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        let records: Vec<serde_json::Value> = serde_json::from_reader(BufReader::new(file))?;

        let catalog = Self::from_records(records);
        debug!(
            "Loaded {} destinations from {:?}",
            catalog.len(),
            path.as_ref()
        );

        Ok(catalog)
    }

    pub async fn fetch(url: &str) -> Result<Self, CatalogError> {
        debug!("Fetching catalog from {}", url);

        let response = reqwest::get(url).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api { status, message });
        }

        let records: Vec<serde_json::Value> = response.json().await?;

        let catalog = Self::from_records(records);
        debug!("Loaded {} destinations from {}", catalog.len(), url);

        Ok(catalog)
    }

    /// Loads from an `http(s)://` URL or a file path.
    pub async fn load(source: &str) -> Result<Self, CatalogError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(source).await
        } else {
            Self::from_file(source)
        }
    }

    pub fn get(&self, id: LocationId) -> Option<&LocationRecord> {
        self.index.get(&id).map(|&index| &self.locations[index])
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationRecord> {
        self.locations.iter()
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for location in &self.locations {
            if !categories.contains(&location.category.as_str()) {
                categories.push(&location.category);
            }
        }

        categories
    }

    pub fn search(&self, filter: &CatalogFilter) -> Vec<&LocationRecord> {
        let category = filter
            .category
            .as_deref()
            .filter(|category| *category != ALL_CATEGORIES);
        let query = filter.query.as_deref().map(str::to_lowercase);

        self.locations
            .iter()
            .filter(|location| category.is_none_or(|category| location.category == category))
            .filter(|location| {
                query.as_deref().is_none_or(|query| {
                    location.name.to_lowercase().contains(query)
                        || location.province.to_lowercase().contains(query)
                        || location.category.to_lowercase().contains(query)
                })
            })
            .collect()
    }
}
