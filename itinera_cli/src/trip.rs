use itinera_trip::{
    catalog::Catalog, itinerary, location::LocationId, storage::FileStorage,
    trip_store::TripStore,
};
use tracing::warn;

use crate::{config::Config, output};

fn open_store(config: &Config) -> Result<TripStore<FileStorage>, anyhow::Error> {
    Ok(TripStore::open(FileStorage::new(&config.state_dir)?))
}

pub async fn add(id: u64, config: &Config) -> Result<(), anyhow::Error> {
    let catalog = Catalog::load(&config.catalog_source).await?;
    let id = LocationId::new(id);

    let Some(location) = catalog.get(id) else {
        warn!("Destination {} is not in the catalog", id);
        println!("Location not found");
        return Ok(());
    };

    let mut store = open_store(config)?;
    if store.add(id)? {
        println!("Added {} to your trip", location.name);
    } else {
        println!("{} is already in your trip", location.name);
    }
    println!("{} planned", output::destinations(store.count()));

    Ok(())
}

pub fn remove(id: u64, config: &Config) -> Result<(), anyhow::Error> {
    let mut store = open_store(config)?;

    if store.remove(LocationId::new(id))? {
        println!("Removed {} from your trip", id);
    } else {
        println!("{} is not in your trip", id);
    }
    println!("{} planned", output::destinations(store.count()));

    Ok(())
}

pub fn clear(config: &Config) -> Result<(), anyhow::Error> {
    open_store(config)?.clear()?;
    println!("Your trip is empty");

    Ok(())
}

pub async fn show(config: &Config) -> Result<(), anyhow::Error> {
    let store = open_store(config)?;

    if store.is_empty() {
        println!("Your trip is empty");
        return Ok(());
    }

    let catalog = Catalog::load(&config.catalog_source).await?;
    let stops = itinerary::resolve(store.ids(), &catalog);

    println!("{} planned", output::destinations(store.count()));
    println!("{}", output::stops_table(stops.iter().copied()));

    let hidden = store.count() - stops.len();
    if hidden > 0 {
        println!(
            "{} no longer in the catalog, hidden",
            output::destinations(hidden)
        );
    }

    let center = itinerary::map_center(&stops);
    println!("Map center: {:.4}, {:.4}", center.lat, center.lng);

    if let Some(bounds) = itinerary::bounds(&stops) {
        println!(
            "Map bounds: ({:.4}, {:.4}) to ({:.4}, {:.4})",
            bounds.min().y,
            bounds.min().x,
            bounds.max().y,
            bounds.max().x
        );
    }

    Ok(())
}
