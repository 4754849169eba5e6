use clap::Args;
use itinera_trip::{
    catalog::{ALL_CATEGORIES, Catalog, CatalogFilter},
    location::LocationId,
    storage::FileStorage,
    trip_store::TripStore,
};

use crate::{config::Config, output};

#[derive(Args)]
pub struct CatalogArgs {
    /// Text matched against name, province and category
    #[arg(short, long)]
    query: Option<String>,

    /// Only list this category
    #[arg(short, long)]
    category: Option<String>,
}

pub async fn list(args: CatalogArgs, config: &Config) -> Result<(), anyhow::Error> {
    let catalog = Catalog::load(&config.catalog_source).await?;
    let store = TripStore::open(FileStorage::new(&config.state_dir)?);

    let found = catalog.search(&CatalogFilter {
        query: args.query,
        category: args.category,
    });

    println!("{} found", output::destinations(found.len()));
    println!(
        "{}",
        output::locations_table(found, |location| store.contains(location.id))
    );

    Ok(())
}

pub async fn categories(config: &Config) -> Result<(), anyhow::Error> {
    let catalog = Catalog::load(&config.catalog_source).await?;

    println!("{ALL_CATEGORIES}");
    for category in catalog.categories() {
        println!("{category}");
    }

    Ok(())
}

pub async fn show(id: u64, config: &Config) -> Result<(), anyhow::Error> {
    let catalog = Catalog::load(&config.catalog_source).await?;
    let store = TripStore::open(FileStorage::new(&config.state_dir)?);

    let Some(location) = catalog.get(LocationId::new(id)) else {
        println!("Location not found");
        return Ok(());
    };

    println!("{} ({})", location.name, location.id);
    println!("{} · {}", location.province, location.category);
    if !location.description.is_empty() {
        println!();
        println!("{}", location.description);
    }
    println!();
    println!(
        "Coordinates: {}, {}",
        location.coordinates.lat, location.coordinates.lng
    );
    println!(
        "Open in maps: https://www.google.com/maps/search/?api=1&query={},{}",
        location.coordinates.lat, location.coordinates.lng
    );
    println!(
        "In trip: {}",
        if store.contains(location.id) { "yes" } else { "no" }
    );

    Ok(())
}
