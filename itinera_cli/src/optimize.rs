use std::{cell::RefCell, time::Duration};

use clap::{Args, ValueEnum};
use indicatif::ProgressBar;
use itinera_directions::{
    cache::FileCache, directions_client::DirectionsClient,
    directions_provider::DirectionsProvider, google_directions_api::TravelMode,
    route_optimizer::RouteOptimizer,
};
use itinera_trip::{
    catalog::Catalog,
    reorderer::{ItineraryReorderer, ReorderOutcome},
    storage::FileStorage,
    trip_store::TripStore,
};
use tracing::info;

use crate::{config::Config, output, parsers};

#[derive(Copy, Clone, ValueEnum)]
pub enum ProviderArg {
    /// Google Directions API, needs GOOGLE_MAPS_API_KEY
    Google,

    /// Offline nearest-neighbour ordering
    Crow,
}

#[derive(Args)]
pub struct OptimizeArgs {
    /// Defaults to google when an API key is configured, crow otherwise
    #[arg(short, long, value_enum)]
    provider: Option<ProviderArg>,

    /// Overrides ITINERA_TIMEOUT (e.g., "30s", "1m")
    #[arg(short, long, value_parser = parsers::parse_timeout)]
    timeout: Option<Duration>,
}

pub async fn run(args: OptimizeArgs, config: &Config) -> Result<(), anyhow::Error> {
    let provider = match args.provider {
        Some(ProviderArg::Google) => DirectionsProvider::GoogleApi {
            travel_mode: TravelMode::Driving,
        },
        Some(ProviderArg::Crow) => DirectionsProvider::AsTheCrowFlies,
        None if config.google_maps_api_key.is_some() => DirectionsProvider::GoogleApi {
            travel_mode: TravelMode::Driving,
        },
        None => DirectionsProvider::AsTheCrowFlies,
    };
    let timeout = args.timeout.unwrap_or(config.timeout);
    let api_key = config.google_maps_api_key.clone();

    info!("Optimizing trip with {:?}", provider);

    match &config.cache_folder {
        Some(folder) => {
            let client = DirectionsClient::with_cache(provider, api_key, FileCache::new(folder)?);
            optimize(config, &client, timeout).await
        }
        None => {
            let client = DirectionsClient::new(provider, api_key);
            optimize(config, &client, timeout).await
        }
    }
}

async fn optimize<O>(config: &Config, optimizer: &O, timeout: Duration) -> Result<(), anyhow::Error>
where
    O: RouteOptimizer,
{
    let catalog = Catalog::load(&config.catalog_source).await?;
    let store = RefCell::new(TripStore::open(FileStorage::new(&config.state_dir)?));
    let mut reorderer = ItineraryReorderer::new();

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Optimizing route...");

    let outcome = reorderer
        .optimize(&store, &catalog, optimizer, timeout)
        .await;

    spinner.finish_and_clear();

    match outcome {
        ReorderOutcome::Applied => {
            if let Some(route) = reorderer.route() {
                println!("Optimized route");
                println!("{}", output::stops_table(&route.stops));

                if let Some(path) = &route.path {
                    println!("Path geometry: {} points", path.len());
                }
            }
        }
        ReorderOutcome::NotEnoughStops => {
            println!("Add at least 2 locations to optimize");
        }
        ReorderOutcome::Stale => {
            println!("Your trip changed while optimizing, try again");
        }
        ReorderOutcome::Failed(err) => {
            println!("Could not optimize the route: {err}");
        }
    }

    Ok(())
}
