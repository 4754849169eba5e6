use std::{env, path::PathBuf, time::Duration};

use anyhow::anyhow;
use itinera_directions::{cache::CACHE_FOLDER_ENV_VAR, directions_client::GOOGLE_MAPS_API_KEY_ENV_VAR};
use tracing::info;

use crate::parsers;

const CATALOG_ENV_VAR: &str = "ITINERA_CATALOG";
const STATE_DIR_ENV_VAR: &str = "ITINERA_STATE_DIR";
const TIMEOUT_ENV_VAR: &str = "ITINERA_TIMEOUT";

const DEFAULT_CATALOG: &str = "./data/locations.json";
const DEFAULT_STATE_DIR: &str = "./.itinera";
const DEFAULT_TIMEOUT: &str = "30s";

pub struct Config {
    /// File path or http(s) URL of the destination catalog
    pub catalog_source: String,

    /// Where the trip snapshot is kept
    pub state_dir: PathBuf,

    pub google_maps_api_key: Option<String>,
    pub cache_folder: Option<PathBuf>,
    pub timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, anyhow::Error> {
        let timeout = parsers::parse_timeout(&var_or_default(TIMEOUT_ENV_VAR, DEFAULT_TIMEOUT))
            .map_err(|err| anyhow!("Invalid {TIMEOUT_ENV_VAR} value: {err}"))?;

        Ok(Self {
            catalog_source: var_or_default(CATALOG_ENV_VAR, DEFAULT_CATALOG),
            state_dir: PathBuf::from(var_or_default(STATE_DIR_ENV_VAR, DEFAULT_STATE_DIR)),
            google_maps_api_key: var(GOOGLE_MAPS_API_KEY_ENV_VAR),
            cache_folder: var(CACHE_FOLDER_ENV_VAR).map(PathBuf::from),
            timeout,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn var_or_default(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
