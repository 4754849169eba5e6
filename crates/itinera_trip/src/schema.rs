use schemars::schema_for;

use crate::location::LocationRecord;

/// JSON schema of a catalog file: an array of locations.
pub fn generate_catalog_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Vec<LocationRecord>))
}
