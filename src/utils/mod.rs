//! Identifier parsing and body decoding helpers shared by the catalog.

use serde::{Deserialize, Deserializer};

use crate::error::{CatalogError, CatalogResult};

/// Decode an explicit JSON `null` as the field's zero value, the same as an
/// absent key under `#[serde(default)]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Parse a path identifier as an integer, without range checks.
pub fn parse_id(raw: &str) -> CatalogResult<i64> {
    raw.parse::<i64>()
        .map_err(|err| CatalogError::InvalidInput(format!("parsing {:?}: {}", raw, err)))
}

/// Full identifier check: present, numeric, positive.
pub fn validate_id(raw: &str) -> CatalogResult<i64> {
    if raw.is_empty() {
        return Err(CatalogError::MissingId);
    }

    let id = parse_id(raw)?;
    ensure_positive(id)?;

    Ok(id)
}

pub fn ensure_positive(id: i64) -> CatalogResult<()> {
    if id <= 0 {
        return Err(CatalogError::InvalidId);
    }
    Ok(())
}
