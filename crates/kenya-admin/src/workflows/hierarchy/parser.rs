//! Reads the location triple out of a feature's properties.

use super::normalizer::{normalize_county, normalize_sub_county, normalize_ward};
use crate::geojson::Feature;
use serde_json::Value;

pub(crate) const COUNTY_KEY: &str = "county";
pub(crate) const SUB_COUNTY_KEY: &str = "subcounty";
pub(crate) const WARD_KEY: &str = "ward";

/// Normalized `(county, sub-county, ward)` triple read from one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocationRecord {
    pub(crate) county: String,
    pub(crate) sub_county: String,
    pub(crate) ward: String,
}

/// Returns `None` unless all three properties are non-empty strings.
pub(crate) fn location_record(feature: &Feature) -> Option<LocationRecord> {
    let county = non_empty_str(feature.property(COUNTY_KEY))?;
    let sub_county = non_empty_str(feature.property(SUB_COUNTY_KEY))?;
    let ward = non_empty_str(feature.property(WARD_KEY))?;

    Some(LocationRecord {
        county: normalize_county(county),
        sub_county: normalize_sub_county(sub_county),
        ward: normalize_ward(ward),
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text.as_str()),
        _ => None,
    }
}
