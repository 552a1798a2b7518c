use super::{CountyAllowList, FilterOutcome};
use crate::geojson::{self, DocumentError, Feature, FeatureCollection};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Output document of the GeoJSON filter. `crs` is always written, as `null`
/// when the input had none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub crs: Option<Value>,
    pub features: Vec<Feature>,
}

impl FilteredCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Keeps, in input order, the features whose `property_key` value is on the
/// allow-list.
pub fn filter_features(
    collection: FeatureCollection,
    allow_list: &CountyAllowList,
    property_key: &str,
) -> FilteredCollection {
    let FeatureCollection { crs, features, .. } = collection;
    let features = features
        .into_iter()
        .filter(|feature| allow_list.matches(feature.property(property_key)))
        .collect();

    FilteredCollection {
        kind: "FeatureCollection",
        crs,
        features,
    }
}

pub struct GeoJsonCountyFilter;

impl GeoJsonCountyFilter {
    /// Reads `input`, filters it and writes `output` only when at least one
    /// feature matched.
    pub fn run<P, Q>(
        input: P,
        output: Q,
        allow_list: &CountyAllowList,
        property_key: &str,
    ) -> Result<FilterOutcome, DocumentError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (input, output) = (input.as_ref(), output.as_ref());

        info!(path = %input.display(), "loading feature collection");
        let collection = FeatureCollection::from_path(input)?;
        let total = collection.len();

        info!(counties = ?allow_list.names(), property_key, "filtering features");
        let filtered = filter_features(collection, allow_list, property_key);
        let matched = filtered.len();
        info!(matched, total, "matching features found");

        if filtered.is_empty() {
            warn!("no features found for the requested counties; no output file was created");
            return Ok(FilterOutcome {
                total,
                matched,
                written: false,
            });
        }

        geojson::write_pretty(output, &filtered)?;
        info!(path = %output.display(), "filtered collection written");

        Ok(FilterOutcome {
            total,
            matched,
            written: true,
        })
    }
}
