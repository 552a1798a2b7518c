//! County -> sub-county -> ward hierarchy built from a ward-level GeoJSON
//! dataset.
//!
//! Every level keeps first-seen order. Lookups go through a name index kept
//! next to the ordered entries, so insertion is check-then-insert and never
//! reorders anything.

mod normalizer;
mod parser;

pub use normalizer::{
    normalize_county, normalize_sub_county, normalize_ward, strip_suffix_and_trim,
};

use crate::geojson::{self, DocumentError, Feature, FeatureCollection};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use parser::LocationRecord;

/// Ordered mapping of county name to its sub-counties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationHierarchy {
    counties: Vec<County>,
    index: HashMap<String, usize>,
}

impl LocationHierarchy {
    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }

    /// Number of counties.
    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn ward_count(&self) -> usize {
        self.counties
            .iter()
            .flat_map(|county| county.sub_counties.iter())
            .map(|sub_county| sub_county.wards.len())
            .sum()
    }

    pub fn counties(&self) -> impl Iterator<Item = &County> {
        self.counties.iter()
    }

    pub fn county(&self, name: &str) -> Option<&County> {
        self.index.get(name).map(|&position| &self.counties[position])
    }

    fn county_entry(&mut self, name: String) -> &mut County {
        let position = match self.index.get(&name) {
            Some(&position) => position,
            None => {
                self.counties.push(County::new(name.clone()));
                self.index.insert(name, self.counties.len() - 1);
                self.counties.len() - 1
            }
        };
        &mut self.counties[position]
    }

    fn insert(&mut self, record: LocationRecord) {
        let LocationRecord {
            county,
            sub_county,
            ward,
        } = record;

        self.county_entry(county)
            .sub_county_entry(sub_county)
            .push_ward(ward);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct County {
    name: String,
    sub_counties: Vec<SubCounty>,
    index: HashMap<String, usize>,
}

impl County {
    fn new(name: String) -> Self {
        Self {
            name,
            sub_counties: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of sub-counties.
    pub fn len(&self) -> usize {
        self.sub_counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sub_counties.is_empty()
    }

    pub fn sub_counties(&self) -> impl Iterator<Item = &SubCounty> {
        self.sub_counties.iter()
    }

    pub fn sub_county(&self, name: &str) -> Option<&SubCounty> {
        self.index
            .get(name)
            .map(|&position| &self.sub_counties[position])
    }

    fn sub_county_entry(&mut self, name: String) -> &mut SubCounty {
        let position = match self.index.get(&name) {
            Some(&position) => position,
            None => {
                self.sub_counties.push(SubCounty::new(name.clone()));
                self.index.insert(name, self.sub_counties.len() - 1);
                self.sub_counties.len() - 1
            }
        };
        &mut self.sub_counties[position]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCounty {
    name: String,
    wards: Vec<String>,
}

impl SubCounty {
    fn new(name: String) -> Self {
        Self {
            name,
            wards: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ward names in first-seen order, without duplicates.
    pub fn wards(&self) -> &[String] {
        &self.wards
    }

    fn push_ward(&mut self, ward: String) {
        if !self.wards.contains(&ward) {
            self.wards.push(ward);
        }
    }
}

impl Serialize for LocationHierarchy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counties.len()))?;
        for county in &self.counties {
            map.serialize_entry(&county.name, county)?;
        }
        map.end()
    }
}

impl Serialize for County {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sub_counties.len()))?;
        for sub_county in &self.sub_counties {
            map.serialize_entry(&sub_county.name, &sub_county.wards)?;
        }
        map.end()
    }
}

/// Builds the hierarchy in one pass over `features`.
///
/// Features missing any of `county`, `subcounty` or `ward` (or carrying an
/// empty or non-string value) are skipped without error.
pub fn extract(features: &[Feature]) -> LocationHierarchy {
    let mut hierarchy = LocationHierarchy::default();
    let mut skipped = 0usize;

    for feature in features {
        let Some(record) = parser::location_record(feature) else {
            skipped += 1;
            continue;
        };
        hierarchy.insert(record);
    }

    debug!(
        features = features.len(),
        skipped,
        counties = hierarchy.len(),
        wards = hierarchy.ward_count(),
        "extracted location hierarchy"
    );

    hierarchy
}

pub struct HierarchyExtractor;

impl HierarchyExtractor {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LocationHierarchy, DocumentError> {
        let collection = FeatureCollection::from_path(path)?;
        Ok(extract(&collection.features))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LocationHierarchy, DocumentError> {
        let collection = FeatureCollection::from_reader(reader, Path::new("<reader>"))?;
        Ok(extract(&collection.features))
    }
}

/// Persists the hierarchy as an indented JSON object, keys in insertion order.
pub fn write_hierarchy<P: AsRef<Path>>(
    path: P,
    hierarchy: &LocationHierarchy,
) -> Result<(), DocumentError> {
    geojson::write_pretty(path, hierarchy)
}
