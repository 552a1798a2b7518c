//! Allow-list filters that cut a national dataset down to a handful of
//! counties, for both GeoJSON and CSV inputs.

mod csv_filter;
mod geojson_filter;

pub use csv_filter::{filter_csv, CsvCountyFilter, CsvFilterError, CsvFilterSummary};
pub use geojson_filter::{filter_features, FilteredCollection, GeoJsonCountyFilter};

use serde_json::Value;

/// Case-insensitive set of county names to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountyAllowList {
    names: Vec<String>,
    folded: Vec<String>,
}

impl CountyAllowList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let folded = names.iter().map(|name| fold(name)).collect();
        Self { names, folded }
    }

    /// Names as configured, for log output.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Surrounding whitespace and letter case are ignored; empty input never matches.
    pub fn contains(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let candidate = fold(candidate);
        self.folded.iter().any(|name| *name == candidate)
    }

    /// Like [`contains`](Self::contains) for a raw property value; non-strings never match.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        match value {
            Some(Value::String(text)) => self.contains(text),
            _ => false,
        }
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Counts reported by a filter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    pub total: usize,
    pub matched: usize,
    /// False when nothing matched and no output file was created.
    pub written: bool,
}
