//! Reading and writing GeoJSON FeatureCollections.
//!
//! Only the members the workflows inspect are typed. Geometry and any foreign
//! members are carried as raw JSON so a filtered document round-trips the
//! input untouched, with object key order preserved.

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("the file was not found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("could not decode JSON from {}; it might be corrupted or not a valid JSON file: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} is not a valid GeoJSON FeatureCollection: {source}", path.display())]
    InvalidCollection {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single GeoJSON feature.
///
/// `type` is carried as raw JSON and a `properties` member that is not an
/// object reads as absent, so one malformed feature never rejects the
/// whole collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: Value,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default, deserialize_with = "object_or_none")]
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub foreign_members: Map<String, Value>,
}

impl Feature {
    /// Builds a feature without geometry, mostly useful for tests and fixtures.
    pub fn with_properties(properties: Map<String, Value>) -> Self {
        Self {
            kind: feature_type(),
            geometry: Value::Null,
            properties: Some(properties),
            foreign_members: Map::new(),
        }
    }

    /// Looks up a property; absent `properties` behaves like an empty object.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }
}

fn feature_type() -> Value {
    Value::String("Feature".to_string())
}

fn object_or_none<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Ok(None),
    }
}

/// An ordered list of features plus the collection-level members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<Value>,
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub foreign_members: Map<String, Value>,
}

impl FeatureCollection {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| io_error(path, source))?;
        Self::from_reader(file, path)
    }

    /// Decodes a collection from `reader`. `origin` only labels errors.
    pub fn from_reader<R: Read>(mut reader: R, origin: &Path) -> Result<Self, DocumentError> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|source| io_error(origin, source))?;

        serde_json::from_slice(&raw).map_err(|source| match source.classify() {
            Category::Data => DocumentError::InvalidCollection {
                path: origin.to_path_buf(),
                source,
            },
            Category::Io => DocumentError::Io {
                path: origin.to_path_buf(),
                source: source.into(),
            },
            Category::Syntax | Category::Eof => DocumentError::Parse {
                path: origin.to_path_buf(),
                source,
            },
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

fn io_error(path: &Path, source: std::io::Error) -> DocumentError {
    if source.kind() == std::io::ErrorKind::NotFound {
        DocumentError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        DocumentError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes `value` as two-space indented JSON, creating or truncating `path`.
pub fn write_pretty<T, P>(path: P, value: &T) -> Result<(), DocumentError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let write_error = |source: std::io::Error| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| {
        if source.is_io() {
            DocumentError::Write {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            DocumentError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    writer.flush().map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(raw: &str) -> Result<FeatureCollection, DocumentError> {
        FeatureCollection::from_reader(raw.as_bytes(), Path::new("inline.json"))
    }

    #[test]
    fn decodes_features_and_keeps_unknown_members() {
        let collection = decode(
            r#"{"type":"FeatureCollection","name":"kenya_wards","features":[
                {"type":"Feature","id":7,"properties":{"county":"Meru County"},"geometry":null},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[37.6,0.05]}}
            ]}"#,
        )
        .expect("valid collection");

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.foreign_members.get("name"), Some(&json!("kenya_wards")));
        assert_eq!(collection.features[0].foreign_members.get("id"), Some(&json!(7)));
        assert_eq!(
            collection.features[0].property("county"),
            Some(&json!("Meru County"))
        );
        assert!(collection.features[1].properties.is_none());
        assert!(collection.features[1].property("county").is_none());
    }

    #[test]
    fn null_properties_are_absent() {
        let collection =
            decode(r#"{"features":[{"type":"Feature","properties":null}]}"#).expect("valid");
        assert!(collection.features[0].property("ward").is_none());
    }

    #[test]
    fn malformed_feature_members_do_not_reject_the_collection() {
        let collection = decode(
            r#"{"features":[
                {"type":1,"properties":{"county":"Meru County"}},
                {"type":"Feature","properties":"oops"},
                {"type":"Feature","properties":[1,2]},
                {"type":"Feature","properties":{"county":"Embu County"}}
            ]}"#,
        )
        .expect("collection decodes");

        assert_eq!(collection.len(), 4);
        assert_eq!(collection.features[0].kind, json!(1));
        assert_eq!(
            collection.features[0].property("county"),
            Some(&json!("Meru County"))
        );
        assert!(collection.features[1].properties.is_none());
        assert!(collection.features[2].properties.is_none());
        assert_eq!(collection.features[3].kind, json!("Feature"));
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let error = decode(r#"{"type":"FeatureCollection","features":["#).expect_err("eof");
        assert!(matches!(error, DocumentError::Parse { .. }));

        let error = decode("not json").expect_err("syntax");
        assert!(matches!(error, DocumentError::Parse { .. }));
    }

    #[test]
    fn wrong_shape_is_an_invalid_collection() {
        for raw in [
            r#"{"type":"FeatureCollection"}"#,
            r#"{"type":"FeatureCollection","features":{}}"#,
            r#"[1,2,3]"#,
            r#"{"features":["not a feature"]}"#,
        ] {
            let error = decode(raw).expect_err("invalid collection");
            assert!(
                matches!(error, DocumentError::InvalidCollection { .. }),
                "unexpected error for {raw}: {error:?}"
            );
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let error = FeatureCollection::from_path("./does-not-exist.geojson")
            .expect_err("missing file");
        assert!(matches!(error, DocumentError::NotFound { .. }));
        assert!(error.to_string().contains("does-not-exist.geojson"));
    }

    #[test]
    fn write_pretty_indents_and_keeps_key_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.json");
        let value = json!({ "zeta": [1], "alpha": { "b": 2, "a": 1 } });

        write_pretty(&path, &value).expect("write succeeds");

        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(
            written,
            "{\n  \"zeta\": [\n    1\n  ],\n  \"alpha\": {\n    \"b\": 2,\n    \"a\": 1\n  }\n}"
        );
    }

    #[test]
    fn write_into_missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.json");
        let error = write_pretty(&path, &json!({})).expect_err("no parent directory");
        assert!(matches!(error, DocumentError::Write { .. }));
    }
}
