use kenya_admin::geojson::{DocumentError, FeatureCollection};
use kenya_admin::workflows::county_filter::{
    CountyAllowList, CsvCountyFilter, CsvFilterError, GeoJsonCountyFilter,
};
use serde_json::{json, Value};
use std::fs;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/central_wards.geojson");

fn central_counties() -> CountyAllowList {
    CountyAllowList::new(["THARAKA-NITHI", "EMBU", "KIRINYAGA", "MERU"])
}

#[test]
fn geojson_filter_writes_matching_features_with_crs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("filtered.json");
    let allow_list = CountyAllowList::new(["meru county", "EMBU COUNTY"]);

    let outcome =
        GeoJsonCountyFilter::run(FIXTURE, &output, &allow_list, "county").expect("filter runs");

    assert_eq!(outcome.total, 9);
    assert_eq!(outcome.matched, 6);
    assert!(outcome.written);

    let written: Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read back")).expect("json");
    assert_eq!(written["type"], json!("FeatureCollection"));
    assert_eq!(
        written["crs"]["properties"]["name"],
        json!("urn:ogc:def:crs:OGC:1.3:CRS84")
    );
    let gids: Vec<i64> = written["features"]
        .as_array()
        .expect("features array")
        .iter()
        .filter_map(|feature| feature["properties"]["gid"].as_i64())
        .collect();
    assert_eq!(gids, [1, 2, 3, 4, 6, 7]);

    let reread = FeatureCollection::from_path(&output).expect("output is a collection");
    assert_eq!(reread.len(), 6);
}

#[test]
fn geojson_filter_without_matches_creates_no_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("filtered.json");

    // The fixture spells counties with the " County" suffix.
    let outcome = GeoJsonCountyFilter::run(FIXTURE, &output, &central_counties(), "county")
        .expect("filter runs");

    assert_eq!(outcome.matched, 0);
    assert!(!outcome.written);
    assert!(!output.exists());
}

#[test]
fn geojson_filter_rejects_documents_without_features() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("not_a_collection.json");
    let output = dir.path().join("filtered.json");
    fs::write(&input, r#"{"type": "Topology", "objects": {}}"#).expect("write");

    let error = GeoJsonCountyFilter::run(&input, &output, &central_counties(), "county")
        .expect_err("invalid collection");

    assert!(matches!(error, DocumentError::InvalidCollection { .. }));
    assert!(!output.exists());
}

#[test]
fn csv_filter_writes_header_and_matching_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("wards.csv");
    let output = dir.path().join("filtered.csv");
    fs::write(
        &input,
        "ward_code,county,ward\n\
0001,MOMBASA,PORT REITZ\n\
0352,THARAKA-NITHI,MITHERU\n\
0420,Kirinyaga,THIBA\n\
1450,NAIROBI,KILIMANI\n",
    )
    .expect("write");

    let outcome = CsvCountyFilter::run(&input, &output, "county", &central_counties())
        .expect("filter runs");

    assert_eq!(outcome.total, 4);
    assert_eq!(outcome.matched, 2);
    assert!(outcome.written);
    assert_eq!(
        fs::read_to_string(&output).expect("read back"),
        "ward_code,county,ward\n0352,THARAKA-NITHI,MITHERU\n0420,Kirinyaga,THIBA\n"
    );
}

#[test]
fn csv_filter_without_matches_creates_no_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("wards.csv");
    let output = dir.path().join("filtered.csv");
    fs::write(&input, "county,ward\nMOMBASA,PORT REITZ\n").expect("write");

    let outcome = CsvCountyFilter::run(&input, &output, "county", &central_counties())
        .expect("filter runs");

    assert!(!outcome.written);
    assert!(!output.exists());
}

#[test]
fn csv_filter_missing_column_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("wards.csv");
    let output = dir.path().join("filtered.csv");
    fs::write(&input, "County Name,ward\nMERU,MAUA\n").expect("write");

    let error = CsvCountyFilter::run(&input, &output, "county", &central_counties())
        .expect_err("missing column");

    assert!(matches!(error, CsvFilterError::MissingColumn { .. }));
    assert!(!output.exists());
}
