pub mod config;
pub mod error;
pub mod geojson;
pub mod telemetry;
pub mod workflows;
