use crate::commands::{run_csv_filter, run_geojson_filter, run_hierarchy};
use clap::{Args, Parser, Subcommand};
use kenya_admin::config::AppConfig;
use kenya_admin::error::AppError;
use kenya_admin::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "kenya-admin",
    about = "Extract and filter Kenyan county, sub-county and ward datasets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a county -> sub-county -> wards JSON document from a ward GeoJSON file
    Hierarchy(HierarchyArgs),
    /// Keep only the records that belong to the configured counties
    Filter {
        #[command(subcommand)]
        command: FilterCommand,
    },
}

#[derive(Subcommand, Debug)]
enum FilterCommand {
    /// Filter a GeoJSON FeatureCollection by a county property
    Geojson(GeoJsonFilterArgs),
    /// Filter CSV rows by a county column
    Csv(CsvFilterArgs),
}

#[derive(Args, Debug)]
pub(crate) struct HierarchyArgs {
    /// Ward-level GeoJSON FeatureCollection to read
    #[arg(long, default_value = "kenya_wards.json")]
    pub(crate) input: PathBuf,
    /// Destination for the nested JSON document
    #[arg(long, default_value = "county_hierarchy.json")]
    pub(crate) output: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct GeoJsonFilterArgs {
    /// GeoJSON FeatureCollection to read
    #[arg(long, default_value = "kenya_wards.json")]
    pub(crate) input: PathBuf,
    /// Destination for the filtered FeatureCollection
    #[arg(long, default_value = "filtered_counties.json")]
    pub(crate) output: PathBuf,
    /// County to keep; repeat to keep several (defaults to KENYA_COUNTIES)
    #[arg(long = "county")]
    pub(crate) counties: Vec<String>,
    /// Feature property holding the county name (defaults to KENYA_COUNTY_PROPERTY)
    #[arg(long)]
    pub(crate) property: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CsvFilterArgs {
    /// CSV file to read
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Destination for the filtered CSV
    #[arg(long)]
    pub(crate) output: PathBuf,
    /// County to keep; repeat to keep several (defaults to KENYA_COUNTIES)
    #[arg(long = "county")]
    pub(crate) counties: Vec<String>,
    /// Column holding the county name (defaults to KENYA_CSV_COUNTY_COLUMN)
    #[arg(long)]
    pub(crate) column: Option<String>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(
        environment = ?config.environment,
        counties = ?config.filter.counties,
        "configuration loaded"
    );

    match cli.command {
        Command::Hierarchy(args) => run_hierarchy(args),
        Command::Filter {
            command: FilterCommand::Geojson(args),
        } => run_geojson_filter(args, &config),
        Command::Filter {
            command: FilterCommand::Csv(args),
        } => run_csv_filter(args, &config),
    }
}
