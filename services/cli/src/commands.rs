use crate::cli::{CsvFilterArgs, GeoJsonFilterArgs, HierarchyArgs};
use kenya_admin::config::AppConfig;
use kenya_admin::error::AppError;
use kenya_admin::workflows::county_filter::{
    CountyAllowList, CsvCountyFilter, FilterOutcome, GeoJsonCountyFilter,
};
use kenya_admin::workflows::hierarchy::{self, HierarchyExtractor};
use tracing::{info, warn};

pub(crate) fn run_hierarchy(args: HierarchyArgs) -> Result<(), AppError> {
    let HierarchyArgs { input, output } = args;

    info!(path = %input.display(), "loading feature collection");
    let hierarchy = HierarchyExtractor::from_path(&input)?;

    if hierarchy.is_empty() {
        warn!("no feature carried county, subcounty and ward; no output file was created");
        return Ok(());
    }

    hierarchy::write_hierarchy(&output, &hierarchy)?;
    info!(
        counties = hierarchy.len(),
        wards = hierarchy.ward_count(),
        path = %output.display(),
        "location hierarchy written"
    );
    Ok(())
}

pub(crate) fn run_geojson_filter(
    args: GeoJsonFilterArgs,
    config: &AppConfig,
) -> Result<(), AppError> {
    let GeoJsonFilterArgs {
        input,
        output,
        counties,
        property,
    } = args;

    let allow_list = allow_list(counties, config);
    let property = property.unwrap_or_else(|| config.filter.county_property.clone());
    let outcome = GeoJsonCountyFilter::run(&input, &output, &allow_list, &property)?;
    report(outcome);
    Ok(())
}

pub(crate) fn run_csv_filter(args: CsvFilterArgs, config: &AppConfig) -> Result<(), AppError> {
    let CsvFilterArgs {
        input,
        output,
        counties,
        column,
    } = args;

    let allow_list = allow_list(counties, config);
    let column = column.unwrap_or_else(|| config.filter.csv_county_column.clone());
    let outcome = CsvCountyFilter::run(&input, &output, &column, &allow_list)?;
    report(outcome);
    Ok(())
}

fn allow_list(counties: Vec<String>, config: &AppConfig) -> CountyAllowList {
    if counties.is_empty() {
        CountyAllowList::new(config.filter.counties.iter().cloned())
    } else {
        CountyAllowList::new(counties)
    }
}

fn report(outcome: FilterOutcome) {
    if outcome.written {
        info!(
            matched = outcome.matched,
            total = outcome.total,
            "done, the filtered file has been created"
        );
    }
}
