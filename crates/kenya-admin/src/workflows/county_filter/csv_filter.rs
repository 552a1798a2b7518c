use super::{CountyAllowList, FilterOutcome};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CsvFilterError {
    #[error("the file was not found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header has no '{column}' column")]
    MissingColumn { column: String },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Row counts from one pass of [`filter_csv`]; the header row is not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFilterSummary {
    pub total: usize,
    pub matched: usize,
}

/// Copies the header row and every data row whose `column` cell is on the
/// allow-list. Rows too short to have the column are dropped.
pub fn filter_csv<R: Read, W: Write>(
    reader: R,
    writer: W,
    column: &str,
    allow_list: &CountyAllowList,
) -> Result<CsvFilterSummary, CsvFilterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    let headers = csv_reader.headers()?.clone();
    let position = headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| CsvFilterError::MissingColumn {
            column: column.to_string(),
        })?;
    csv_writer.write_record(&headers)?;

    let mut summary = CsvFilterSummary {
        total: 0,
        matched: 0,
    };
    for record in csv_reader.records() {
        let record = record?;
        summary.total += 1;

        let keep = record
            .get(position)
            .is_some_and(|county| allow_list.contains(county));
        if keep {
            csv_writer.write_record(&record)?;
            summary.matched += 1;
        }
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(summary)
}

pub struct CsvCountyFilter;

impl CsvCountyFilter {
    /// Filters `input` into `output`. Nothing is written when no row matched.
    pub fn run<P, Q>(
        input: P,
        output: Q,
        column: &str,
        allow_list: &CountyAllowList,
    ) -> Result<FilterOutcome, CsvFilterError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let (input, output) = (input.as_ref(), output.as_ref());

        info!(path = %input.display(), "loading csv rows");
        let file = File::open(input).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CsvFilterError::NotFound {
                    path: input.to_path_buf(),
                }
            } else {
                CsvFilterError::Io {
                    path: input.to_path_buf(),
                    source,
                }
            }
        })?;

        info!(counties = ?allow_list.names(), column, "filtering rows");
        let mut buffer = Vec::new();
        let summary = filter_csv(file, &mut buffer, column, allow_list)?;
        info!(matched = summary.matched, total = summary.total, "matching rows found");

        if summary.matched == 0 {
            warn!("no rows found for the requested counties; no output file was created");
            return Ok(FilterOutcome {
                total: summary.total,
                matched: 0,
                written: false,
            });
        }

        std::fs::write(output, &buffer).map_err(|source| CsvFilterError::Write {
            path: output.to_path_buf(),
            source,
        })?;
        info!(path = %output.display(), "filtered rows written");

        Ok(FilterOutcome {
            total: summary.total,
            matched: summary.matched,
            written: true,
        })
    }
}
