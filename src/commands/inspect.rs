use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::aggregate::method_census;
use crate::cli::InspectArgs;
use crate::model::{CohortCount, METHOD_COLUMN, Metric};
use crate::records::{ParsedTable, parse_table};
use crate::util::{decode_source, read_source, sha256_hex};

#[derive(Debug)]
struct RunLogSummary {
    columns: Vec<String>,
    records: usize,
    short_rows: usize,
    missing_columns: Vec<&'static str>,
    cohorts: Vec<CohortCount>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let bytes = read_source(&args.csv)?;
    let text = decode_source(&bytes, &args.csv)?;
    let summary = summarize(&parse_table(&text))
        .with_context(|| format!("failed to inspect {}", args.csv.display()))?;

    info!(
        path = %args.csv.display(),
        sha256 = %sha256_hex(&bytes),
        columns = %summary.columns.join(","),
        records = summary.records,
        "loaded run log"
    );

    if summary.short_rows > 0 {
        warn!(
            short_rows = summary.short_rows,
            "rows with fewer fields than the header; missing cells default to 0"
        );
    }

    for column in &summary.missing_columns {
        warn!(column = %column, "required column missing; values default to 0");
    }

    for cohort in &summary.cohorts {
        info!(method = %cohort.method, records = cohort.records, "cohort");
    }

    Ok(())
}

fn summarize(table: &ParsedTable) -> Result<RunLogSummary> {
    if table.header.is_empty() {
        bail!("run log is empty");
    }

    let distinct_columns = table.header.iter().collect::<HashSet<_>>().len();
    let short_rows = table
        .records
        .iter()
        .filter(|record| record.columns().count() < distinct_columns)
        .count();

    Ok(RunLogSummary {
        columns: table.header.clone(),
        records: table.records.len(),
        short_rows,
        missing_columns: missing_columns(&table.header),
        cohorts: method_census(&table.records),
    })
}

fn missing_columns(header: &[String]) -> Vec<&'static str> {
    std::iter::once(METHOD_COLUMN)
        .chain(Metric::ALL.into_iter().map(Metric::column))
        .filter(|required| !header.iter().any(|column| column == required))
        .collect()
}
