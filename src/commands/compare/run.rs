use anyhow::Result;
use tracing::info;

use super::output::{write_json_response, write_text_response};
use super::*;
use crate::cli::CompareArgs;
use crate::model::Overrides;
use crate::projection::ProjectionConfig;
use crate::util::{decode_source, now_utc_string, read_source, sha256_hex, write_json_pretty};

pub fn run(args: CompareArgs) -> Result<()> {
    info!(
        csv = %args.csv.display(),
        baseline = %args.baseline_method,
        candidate = %args.candidate_method,
        "starting comparison"
    );

    let config = match &args.projection_config {
        Some(path) => {
            let config = ProjectionConfig::load(path)?;
            info!(path = %path.display(), "loaded projection config");
            config
        }
        None => ProjectionConfig::default(),
    };

    let overrides = Overrides::from_percent_inputs(
        &args.precision_override,
        &args.recall_floor_override,
        args.baseline_precision_override.as_deref(),
    );

    let bytes = read_source(&args.csv)?;
    let text = decode_source(&bytes, &args.csv)?;

    let outcome = compare_text(
        &text,
        CohortLabels {
            baseline: args.baseline_method.clone(),
            candidate: args.candidate_method.clone(),
        },
        overrides,
        config,
    );

    info!(
        records = outcome.record_count,
        baseline_samples = outcome.baseline.samples,
        candidate_samples = outcome.candidate.samples,
        "aggregated run log"
    );

    if let Some(report_path) = &args.report_path {
        let report = ComparisonReport {
            report_version: REPORT_VERSION,
            generated_at: now_utc_string(),
            source_path: args.csv.display().to_string(),
            source_sha256: sha256_hex(&bytes),
            outcome: outcome.clone(),
        };
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote comparison report");
    }

    if args.json {
        write_json_response(&outcome)
    } else {
        write_text_response(&outcome)
    }
}
