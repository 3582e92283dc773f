use serde::Serialize;
use tracing::warn;

use crate::aggregate::aggregate;
use crate::model::{MethodAggregate, Overrides};
use crate::projection::{ProjectionConfig, Projections, project};
use crate::records::parse_records;
use crate::views::{Comparison, build_comparison};

pub const REPORT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct CohortLabels {
    pub baseline: String,
    pub candidate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub methods: CohortLabels,
    pub record_count: usize,
    pub baseline: MethodAggregate,
    pub candidate: MethodAggregate,
    pub overrides: Overrides,
    pub config: ProjectionConfig,
    pub projections: Projections,
    pub comparison: Comparison,
    pub kpi_line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub report_version: u32,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    #[serde(flatten)]
    pub outcome: ComparisonOutcome,
}

pub fn compare_text(
    text: &str,
    methods: CohortLabels,
    overrides: Overrides,
    config: ProjectionConfig,
) -> ComparisonOutcome {
    let records = parse_records(text);
    let baseline = aggregate(&records, &methods.baseline);
    let candidate = aggregate(&records, &methods.candidate);

    for (role, label, stats) in [
        ("baseline", &methods.baseline, &baseline),
        ("candidate", &methods.candidate, &candidate),
    ] {
        if stats.samples == 0 {
            warn!(role, method = %label, "no records matched method; metrics default to 0");
        }
    }

    let projections = project(&baseline, &candidate, &overrides, &config);
    let comparison = build_comparison(&baseline, &candidate, &projections, &overrides);
    let kpi_line = comparison
        .kpi
        .line(&methods.baseline, &methods.candidate);

    ComparisonOutcome {
        methods,
        record_count: records.len(),
        baseline,
        candidate,
        overrides,
        config,
        projections,
        comparison,
        kpi_line,
    }
}
