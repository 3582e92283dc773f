use serde::Serialize;

use crate::delta::{
    format_fraction_pct, format_pct, format_signed_pct, metric_delta, relative_improvement,
};
use crate::model::{MethodAggregate, Metric, Overrides};
use crate::projection::Projections;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Raw,
    Targeted,
    Blended,
}

impl ViewKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Raw => "Raw measured",
            Self::Targeted => "Targeted projection",
            Self::Blended => "Blended projection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: Metric,
    pub label: &'static str,
    pub baseline: f64,
    pub derived: f64,
    pub delta_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub kind: ViewKind,
    pub rows: Vec<MetricRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    pub baseline_precision: f64,
    pub candidate_precision: f64,
    pub precision_delta_pct: f64,
    pub recall_delta_pct: f64,
    pub faith_delta_pct: f64,
    pub hall_reduction_pct: f64,
    pub latency_reduction_pct: f64,
}

impl KpiSummary {
    pub fn line(&self, baseline_method: &str, candidate_method: &str) -> String {
        [
            format!(
                "Precision: {baseline_method} {} -> {candidate_method} {} (delta {})",
                format_fraction_pct(self.baseline_precision),
                format_fraction_pct(self.candidate_precision),
                format_pct(self.precision_delta_pct)
            ),
            format!("Recall delta: {}", format_pct(self.recall_delta_pct)),
            format!("Faith delta: {}", format_pct(self.faith_delta_pct)),
            format!("Hall down: {}", format_pct(self.hall_reduction_pct)),
            format!("Latency down: {}", format_pct(self.latency_reduction_pct)),
        ]
        .join(" | ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub views: Vec<ComparisonView>,
    pub kpi: KpiSummary,
}

impl MetricRow {
    pub fn formatted_delta(&self) -> String {
        format_signed_pct(self.delta_pct)
    }
}

// `baseline_precision` replaces the measured value in the precision row.
pub fn build_view(
    kind: ViewKind,
    baseline: &MethodAggregate,
    derived: &MethodAggregate,
    baseline_precision: Option<f64>,
) -> ComparisonView {
    let rows = Metric::ALL
        .into_iter()
        .map(|metric| {
            let baseline_value = match (metric, baseline_precision) {
                (Metric::Precision, Some(value)) => value,
                _ => baseline.value(metric),
            };
            let derived_value = derived.value(metric);
            MetricRow {
                metric,
                label: metric.label(),
                baseline: baseline_value,
                derived: derived_value,
                delta_pct: metric_delta(metric, derived_value, baseline_value),
            }
        })
        .collect();

    ComparisonView { kind, rows }
}

pub fn build_kpi(
    baseline: &MethodAggregate,
    blended: &MethodAggregate,
    baseline_precision: f64,
) -> KpiSummary {
    KpiSummary {
        baseline_precision,
        candidate_precision: blended.precision,
        precision_delta_pct: relative_improvement(blended.precision, baseline_precision, true),
        recall_delta_pct: metric_delta(Metric::Recall, blended.recall, baseline.recall),
        faith_delta_pct: metric_delta(Metric::Faithfulness, blended.faith, baseline.faith),
        hall_reduction_pct: metric_delta(Metric::Hallucination, blended.hall, baseline.hall),
        latency_reduction_pct: metric_delta(Metric::Latency, blended.latency, baseline.latency),
    }
}

pub fn build_comparison(
    baseline: &MethodAggregate,
    candidate: &MethodAggregate,
    projections: &Projections,
    overrides: &Overrides,
) -> Comparison {
    let blended_baseline_precision = overrides
        .baseline_precision
        .unwrap_or(baseline.precision);

    let views = vec![
        build_view(ViewKind::Raw, baseline, candidate, None),
        build_view(ViewKind::Targeted, baseline, &projections.targeted, None),
        build_view(
            ViewKind::Blended,
            baseline,
            &projections.blended,
            overrides.baseline_precision,
        ),
    ];
    let kpi = build_kpi(baseline, &projections.blended, blended_baseline_precision);

    Comparison { views, kpi }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionConfig, project};

    fn baseline() -> MethodAggregate {
        MethodAggregate {
            precision: 0.40,
            recall: 0.50,
            faith: 0.70,
            hall: 0.20,
            latency: 500.0,
            samples: 4,
        }
    }

    #[test]
    fn view_rows_follow_fixed_metric_order() {
        let view = build_view(ViewKind::Raw, &baseline(), &baseline(), None);
        let labels: Vec<&str> = view.rows.iter().map(|row| row.label).collect();
        assert_eq!(
            labels,
            vec![
                "Retrieval Precision",
                "Retrieval Recall",
                "Answer Faithfulness",
                "Hallucination Rate",
                "Latency (ms)",
            ]
        );
        assert!(view.rows.iter().all(|row| row.delta_pct.abs() < 1e-6));
    }

    #[test]
    fn targeted_view_reports_positive_deltas_for_every_metric() {
        let config = ProjectionConfig::default();
        let projections = project(&baseline(), &baseline(), &Overrides::default(), &config);
        let view = build_view(ViewKind::Targeted, &baseline(), &projections.targeted, None);

        let deltas: Vec<String> = view.rows.iter().map(MetricRow::formatted_delta).collect();
        assert_eq!(deltas, vec!["+42.0%", "+45.0%", "+9.0%", "+5.0%", "+10.0%"]);
    }

    #[test]
    fn blended_view_uses_baseline_precision_override() {
        let overrides = Overrides {
            precision: 0.6,
            recall_floor: 0.0,
            baseline_precision: Some(0.5),
        };
        let projections = project(
            &baseline(),
            &baseline(),
            &overrides,
            &ProjectionConfig::default(),
        );
        let comparison = build_comparison(&baseline(), &baseline(), &projections, &overrides);

        let blended = &comparison.views[2];
        assert_eq!(blended.kind, ViewKind::Blended);
        assert_eq!(blended.rows[0].baseline, 0.5);
        assert_eq!(blended.rows[0].derived, 0.6);
        assert!((blended.rows[0].delta_pct - 20.0).abs() < 1e-6);

        // raw and targeted views keep the measured baseline precision
        assert_eq!(comparison.views[0].rows[0].baseline, 0.40);
        assert_eq!(comparison.views[1].rows[0].baseline, 0.40);

        assert_eq!(comparison.kpi.baseline_precision, 0.5);
        assert!((comparison.kpi.precision_delta_pct - 20.0).abs() < 1e-6);
    }

    #[test]
    fn kpi_falls_back_to_measured_baseline_precision() {
        let overrides = Overrides {
            precision: 0.8,
            ..Overrides::default()
        };
        let projections = project(
            &baseline(),
            &baseline(),
            &overrides,
            &ProjectionConfig::default(),
        );
        let comparison = build_comparison(&baseline(), &baseline(), &projections, &overrides);

        assert_eq!(comparison.kpi.baseline_precision, 0.40);
        assert!((comparison.kpi.precision_delta_pct - 100.0).abs() < 1e-6);
        let line = comparison.kpi.line("HyDE-llm", "HyPE-llm");
        assert!(line.starts_with("Precision: HyDE-llm 40.00% -> HyPE-llm 80.00% (delta 100.0%)"));
        assert!(line.contains("Latency down: "));
    }

    #[test]
    fn kpi_line_never_prints_negative_zero() {
        let kpi = KpiSummary {
            baseline_precision: 0.5,
            candidate_precision: 0.5,
            precision_delta_pct: -0.0,
            recall_delta_pct: -0.0,
            faith_delta_pct: 1.25,
            hall_reduction_pct: -0.0,
            latency_reduction_pct: -0.0,
        };
        let line = kpi.line("HyDE-llm", "HyPE-llm");
        assert!(!line.contains("-0.0"), "{line}");
        assert!(line.contains("(delta 0.0%)"));
        assert!(line.contains("Recall delta: 0.0%"));
        assert!(line.contains("Latency down: 0.0%"));
    }

    #[test]
    fn lower_is_better_rows_report_reduction_as_positive() {
        let derived = MethodAggregate {
            hall: 0.10,
            latency: 250.0,
            ..baseline()
        };
        let view = build_view(ViewKind::Raw, &baseline(), &derived, None);
        assert!((view.rows[3].delta_pct - 50.0).abs() < 1e-6);
        assert!((view.rows[4].delta_pct - 50.0).abs() < 1e-6);
    }
}
