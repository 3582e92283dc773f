use crate::model::{Metric, MetricUnit};

pub const DELTA_EPSILON: f64 = 1e-9;

pub fn relative_improvement(derived: f64, baseline: f64, higher_is_better: bool) -> f64 {
    let change = if higher_is_better {
        derived - baseline
    } else {
        baseline - derived
    };
    change / (baseline + DELTA_EPSILON) * 100.0
}

pub fn metric_delta(metric: Metric, derived: f64, baseline: f64) -> f64 {
    relative_improvement(derived, baseline, metric.higher_is_better())
}

// -0.0 would otherwise render as "-0.0%"
fn without_negative_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", without_negative_zero(value))
}

pub fn format_signed_pct(value: f64) -> String {
    let value = without_negative_zero(value);
    if value >= 0.0 {
        format!("+{value:.1}%")
    } else {
        format!("{value:.1}%")
    }
}

pub fn format_fraction_pct(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_latency_ms(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_metric_value(metric: Metric, value: f64) -> String {
    match metric.unit() {
        MetricUnit::Fraction => format_fraction_pct(value),
        MetricUnit::Milliseconds => format_latency_ms(value),
    }
}
