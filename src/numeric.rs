use std::sync::LazyLock;

use regex::Regex;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("invalid numeric prefix pattern")
});

fn numeric_prefix(value: &str) -> Option<f64> {
    NUMERIC_PREFIX
        .find(value.trim_start())
        .and_then(|found| found.as_str().parse::<f64>().ok())
}

pub fn to_number(value: &str, default: f64) -> f64 {
    numeric_prefix(value)
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(default)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

// Infinite input is still numeric here and clamps to an end of the range.
pub fn override_fraction(raw: &str) -> f64 {
    clamp01(numeric_prefix(raw).unwrap_or(f64::NAN) / 100.0)
}
