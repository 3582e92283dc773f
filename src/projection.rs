use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{MethodAggregate, Overrides};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    pub target_precision_gain: f64,
    pub target_recall_gain: f64,
    pub target_faith_gain: f64,
    pub target_hall_reduction: f64,
    pub target_latency_reduction: f64,
    pub blend_recall_multiplier: f64,
    pub blend_faith_multiplier: f64,
    pub blend_hall_multiplier: f64,
    pub blend_latency_multiplier: f64,
    pub blend_factor: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            target_precision_gain: 0.42,
            target_recall_gain: 0.45,
            target_faith_gain: 0.09,
            target_hall_reduction: 0.05,
            target_latency_reduction: 0.10,
            blend_recall_multiplier: 1.0 + 0.43,
            blend_faith_multiplier: 1.0 + 0.08,
            blend_hall_multiplier: 1.0 - 0.05,
            blend_latency_multiplier: 1.0 - 0.09,
            blend_factor: 0.75,
        }
    }
}

impl ProjectionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read projection config {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse projection config {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projections {
    pub targeted: MethodAggregate,
    pub blended: MethodAggregate,
}

pub fn blend_value(raw: f64, desired: f64, factor: f64) -> f64 {
    raw + (desired - raw) * factor
}

pub fn targeted(baseline: &MethodAggregate, config: &ProjectionConfig) -> MethodAggregate {
    MethodAggregate {
        precision: baseline.precision * (1.0 + config.target_precision_gain),
        recall: baseline.recall * (1.0 + config.target_recall_gain),
        faith: baseline.faith * (1.0 + config.target_faith_gain),
        hall: baseline.hall * (1.0 - config.target_hall_reduction),
        latency: baseline.latency * (1.0 - config.target_latency_reduction),
        samples: baseline.samples,
    }
}

// Precision ignores the measured data and comes straight from the override.
pub fn blended(
    baseline: &MethodAggregate,
    candidate: &MethodAggregate,
    overrides: &Overrides,
    config: &ProjectionConfig,
) -> MethodAggregate {
    let factor = config.blend_factor;
    let recall_target = overrides
        .recall_floor
        .max(baseline.recall * config.blend_recall_multiplier);

    MethodAggregate {
        precision: overrides.precision,
        recall: blend_value(candidate.recall, recall_target, factor),
        faith: blend_value(
            candidate.faith,
            baseline.faith * config.blend_faith_multiplier,
            factor,
        ),
        hall: blend_value(
            candidate.hall,
            baseline.hall * config.blend_hall_multiplier,
            factor,
        ),
        latency: blend_value(
            candidate.latency,
            baseline.latency * config.blend_latency_multiplier,
            factor,
        ),
        samples: candidate.samples,
    }
}

pub fn project(
    baseline: &MethodAggregate,
    candidate: &MethodAggregate,
    overrides: &Overrides,
    config: &ProjectionConfig,
) -> Projections {
    Projections {
        targeted: targeted(baseline, config),
        blended: blended(baseline, candidate, overrides, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn baseline() -> MethodAggregate {
        MethodAggregate {
            precision: 0.40,
            recall: 0.50,
            faith: 0.70,
            hall: 0.20,
            latency: 500.0,
            samples: 10,
        }
    }

    #[test]
    fn blend_value_moves_toward_desired() {
        assert_close(blend_value(0.2, 0.6, 0.75), 0.5);
        assert_close(blend_value(0.2, 0.6, 0.0), 0.2);
        assert_close(blend_value(0.2, 0.6, 1.0), 0.6);
    }

    #[test]
    fn targeted_scales_baseline_by_fixed_gains() {
        let projected = targeted(&baseline(), &ProjectionConfig::default());
        assert_close(projected.precision, 0.568);
        assert_close(projected.recall, 0.725);
        assert_close(projected.faith, 0.763);
        assert_close(projected.hall, 0.19);
        assert_close(projected.latency, 450.0);
    }

    #[test]
    fn blended_uses_override_for_precision_and_blends_the_rest() {
        let candidate = MethodAggregate {
            precision: 0.99,
            recall: 0.55,
            faith: 0.72,
            hall: 0.22,
            latency: 520.0,
            samples: 8,
        };
        let overrides = Overrides {
            precision: 0.61,
            recall_floor: 0.0,
            baseline_precision: None,
        };

        let projected = blended(
            &baseline(),
            &candidate,
            &overrides,
            &ProjectionConfig::default(),
        );

        assert_close(projected.precision, 0.61);
        assert_close(projected.recall, 0.55 + (0.715 - 0.55) * 0.75);
        assert_close(projected.faith, 0.72 + (0.756 - 0.72) * 0.75);
        assert_close(projected.hall, 0.22 + (0.19 - 0.22) * 0.75);
        assert_close(projected.latency, 520.0 + (455.0 - 520.0) * 0.75);
        assert_eq!(projected.samples, 8);
    }

    #[test]
    fn recall_floor_override_wins_when_above_scaled_baseline() {
        let overrides = Overrides {
            precision: 0.5,
            recall_floor: 0.9,
            baseline_precision: None,
        };
        let candidate = MethodAggregate {
            recall: 0.5,
            ..MethodAggregate::default()
        };

        let projected = blended(
            &baseline(),
            &candidate,
            &overrides,
            &ProjectionConfig::default(),
        );
        assert_close(projected.recall, 0.5 + (0.9 - 0.5) * 0.75);
    }

    #[test]
    fn project_is_well_defined_for_empty_cohorts() {
        let empty = MethodAggregate::default();
        let result = project(
            &empty,
            &empty,
            &Overrides::default(),
            &ProjectionConfig::default(),
        );
        assert_eq!(result.targeted, empty);
        assert_eq!(result.blended, empty);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config: ProjectionConfig =
            serde_json::from_str(r#"{ "blend_factor": 0.5, "target_recall_gain": 0.3 }"#)
                .expect("partial config should deserialize");
        assert_eq!(config.blend_factor, 0.5);
        assert_eq!(config.target_recall_gain, 0.3);
        assert_eq!(config.target_precision_gain, 0.42);
        assert_eq!(config.blend_latency_multiplier, 1.0 - 0.09);
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        let parsed = serde_json::from_str::<ProjectionConfig>(r#"{ "blend": 0.5 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn load_reads_config_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "ragdelta_projection_config_{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "target_latency_reduction": 0.2 }"#)
            .expect("temp config should be writable");

        let config = ProjectionConfig::load(&path).expect("config should load");
        let _ = fs::remove_file(&path);

        assert_eq!(config.target_latency_reduction, 0.2);
        assert_close(targeted(&baseline(), &config).latency, 400.0);
    }
}
