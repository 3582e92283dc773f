use serde::{Deserialize, Serialize};

use crate::numeric::override_fraction;

pub const METHOD_COLUMN: &str = "method";
pub const DEFAULT_BASELINE_METHOD: &str = "HyDE-llm";
pub const DEFAULT_CANDIDATE_METHOD: &str = "HyPE-llm";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Precision,
    Recall,
    Faithfulness,
    Hallucination,
    Latency,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MetricUnit {
    Fraction,
    Milliseconds,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Precision,
        Metric::Recall,
        Metric::Faithfulness,
        Metric::Hallucination,
        Metric::Latency,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Self::Precision => "CtxPrecision",
            Self::Recall => "CtxRecall",
            Self::Faithfulness => "SupportCoverage",
            Self::Hallucination => "HallucinationRate",
            Self::Latency => "latency_ms",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Precision => "Retrieval Precision",
            Self::Recall => "Retrieval Recall",
            Self::Faithfulness => "Answer Faithfulness",
            Self::Hallucination => "Hallucination Rate",
            Self::Latency => "Latency (ms)",
        }
    }

    pub fn higher_is_better(self) -> bool {
        matches!(self, Self::Precision | Self::Recall | Self::Faithfulness)
    }

    pub fn unit(self) -> MetricUnit {
        match self {
            Self::Latency => MetricUnit::Milliseconds,
            _ => MetricUnit::Fraction,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MethodAggregate {
    pub precision: f64,
    pub recall: f64,
    pub faith: f64,
    pub hall: f64,
    pub latency: f64,
    pub samples: usize,
}

impl MethodAggregate {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::Faithfulness => self.faith,
            Metric::Hallucination => self.hall,
            Metric::Latency => self.latency,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Overrides {
    pub precision: f64,
    pub recall_floor: f64,
    pub baseline_precision: Option<f64>,
}

impl Overrides {
    pub fn from_percent_inputs(
        precision: &str,
        recall_floor: &str,
        baseline_precision: Option<&str>,
    ) -> Self {
        Self {
            precision: override_fraction(precision),
            recall_floor: override_fraction(recall_floor),
            baseline_precision: baseline_precision.map(override_fraction),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CohortCount {
    pub method: String,
    pub records: usize,
}
