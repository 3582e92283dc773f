use crate::model::{CohortCount, METHOD_COLUMN, MethodAggregate, Metric};
use crate::numeric::{mean, to_number};
use crate::records::Record;

pub fn aggregate(records: &[Record], method_label: &str) -> MethodAggregate {
    let cohort: Vec<&Record> = records
        .iter()
        .filter(|record| record.get(METHOD_COLUMN) == Some(method_label))
        .collect();

    let metric_mean = |metric: Metric| {
        let values: Vec<f64> = cohort
            .iter()
            .map(|record| to_number(record.get(metric.column()).unwrap_or_default(), 0.0))
            .collect();
        mean(&values)
    };

    MethodAggregate {
        precision: metric_mean(Metric::Precision),
        recall: metric_mean(Metric::Recall),
        faith: metric_mean(Metric::Faithfulness),
        hall: metric_mean(Metric::Hallucination),
        latency: metric_mean(Metric::Latency),
        samples: cohort.len(),
    }
}

pub fn method_census(records: &[Record]) -> Vec<CohortCount> {
    let mut counts: Vec<CohortCount> = Vec::new();

    for record in records {
        let method = record.get(METHOD_COLUMN).unwrap_or_default();
        match counts.iter_mut().find(|entry| entry.method == method) {
            Some(entry) => entry.records += 1,
            None => counts.push(CohortCount {
                method: method.to_string(),
                records: 1,
            }),
        }
    }

    counts
}
