use std::io::{self, Write};

use anyhow::{Context, Result};

use super::ComparisonOutcome;
use crate::delta::format_metric_value;
use crate::views::ComparisonView;

pub fn write_json_response(outcome: &ComparisonOutcome) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, outcome)
        .context("failed to serialize comparison json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

pub fn write_text_response(outcome: &ComparisonOutcome) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    render_text(&mut output, outcome)?;
    output.flush()?;
    Ok(())
}

pub fn render_text<W: Write>(output: &mut W, outcome: &ComparisonOutcome) -> Result<()> {
    writeln!(
        output,
        "Records: {} (baseline {}={} candidate {}={})",
        outcome.record_count,
        outcome.methods.baseline,
        outcome.baseline.samples,
        outcome.methods.candidate,
        outcome.candidate.samples,
    )?;
    writeln!(output, "KPIs: {}", outcome.kpi_line)?;

    for view in &outcome.comparison.views {
        writeln!(output)?;
        render_view(output, view, &outcome.methods.baseline, &outcome.methods.candidate)?;
    }

    Ok(())
}

fn render_view<W: Write>(
    output: &mut W,
    view: &ComparisonView,
    baseline_label: &str,
    candidate_label: &str,
) -> Result<()> {
    let metric_width = view
        .rows
        .iter()
        .map(|row| row.label.len())
        .max()
        .unwrap_or(0)
        .max("Metric".len());

    writeln!(output, "{}", view.kind.title())?;
    writeln!(
        output,
        "{:<metric_width$}  {:>14}  {:>14}  {:>9}",
        "Metric", baseline_label, candidate_label, "Delta"
    )?;
    for row in &view.rows {
        writeln!(
            output,
            "{:<metric_width$}  {:>14}  {:>14}  {:>9}",
            row.label,
            format_metric_value(row.metric, row.baseline),
            format_metric_value(row.metric, row.derived),
            row.formatted_delta(),
        )?;
    }

    Ok(())
}
