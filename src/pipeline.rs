//! Runs the stages in order: load, clean, aggregate, fit, report.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::data::cleaner::{self, CleanedData};
use crate::data::loader;
use crate::error::{Result, WriteError};
use crate::processing::aggregate::{self, Aggregates};
use crate::processing::statistics::round2;
use crate::processing::trend::{TrendCurve, TREND_DEGREE, TREND_SAMPLES};
use crate::report::{tables, workbook};
use crate::ui::chart::{self, ChartData};

/// Everything one run produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub rows_dropped: usize,
    pub aggregates: Aggregates,
    pub trend: TrendCurve,
    /// `[pick, value]` points evenly spaced over the observed picks.
    pub trend_samples: Vec<[f64; 2]>,
}

/// Aggregate cleaned records and fit the trendline over per-pick means.
pub fn analyze(cleaned: &CleanedData) -> Result<AnalysisReport> {
    let mut aggregates = aggregate::aggregate(&cleaned.records);

    let (x, y): (Vec<f64>, Vec<f64>) = aggregates
        .pick_means()
        .into_iter()
        .map(|(pick, mean)| (pick as f64, mean))
        .unzip();
    let trend = TrendCurve::fit(&x, &y, TREND_DEGREE)?;
    for p in &mut aggregates.picks {
        p.trendline = Some(round2(trend.evaluate(p.pick as f64)));
    }
    let trend_samples = trend.sample(TREND_SAMPLES);
    let (lo, hi) = trend.domain();
    tracing::info!("Fitted degree {} trendline over {} picks ({lo}..={hi})", trend.degree(), x.len());

    Ok(AnalysisReport {
        rows_dropped: cleaned.dropped,
        aggregates,
        trend,
        trend_samples,
    })
}

/// Full run: read the input, write the workbook (and JSON if asked), then
/// show the chart unless headless.
pub fn run(config: &AnalysisConfig) -> Result<AnalysisReport> {
    let required = [config.pick_column.as_str(), config.value_column.as_str()];
    let data = loader::load_file(&config.input_path, config.sheet.as_deref(), &required)?;
    let cleaned = cleaner::clean(&data, &config.pick_column, &config.value_column);

    let report = analyze(&cleaned)?;

    let output = config.resolved_output_path();
    workbook::write_workbook(&output, &tables::build_tables(&report.aggregates))?;

    if let Some(path) = &config.json_path {
        let json = serde_json::to_string_pretty(&report).map_err(WriteError::from)?;
        std::fs::write(path, json).map_err(WriteError::from)?;
        tracing::info!("Report saved to {:?}", path);
    }

    if config.headless {
        tracing::debug!("Headless run, chart skipped");
    } else {
        chart::show_chart(ChartData::from_report(&report))?;
    }

    tracing::info!(
        "Analysis complete! {} records over {} picks. Results saved to {:?}",
        report.aggregates.record_count(),
        report.aggregates.picks.len(),
        output
    );
    Ok(report)
}
