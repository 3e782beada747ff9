use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::pipeline::AnalysisReport;

pub const CHART_TITLE: &str = "Expected DrAV Trendline by Pick";

const POINT_COLOR: [u8; 4] = [31, 119, 180, 153];

/// Series shown in the trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Per-pick means, one point per pick.
    pub means: Vec<[f64; 2]>,
    /// Dense samples along the fitted curve.
    pub trend: Vec<[f64; 2]>,
}

impl ChartData {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            means: report
                .aggregates
                .pick_means()
                .into_iter()
                .map(|(pick, mean)| [pick as f64, mean])
                .collect(),
            trend: report.trend_samples.clone(),
        }
    }
}

/// Window showing per-pick means against the fitted trendline.
pub struct TrendChartApp {
    data: ChartData,
}

impl TrendChartApp {
    pub fn new(cc: &eframe::CreationContext<'_>, data: ChartData) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(20.0),
        );
        ctx.set_style(style);
        ctx.set_visuals(egui::Visuals::light());

        Self { data }
    }
}

impl eframe::App for TrendChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| ui.heading(CHART_TITLE));

            Plot::new("drav_trend")
                .legend(Legend::default())
                .x_axis_label("Draft Pick")
                .y_axis_label("Expected DrAV")
                .show_grid(true)
                .show(ui, |plot_ui| {
                    let [r, g, b, a] = POINT_COLOR;
                    plot_ui.points(
                        Points::new(PlotPoints::from(self.data.means.clone()))
                            .name("Mean DrAV")
                            .radius(3.0)
                            .color(egui::Color32::from_rgba_unmultiplied(r, g, b, a)),
                    );
                    plot_ui.line(
                        Line::new(PlotPoints::from(self.data.trend.clone()))
                            .name("Expected DrAV Trendline")
                            .color(egui::Color32::RED)
                            .width(2.0),
                    );
                });
        });
    }
}

/// Open the chart window and block until it is closed.
pub fn show_chart(data: ChartData) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(CHART_TITLE)
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    tracing::info!(
        "Showing chart: {} picks, {} trend samples",
        data.means.len(),
        data.trend.len()
    );
    eframe::run_native(
        CHART_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(TrendChartApp::new(cc, data)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::{CleanedData, Record};
    use crate::pipeline::analyze;

    #[test]
    fn chart_series_follow_report() {
        let records: Vec<Record> = (1..=6)
            .flat_map(|p| [Record::new(p, 30.0 / p as f64), Record::new(p, 20.0 / p as f64)])
            .collect();
        let report = analyze(&CleanedData { records, dropped: 0 }).unwrap();
        let data = ChartData::from_report(&report);

        assert_eq!(data.means.len(), 6);
        assert_eq!(data.means[0], [1.0, 25.0]);
        assert_eq!(data.means[5], [6.0, 4.17]);
        assert_eq!(data.trend, report.trend_samples);
    }
}
