//! Chart Plotter Module
//! Draws view specs inside egui using egui_plot.

use crate::config::City;
use crate::view::{BarSpec, DeckSpec, HistogramSpec, MetricSpec, TableSpec};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

/// Primary series color.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

const MUTED_COLOR: Color32 = Color32::from_rgb(150, 150, 150);

/// Draws view specs with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// A metric readout: small label above a large value.
    pub fn draw_metric(ui: &mut egui::Ui, metric: &MetricSpec) {
        ui.vertical(|ui| {
            ui.label(RichText::new(&metric.label).size(13.0).color(Color32::GRAY));
            ui.label(RichText::new(&metric.value).size(28.0));
        });
    }

    /// Histogram with one bar per bucket, spanning the bucket width.
    pub fn draw_histogram(ui: &mut egui::Ui, spec: &HistogramSpec, id: &str) {
        let bars: Vec<Bar> = spec
            .bins
            .iter()
            .map(|b| {
                Bar::new((b.start + b.end) / 2.0, b.count as f64)
                    .width(b.end - b.start)
                    .name(format!("{:.0} - {:.0}", b.start, b.end))
            })
            .collect();

        Plot::new(id)
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label(spec.column.clone())
            .y_axis_label("count")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(ACCENT_COLOR).name(&spec.column));
            });
    }

    /// Categorical bar chart. X axis: categories in spec order.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &BarSpec, id: &str) {
        let labels: Vec<String> = spec.bars.iter().map(|(c, _)| c.clone()).collect();
        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .enumerate()
            .map(|(i, (category, value))| Bar::new(i as f64, *value).width(0.6).name(category))
            .collect();

        ui.label(RichText::new(&spec.title).size(14.0).strong());
        Plot::new(id)
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label(spec.category_column.clone())
            .y_axis_label(spec.value_column.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx - mark.value).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(ACCENT_COLOR));
            });
    }

    /// Schematic world view: catalog cities, the selected center and any
    /// overlay bounds. Longitude on X, latitude on Y.
    pub fn draw_map_preview(ui: &mut egui::Ui, cities: &[City], spec: &DeckSpec) {
        let center = &spec.initial_view_state;

        Plot::new("map_preview")
            .height(ui.available_height().max(300.0))
            .data_aspect(1.0)
            .include_x(-180.0)
            .include_x(180.0)
            .include_y(-90.0)
            .include_y(90.0)
            .x_axis_label("lon")
            .y_axis_label("lat")
            .show(ui, |plot_ui| {
                for [west, south, east, north] in spec.layers.iter().map(|l| l.bounds) {
                    let outline = PlotPoints::from(vec![
                        [west, south],
                        [east, south],
                        [east, north],
                        [west, north],
                        [west, south],
                    ]);
                    plot_ui.line(Line::new(outline).color(ACCENT_COLOR).width(1.5).name("overlay bounds"));
                }

                let others: PlotPoints = cities
                    .iter()
                    .map(|c| [c.lon, c.lat])
                    .collect();
                plot_ui.points(Points::new(others).radius(3.0).color(MUTED_COLOR).name("cities"));

                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[center.longitude, center.latitude]]))
                        .radius(6.0)
                        .color(HIGHLIGHT_COLOR)
                        .name("center"),
                );
            });
    }

    /// Striped grid of display strings.
    pub fn draw_table(ui: &mut egui::Ui, table: &TableSpec, id: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for column in &table.columns {
                            ui.label(RichText::new(column).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &table.rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
