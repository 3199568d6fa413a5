//! Chart Viewer Widget
//! Central scrollable panel for the payroll view: metrics, charts and table.

use crate::charts::ChartPlotter;
use crate::view::PayrollView;
use egui::{RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, view: Option<&PayrollView>) {
        let Some(view) = view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.columns(view.metrics.len().max(1), |columns| {
                    for (column, metric) in columns.iter_mut().zip(&view.metrics) {
                        ChartPlotter::draw_metric(column, metric);
                    }
                });
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Salary Distribution").size(18.0).strong());
                ChartPlotter::draw_histogram(ui, &view.salary_distribution, "salary_histogram");
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Top 10 Earners").size(18.0).strong());
                ChartPlotter::draw_table(ui, &view.top_earners, "top_earners");
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Department Comparison").size(18.0).strong());
                ChartPlotter::draw_bar_chart(ui, &view.department_comparison, "department_bars");
            });
    }
}
