//! NYC Payroll Data Explorer window.

use crate::charts::StaticChartRenderer;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::selection::{SelectionError, Selector};
use crate::view::{PayrollDashboard, PayrollView};
use anyhow::Context;
use egui::{RichText, SidePanel};
use std::fs;
use std::path::Path;

const EXPORT_SIZE: (u32, u32) = (1200, 700);

pub struct PayrollApp {
    dashboard: PayrollDashboard,
    selector: Selector,
    control_panel: ControlPanel,
    view: Option<PayrollView>,
}

impl PayrollApp {
    pub fn new(dashboard: PayrollDashboard) -> Result<Self, SelectionError> {
        let selector = dashboard.selector()?;
        let mut app = Self {
            dashboard,
            selector,
            control_panel: ControlPanel::new("Filters")
                .with_button("🖼 Export charts", ControlPanelAction::ExportCharts),
            view: None,
        };
        app.rerender();
        Ok(app)
    }

    /// Re-run the pipeline for the current filters against the cached table.
    fn rerender(&mut self) {
        match self.dashboard.render(&self.selector.selection()) {
            Ok(view) => {
                self.view = Some(view);
                self.control_panel.set_status("");
            }
            Err(e) => {
                self.view = None;
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        match self.export_charts(&dir) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Charts exported to {}", dir.display()));
                if let Err(e) = open::that(&dir) {
                    log::warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn export_charts(&self, dir: &Path) -> anyhow::Result<()> {
        let view = self.view.as_ref().context("no charts to export")?;
        let (width, height) = EXPORT_SIZE;

        let histogram =
            StaticChartRenderer::render_histogram(&view.salary_distribution, width, height)?;
        let path = dir.join("salary_distribution.png");
        fs::write(&path, histogram).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());

        let bars =
            StaticChartRenderer::render_bar_chart(&view.department_comparison, width, height)?;
        let path = dir.join("department_comparison.png");
        fs::write(&path, bars).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote {}", path.display());

        Ok(())
    }
}

impl eframe::App for PayrollApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(220.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                let mut choices: Vec<_> = self.selector.choices_mut().iter_mut().collect();
                let action = self.control_panel.show(ui, &mut choices);
                match action {
                    ControlPanelAction::SelectionChanged => self.rerender(),
                    ControlPanelAction::ExportCharts => self.handle_export(),
                    _ => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("💰 NYC Payroll Data Explorer").size(26.0));
            ui.add_space(10.0);
            ChartViewer::show(ui, self.view.as_ref());
        });
    }
}
