//! NYC Payroll Data Explorer over a synthetic payroll table.

use anyhow::{anyhow, Context};
use eframe::egui;
use geoviz_board::config::PayrollModel;
use geoviz_board::data::PayrollGenerator;
use geoviz_board::gui::PayrollApp;
use geoviz_board::view::PayrollDashboard;

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    // Generated once per session; filters re-run against this table.
    let generator = PayrollGenerator::new(PayrollModel::from_env())?;
    let table = generator.generate().context("generating payroll table")?;
    log::info!("Generated {} payroll rows", table.height());

    let dashboard = PayrollDashboard::new(table)?;
    let app = PayrollApp::new(dashboard)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("NYC Payroll Data Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "NYC Payroll Data Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("{}", e))
}
