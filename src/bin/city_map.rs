//! Geospatial Data Explorer - pick a city and a basemap style.

use anyhow::anyhow;
use eframe::egui;
use geoviz_board::config::MapConfig;
use geoviz_board::gui::MapExplorerApp;
use geoviz_board::view::MapExplorer;

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    let explorer = MapExplorer::new(MapConfig::default())?;
    let app = MapExplorerApp::new(explorer)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Geospatial Data Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Geospatial Data Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow!("{}", e))
}
