//! Geospatial Data Explorer window.

use crate::charts::{ChartPlotter, HtmlPage};
use crate::gui::{ControlPanel, ControlPanelAction};
use crate::selection::{Choice, Selection, SelectionError};
use crate::view::{DeckSpec, MapExplorer};
use anyhow::Context;
use egui::{RichText, SidePanel};

pub struct MapExplorerApp {
    explorer: MapExplorer,
    city: Choice,
    style: Choice,
    control_panel: ControlPanel,
    spec: Option<DeckSpec>,
}

impl MapExplorerApp {
    pub fn new(explorer: MapExplorer) -> Result<Self, SelectionError> {
        let (city, style) = explorer.choices()?;
        let mut app = Self {
            explorer,
            city,
            style,
            control_panel: ControlPanel::new("⚙️ Controls")
                .with_button("🌐 Open in browser", ControlPanelAction::OpenInBrowser),
            spec: None,
        };
        app.rerender();
        Ok(app)
    }

    fn selection(&self) -> Selection {
        Selection::from_choices(&[&self.city, &self.style])
    }

    /// Rebuild the view spec from the current sidebar state.
    fn rerender(&mut self) {
        match self.explorer.render(&self.selection()) {
            Ok(spec) => {
                self.spec = Some(spec);
                self.control_panel.set_status("");
            }
            Err(e) => {
                self.spec = None;
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn open_in_browser(&self) -> anyhow::Result<()> {
        let spec = self.spec.as_ref().context("no map to show")?;
        let title = format!("{} - {}", self.city.current(), self.style.current());
        let html = HtmlPage::deck(spec, &title)?;
        let path = HtmlPage::write_temp("city_map.html", &html)?;
        HtmlPage::open(&path)?;
        Ok(())
    }
}

impl eframe::App for MapExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let action = self
                    .control_panel
                    .show(ui, &mut [&mut self.city, &mut self.style]);
                match action {
                    ControlPanelAction::SelectionChanged => self.rerender(),
                    ControlPanelAction::OpenInBrowser => {
                        if let Err(e) = self.open_in_browser() {
                            log::error!("Failed to open map: {:#}", e);
                            self.control_panel.set_status(&format!("Error: {}", e));
                        }
                    }
                    _ => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(RichText::new("🌍 Geospatial Data Explorer").size(26.0));
            ui.horizontal_wrapped(|ui| {
                ui.label("🗺️ Showing map for:");
                ui.label(RichText::new(self.city.current().to_string()).strong());
                ui.label("with style:");
                ui.label(RichText::new(self.style.current().to_string()).strong());
            });
            ui.add_space(8.0);

            let Some(spec) = &self.spec else {
                return;
            };

            egui::CollapsingHeader::new("View spec").show(ui, |ui| {
                let json = serde_json::to_string_pretty(spec).unwrap_or_default();
                ui.monospace(json);
            });
            ui.add_space(8.0);
            ChartPlotter::draw_map_preview(ui, self.explorer.cities(), spec);
        });
    }
}
