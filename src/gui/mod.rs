//! GUI module - User interface components

mod chart_viewer;
mod control_panel;
mod map_app;
mod payroll_app;

pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use map_app::MapExplorerApp;
pub use payroll_app::PayrollApp;
