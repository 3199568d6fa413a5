//! Charts module - Rendering of view specs

mod html;
mod plotter;
mod renderer;

pub use html::{HtmlPage, PageError};
pub use plotter::{ChartPlotter, ACCENT_COLOR, HIGHLIGHT_COLOR};
pub use renderer::{RenderError, StaticChartRenderer};
