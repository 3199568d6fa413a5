//! GeoViz Board - city map explorer, animated GDP choropleth and payroll dashboard.
//!
//! Each tool reads a table, lets the user pick values from its columns and
//! binds the picked rows to a declarative view spec that a renderer consumes.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod selection;
pub mod stats;
pub mod view;
