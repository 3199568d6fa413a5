//! Map binder: city + basemap style -> deck.gl style view spec.

use crate::config::{BasemapStyle, City, MapConfig, MapDefaults, StyleKind};
use crate::data::catalog::{city_table, style_table, CITY_COL, STYLE_COL};
use crate::selection::{Choice, Selection, SelectionError};
use crate::view::BindError;
use polars::prelude::*;
use serde::Serialize;

pub const CITY_PARAM: &str = "city";
pub const STYLE_PARAM: &str = "style";
pub const BITMAP_LAYER: &str = "BitmapLayer";

/// Camera position and orientation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

/// An overlay layer drawn above the base style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    #[serde(rename = "@@type")]
    pub layer_type: String,
    pub id: String,
    pub image: Option<String>,
    pub bounds: [f64; 4],
}

/// Declarative map description handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSpec {
    pub initial_view_state: ViewState,
    pub map_style: Option<String>,
    pub layers: Vec<LayerSpec>,
}

pub struct MapBinder {
    defaults: MapDefaults,
}

impl MapBinder {
    pub fn new(defaults: MapDefaults) -> Self {
        Self { defaults }
    }

    /// Bind a center and a basemap style.
    ///
    /// Vector styles become the base style with no layers. Raster templates
    /// become a single full-globe bitmap overlay and no base style.
    pub fn bind(&self, center: &City, style: &BasemapStyle) -> DeckSpec {
        let initial_view_state = ViewState {
            latitude: center.lat,
            longitude: center.lon,
            zoom: self.defaults.zoom,
            pitch: self.defaults.pitch,
            bearing: self.defaults.bearing,
        };

        match style.kind {
            StyleKind::Vector => DeckSpec {
                initial_view_state,
                map_style: Some(style.url.to_string()),
                layers: Vec::new(),
            },
            StyleKind::Raster => DeckSpec {
                initial_view_state,
                map_style: None,
                layers: vec![LayerSpec {
                    layer_type: BITMAP_LAYER.to_string(),
                    id: "basemap-raster".to_string(),
                    image: Some(style.url.to_string()),
                    bounds: self.defaults.overlay_bounds,
                }],
            },
        }
    }
}

/// City map explorer: static tables plus a re-render entry point.
pub struct MapExplorer {
    config: MapConfig,
    cities: DataFrame,
    styles: DataFrame,
    binder: MapBinder,
}

impl MapExplorer {
    pub fn new(config: MapConfig) -> Result<Self, BindError> {
        let cities = city_table(&config.cities)?;
        let styles = style_table(&config.styles)?;
        let binder = MapBinder::new(config.defaults);
        Ok(Self {
            config,
            cities,
            styles,
            binder,
        })
    }

    pub fn cities(&self) -> &[City] {
        &self.config.cities
    }

    /// Sidebar choices: city then style, each starting at its first entry.
    pub fn choices(&self) -> Result<(Choice, Choice), SelectionError> {
        Ok((
            Choice::from_column(&self.cities, CITY_PARAM, CITY_COL)?,
            Choice::from_column(&self.styles, STYLE_PARAM, STYLE_COL)?,
        ))
    }

    /// Produce a fresh view spec for the current selection.
    pub fn render(&self, selection: &Selection) -> Result<DeckSpec, BindError> {
        let city = self.lookup(selection, CITY_PARAM, |name| self.config.city(name))?;
        let style = self.lookup(selection, STYLE_PARAM, |name| self.config.style(name))?;
        Ok(self.binder.bind(city, style))
    }

    fn lookup<'a, T>(
        &'a self,
        selection: &Selection,
        param: &str,
        find: impl Fn(&str) -> Option<&'a T>,
    ) -> Result<&'a T, BindError> {
        let value = selection
            .get(param)
            .ok_or_else(|| BindError::MissingParameter(param.to_string()))?;
        value
            .as_str()
            .and_then(find)
            .ok_or_else(|| BindError::UnknownChoice {
                param: param.to_string(),
                value: value.to_string(),
            })
    }
}
