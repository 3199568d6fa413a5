//! Choropleth binder: per-entity, per-period table -> animated choropleth spec.
//!
//! Entities keep the identity and hover label of their first appearance, and
//! every frame lists them in the same global order, so an entity never gets
//! re-keyed or re-sorted as the animation advances.

use crate::data::{DataProcessor, Scalar};
use crate::view::BindError;
use polars::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Column-to-channel bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethBinding {
    pub locations: String,
    pub color: String,
    pub hover_name: String,
    pub animation_frame: String,
    pub animation_group: String,
}

impl ChoroplethBinding {
    /// Bindings for the Gapminder table.
    pub fn gapminder() -> Self {
        Self {
            locations: "iso_alpha".to_string(),
            color: "gdpPercap".to_string(),
            hover_name: "country".to_string(),
            animation_frame: "year".to_string(),
            animation_group: "country".to_string(),
        }
    }

    fn columns(&self) -> [&str; 5] {
        [
            &self.locations,
            &self.color,
            &self.hover_name,
            &self.animation_frame,
            &self.animation_group,
        ]
    }
}

/// Figure-level presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethStyle {
    pub title: String,
    pub title_font_size: u32,
    pub color_scale: String,
    pub color_label: String,
    pub projection: String,
    pub show_frame: bool,
    pub show_coastlines: bool,
}

impl Default for ChoroplethStyle {
    fn default() -> Self {
        Self {
            title: "GDP per Capita by Country (1952-2007)".to_string(),
            title_font_size: 24,
            color_scale: "Plasma".to_string(),
            color_label: "GDP per Capita ($)".to_string(),
            projection: "natural earth".to_string(),
            show_frame: false,
            show_coastlines: false,
        }
    }
}

/// One entity inside one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethDatum {
    pub id: String,
    pub location: String,
    pub hover: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethFrame {
    pub key: Scalar,
    pub data: Vec<ChoroplethDatum>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethSpec {
    pub binding: ChoroplethBinding,
    pub style: ChoroplethStyle,
    /// Global color range shared by every frame.
    pub color_range: Option<(f64, f64)>,
    pub frames: Vec<ChoroplethFrame>,
}

pub struct ChoroplethBinder {
    binding: ChoroplethBinding,
    style: ChoroplethStyle,
}

impl ChoroplethBinder {
    pub fn new(binding: ChoroplethBinding, style: ChoroplethStyle) -> Self {
        Self { binding, style }
    }

    pub fn bind(&self, df: &DataFrame) -> Result<ChoroplethSpec, BindError> {
        for column in self.binding.columns() {
            DataProcessor::require_column(df, column)?;
        }

        let groups = DataProcessor::string_values(df, &self.binding.animation_group)?;
        let hovers = DataProcessor::string_values(df, &self.binding.hover_name)?;
        let locations = DataProcessor::string_values(df, &self.binding.locations)?;
        let values: Vec<Option<f64>> = df
            .column(&self.binding.color)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect();
        let frame_keys: Vec<Option<Scalar>> = df
            .column(&self.binding.animation_frame)?
            .as_materialized_series()
            .rechunk()
            .iter()
            .map(|v| Scalar::from_any_value(&v))
            .collect();

        // Entity registry: first appearance fixes order and hover label.
        let mut entity_index: HashMap<&str, usize> = HashMap::new();
        let mut entity_hover: Vec<&str> = Vec::new();
        for (group, hover) in groups.iter().zip(hovers.iter()) {
            if !entity_index.contains_key(group.as_str()) {
                entity_index.insert(group.as_str(), entity_hover.len());
                entity_hover.push(hover.as_str());
            }
        }

        let mut frame_order = DataProcessor::unique_values(df, &self.binding.animation_frame)?;
        if frame_order.iter().all(|k| k.as_f64().is_some()) {
            frame_order.sort_by(|a, b| {
                a.as_f64()
                    .partial_cmp(&b.as_f64())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }

        let mut frames: Vec<ChoroplethFrame> = frame_order
            .into_iter()
            .map(|key| ChoroplethFrame {
                key,
                data: Vec::new(),
            })
            .collect();
        let mut rows_by_frame: Vec<Vec<usize>> = vec![Vec::new(); frames.len()];
        for (row, key) in frame_keys.iter().enumerate() {
            let Some(key) = key else { continue };
            if let Some(pos) = frames.iter().position(|f| &f.key == key) {
                rows_by_frame[pos].push(row);
            }
        }

        for (frame, mut rows) in frames.iter_mut().zip(rows_by_frame) {
            rows.sort_by_key(|&row| entity_index[groups[row].as_str()]);
            frame.data = rows
                .into_iter()
                .map(|row| {
                    let idx = entity_index[groups[row].as_str()];
                    ChoroplethDatum {
                        id: groups[row].clone(),
                        location: locations[row].clone(),
                        hover: entity_hover[idx].to_string(),
                        value: values[row].filter(|v| v.is_finite()),
                    }
                })
                .collect();
        }

        let finite = values.iter().flatten().copied().filter(|v| v.is_finite());
        let color_range = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        });

        Ok(ChoroplethSpec {
            binding: self.binding.clone(),
            style: self.style.clone(),
            color_range,
            frames,
        })
    }
}

impl ChoroplethSpec {
    fn trace(&self, frame: &ChoroplethFrame) -> Value {
        json!({
            "type": "choropleth",
            "name": frame.key.to_string(),
            "locations": frame.data.iter().map(|d| &d.location).collect::<Vec<_>>(),
            "z": frame.data.iter().map(|d| d.value).collect::<Vec<_>>(),
            "hovertext": frame.data.iter().map(|d| &d.hover).collect::<Vec<_>>(),
            "ids": frame.data.iter().map(|d| &d.id).collect::<Vec<_>>(),
            "coloraxis": "coloraxis",
            "hovertemplate": format!(
                "<b>%{{hovertext}}</b><br><br>{}={}<br>{}=%{{location}}<br>{}=%{{z}}<extra></extra>",
                self.binding.animation_frame,
                frame.key,
                self.binding.locations,
                self.style.color_label,
            ),
        })
    }

    /// Plotly figure JSON: first frame as data, every frame as an animation frame.
    pub fn to_plotly(&self) -> Value {
        let frames: Vec<Value> = self
            .frames
            .iter()
            .map(|f| {
                json!({
                    "name": f.key.to_string(),
                    "data": [self.trace(f)],
                })
            })
            .collect();
        let data: Vec<Value> = self.frames.first().map(|f| self.trace(f)).into_iter().collect();

        let steps: Vec<Value> = self
            .frames
            .iter()
            .map(|f| {
                let key = f.key.to_string();
                json!({
                    "label": key,
                    "method": "animate",
                    "args": [[key], {
                        "mode": "immediate",
                        "frame": {"duration": 0, "redraw": true},
                        "transition": {"duration": 0},
                    }],
                })
            })
            .collect();

        let (cmin, cmax) = match self.color_range {
            Some((lo, hi)) => (Value::from(lo), Value::from(hi)),
            None => (Value::Null, Value::Null),
        };

        json!({
            "data": data,
            "frames": frames,
            "layout": {
                "title": {"text": format!("<br>{}", self.style.title), "font": {"size": self.style.title_font_size}},
                "coloraxis": {
                    "colorscale": self.style.color_scale,
                    "cmin": cmin,
                    "cmax": cmax,
                    "colorbar": {"title": {"text": self.style.color_label}},
                },
                "geo": {
                    "showframe": self.style.show_frame,
                    "showcoastlines": self.style.show_coastlines,
                    "projection": {"type": self.style.projection},
                },
                "sliders": [{
                    "active": 0,
                    "currentvalue": {"prefix": format!("{}=", self.binding.animation_frame)},
                    "steps": steps,
                }],
                "updatemenus": [{
                    "type": "buttons",
                    "direction": "left",
                    "showactive": false,
                    "x": 0.1, "y": 0, "xanchor": "right", "yanchor": "top",
                    "buttons": [
                        {"label": "&#9654;", "method": "animate", "args": [null, {
                            "frame": {"duration": 500, "redraw": true},
                            "fromcurrent": true,
                            "transition": {"duration": 500},
                        }]},
                        {"label": "&#9724;", "method": "animate", "args": [[null], {
                            "mode": "immediate",
                            "frame": {"duration": 0, "redraw": true},
                            "transition": {"duration": 0},
                        }]},
                    ],
                }],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "country" => ["Chile", "Chile", "Peru", "Peru", "Benin", "Chile"],
            "iso_alpha" => ["CHL", "CHL", "PER", "PER", "BEN", "CHL"],
            "year" => [1957i64, 1952, 1952, 1957, 1957, 1962],
            "gdpPercap" => [4315.6, 3939.9, 3758.5, 4245.2, 959.6, 4519.0],
        )
        .unwrap()
    }

    fn bind() -> ChoroplethSpec {
        ChoroplethBinder::new(ChoroplethBinding::gapminder(), ChoroplethStyle::default())
            .bind(&sample())
            .unwrap()
    }

    #[test]
    fn frames_follow_the_time_axis() {
        let spec = bind();
        let keys: Vec<_> = spec.frames.iter().map(|f| f.key.clone()).collect();
        assert_eq!(keys, vec![Scalar::Int(1952), Scalar::Int(1957), Scalar::Int(1962)]);
        assert_eq!(spec.frames[1].data.len(), 3);
    }

    #[test]
    fn entities_keep_identity_and_order_across_frames() {
        let spec = bind();
        let mut seen: HashMap<String, String> = HashMap::new();
        for frame in &spec.frames {
            for datum in &frame.data {
                let hover = seen
                    .entry(datum.id.clone())
                    .or_insert_with(|| datum.hover.clone())
                    .clone();
                assert_eq!(hover, datum.hover);
            }
            let order: Vec<&str> = frame.data.iter().map(|d| d.id.as_str()).collect();
            let mut expected = order.clone();
            let global = ["Chile", "Peru", "Benin"];
            expected.sort_by_key(|id| global.iter().position(|g| g == id));
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn hover_label_is_pinned_to_first_appearance() {
        let df = df!(
            "country" => ["Zaire", "Chile", "Congo, Dem. Rep.", "Chile"],
            "iso_alpha" => ["COD", "CHL", "COD", "CHL"],
            "year" => [1952i64, 1952, 1957, 1957],
            "gdpPercap" => [780.5, 3939.9, 905.9, 4315.6],
        )
        .unwrap();
        let binding = ChoroplethBinding {
            animation_group: "iso_alpha".to_string(),
            ..ChoroplethBinding::gapminder()
        };
        let spec = ChoroplethBinder::new(binding, ChoroplethStyle::default())
            .bind(&df)
            .unwrap();

        assert_eq!(spec.frames.len(), 2);
        for frame in &spec.frames {
            let ids: Vec<&str> = frame.data.iter().map(|d| d.id.as_str()).collect();
            assert_eq!(ids, vec!["COD", "CHL"]);
            assert_eq!(frame.data[0].hover, "Zaire");
        }
    }

    #[test]
    fn color_range_spans_every_frame() {
        let spec = bind();
        assert_eq!(spec.color_range, Some((959.6, 4519.0)));
    }

    #[test]
    fn missing_binding_column_is_lookup_failure() {
        let df = sample().drop("iso_alpha").unwrap();
        let err = ChoroplethBinder::new(ChoroplethBinding::gapminder(), ChoroplethStyle::default())
            .bind(&df)
            .unwrap_err();
        assert!(matches!(err, BindError::Processor(_)));
    }

    #[test]
    fn plotly_figure_is_animated() {
        let fig = bind().to_plotly();
        assert_eq!(fig["frames"].as_array().unwrap().len(), 3);
        assert_eq!(fig["data"][0]["ids"][0], "Chile");
        assert_eq!(fig["data"][0]["locations"][1], "PER");
        assert_eq!(fig["layout"]["geo"]["projection"]["type"], "natural earth");
        assert_eq!(fig["layout"]["coloraxis"]["colorscale"], "Plasma");
    }
}
