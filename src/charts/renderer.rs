//! Static Chart Renderer
//! Renders histogram and bar specs to PNG with plotters.
//!
//! Layout:
//! 1. Caption centered at the top
//! 2. Mesh with axis labels
//! 3. Bars filled with the accent color

use crate::view::{BarSpec, HistogramSpec};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

const ACCENT: RGBColor = RGBColor(99, 110, 250);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Nothing to draw")]
    Empty,
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Histogram PNG bytes.
    pub fn render_histogram(
        spec: &HistogramSpec,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let (Some(first), Some(last)) = (spec.bins.first(), spec.bins.last()) else {
            return Err(RenderError::Empty);
        };
        let y_max = (spec.max_count() as f64 * 1.1).max(1.0);

        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption("Salary Distribution", ("sans-serif", 24))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(60)
                .build_cartesian_2d(first.start..last.end, 0f64..y_max)
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .x_desc(spec.column.as_str())
                .y_desc("count")
                .x_label_formatter(&|v| format!("{:.0}", v))
                .draw()
                .map_err(draw_err)?;

            chart
                .draw_series(spec.bins.iter().map(|b| {
                    Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], ACCENT.filled())
                }))
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        Self::encode_png(buffer, width, height)
    }

    /// Bar chart PNG bytes.
    pub fn render_bar_chart(spec: &BarSpec, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if spec.bars.is_empty() {
            return Err(RenderError::Empty);
        }
        let n = spec.bars.len();
        let y_max = spec
            .bars
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold(0.0f64, f64::max)
            * 1.1;
        let labels: Vec<&str> = spec.bars.iter().map(|(c, _)| c.as_str()).collect();

        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(spec.title.as_str(), ("sans-serif", 24))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(70)
                .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max.max(1.0))
                .map_err(draw_err)?;

            let label_at = |v: &f64| {
                let idx = v.round();
                if idx >= 0.0 && (idx - v).abs() < 1e-6 {
                    labels.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
                } else {
                    String::new()
                }
            };

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(n)
                .x_desc(spec.category_column.as_str())
                .y_desc(spec.value_column.as_str())
                .x_label_formatter(&label_at)
                .y_label_formatter(&|v| format!("{:.0}", v))
                .draw()
                .map_err(draw_err)?;

            chart
                .draw_series(spec.bars.iter().enumerate().map(|(i, (_, v))| {
                    let x = i as f64;
                    Rectangle::new([(x - 0.3, 0.0), (x + 0.3, *v)], ACCENT.filled())
                }))
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        Self::encode_png(buffer, width, height)
    }

    fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_specs_are_rejected() {
        let hist = HistogramSpec {
            column: "Base Salary".to_string(),
            bins: Vec::new(),
        };
        assert!(matches!(
            StaticChartRenderer::render_histogram(&hist, 400, 300),
            Err(RenderError::Empty)
        ));

        let bars = BarSpec {
            title: "t".to_string(),
            category_column: "Department".to_string(),
            value_column: "Total Pay".to_string(),
            bars: Vec::new(),
        };
        assert!(matches!(
            StaticChartRenderer::render_bar_chart(&bars, 400, 300),
            Err(RenderError::Empty)
        ));
    }

    #[test]
    fn encodes_png_signature() {
        let bytes = StaticChartRenderer::encode_png(vec![255u8; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn buffer_size_mismatch_is_reported() {
        let err = StaticChartRenderer::encode_png(vec![0u8; 5], 4, 3).unwrap_err();
        assert!(matches!(err, RenderError::Draw(_)));
    }
}
