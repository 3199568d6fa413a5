//! HTML Page Writer
//! Wraps map and choropleth view specs in standalone pages for the browser.

use crate::view::{ChoroplethSpec, DeckSpec};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DECKGL_JS: &str = "https://unpkg.com/deck.gl@9/dist.min.js";
const MAPLIBRE_JS: &str = "https://unpkg.com/maplibre-gl@4/dist/maplibre-gl.js";
const MAPLIBRE_CSS: &str = "https://unpkg.com/maplibre-gl@4/dist/maplibre-gl.css";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to serialize view spec: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write page: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to open page: {0}")]
    Open(String),
}

pub struct HtmlPage;

impl HtmlPage {
    /// deck.gl page. Layers are instantiated from their `@@type` tag.
    pub fn deck(spec: &DeckSpec, title: &str) -> Result<String, PageError> {
        let json = serde_json::to_string(spec)?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{deckgl}"></script>
<script src="{maplibre}"></script>
<link href="{maplibre_css}" rel="stylesheet">
<style>html, body {{ margin: 0; width: 100%; height: 100%; }} #deck {{ width: 100vw; height: 100vh; }}</style>
</head>
<body>
<div id="deck"></div>
<script>
const spec = {json};
const layers = spec.layers.map(l => new deck[l["@@type"]]({{ id: l.id, image: l.image, bounds: l.bounds }}));
new deck.DeckGL({{
  container: "deck",
  mapStyle: spec.mapStyle,
  initialViewState: spec.initialViewState,
  controller: true,
  layers: layers,
}});
</script>
</body>
</html>
"#,
            title = escape(title),
            deckgl = DECKGL_JS,
            maplibre = MAPLIBRE_JS,
            maplibre_css = MAPLIBRE_CSS,
            json = json,
        ))
    }

    /// plotly.js page with animation frames registered after the first draw.
    pub fn choropleth(spec: &ChoroplethSpec) -> Result<String, PageError> {
        let figure = serde_json::to_string(&spec.to_plotly())?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{plotly}"></script>
<style>html, body {{ margin: 0; width: 100%; height: 100%; }} #fig {{ width: 100vw; height: 100vh; }}</style>
</head>
<body>
<div id="fig"></div>
<script>
const fig = {figure};
Plotly.newPlot("fig", fig.data, fig.layout, {{ responsive: true }}).then(() => Plotly.addFrames("fig", fig.frames));
</script>
</body>
</html>
"#,
            title = escape(&spec.style.title),
            plotly = PLOTLY_JS,
            figure = figure,
        ))
    }

    /// Write `html` into the temp directory and return the path.
    pub fn write_temp(file_name: &str, html: &str) -> Result<PathBuf, PageError> {
        let path = std::env::temp_dir().join(file_name);
        Self::write(&path, html)?;
        Ok(path)
    }

    pub fn write(path: &Path, html: &str) -> Result<(), PageError> {
        fs::write(path, html)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    /// Open a written page with the system browser.
    pub fn open(path: &Path) -> Result<(), PageError> {
        open::that(path).map_err(|e| PageError::Open(e.to_string()))
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::view::{ChoroplethBinder, ChoroplethBinding, ChoroplethStyle, MapBinder};
    use polars::prelude::*;

    #[test]
    fn deck_page_embeds_spec() {
        let config = MapConfig::default();
        let binder = MapBinder::new(config.defaults);
        let spec = binder.bind(&config.cities[1], config.style("Toner (Stamen)").unwrap());
        let html = HtmlPage::deck(&spec, "London <Toner>").unwrap();
        assert!(html.contains("\"@@type\":\"BitmapLayer\""));
        assert!(html.contains("\"mapStyle\":null"));
        assert!(html.contains("London &lt;Toner&gt;"));
    }

    #[test]
    fn choropleth_page_registers_frames() {
        let df = df!(
            "country" => ["Chad", "Chad"],
            "iso_alpha" => ["TCD", "TCD"],
            "year" => [1952i64, 1957],
            "gdpPercap" => [1178.7, 1308.5],
        )
        .unwrap();
        let spec = ChoroplethBinder::new(ChoroplethBinding::gapminder(), ChoroplethStyle::default())
            .bind(&df)
            .unwrap();
        let html = HtmlPage::choropleth(&spec).unwrap();
        assert!(html.contains("Plotly.addFrames"));
        assert!(html.contains("\"natural earth\""));
    }

    #[test]
    fn writes_page_to_disk() {
        let path = HtmlPage::write_temp("geoviz_board_test_page.html", "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        let _ = fs::remove_file(path);
    }
}
