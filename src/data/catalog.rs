//! Static catalog tables: cities and basemap styles.

use crate::config::{BasemapStyle, City, StyleKind};
use polars::prelude::*;

pub const CITY_COL: &str = "city";
pub const LAT_COL: &str = "lat";
pub const LON_COL: &str = "lon";
pub const STYLE_COL: &str = "style";
pub const URL_COL: &str = "url";
pub const KIND_COL: &str = "kind";

/// Build the `city, lat, lon` table from a catalog. Catalog order is kept.
pub fn city_table(cities: &[City]) -> PolarsResult<DataFrame> {
    let names: Vec<&str> = cities.iter().map(|c| c.name).collect();
    let lats: Vec<f64> = cities.iter().map(|c| c.lat).collect();
    let lons: Vec<f64> = cities.iter().map(|c| c.lon).collect();

    DataFrame::new(vec![
        Column::new(CITY_COL.into(), names),
        Column::new(LAT_COL.into(), lats),
        Column::new(LON_COL.into(), lons),
    ])
}

/// Build the `style, url, kind` table from a catalog.
pub fn style_table(styles: &[BasemapStyle]) -> PolarsResult<DataFrame> {
    let names: Vec<&str> = styles.iter().map(|s| s.name).collect();
    let urls: Vec<&str> = styles.iter().map(|s| s.url).collect();
    let kinds: Vec<&str> = styles
        .iter()
        .map(|s| match s.kind {
            StyleKind::Vector => "vector",
            StyleKind::Raster => "raster",
        })
        .collect();

    DataFrame::new(vec![
        Column::new(STYLE_COL.into(), names),
        Column::new(URL_COL.into(), urls),
        Column::new(KIND_COL.into(), kinds),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;

    #[test]
    fn keeps_catalog_order() {
        let config = MapConfig::default();
        let df = city_table(&config.cities).unwrap();
        assert_eq!(df.height(), 9);
        let first = df.column(CITY_COL).unwrap().str().unwrap().get(0);
        assert_eq!(first, Some("New York"));
        let lat = df.column(LAT_COL).unwrap().f64().unwrap().get(3);
        assert_eq!(lat, Some(35.6895));
    }

    #[test]
    fn style_table_lists_kinds() {
        let config = MapConfig::default();
        let df = style_table(&config.styles).unwrap();
        let kinds = df.column(KIND_COL).unwrap().str().unwrap();
        assert_eq!(kinds.get(0), Some("vector"));
        assert_eq!(kinds.get(4), Some("raster"));
    }
}
