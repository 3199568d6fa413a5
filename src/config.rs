//! Configuration Module
//! Immutable catalogs and model parameters injected into the data sources and binders.

use serde::Serialize;

/// URL of the Gapminder table with ISO alpha-3 codes.
pub const GAPMINDER_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/master/gapminder_with_codes.csv";

/// Environment variable that pins the payroll generator seed.
pub const PAYROLL_SEED_VAR: &str = "PAYROLL_SEED";

/// Geographic bounds of a full-globe overlay: [west, south, east, north].
pub const GLOBE_BOUNDS: [f64; 4] = [-180.0, -85.0, 180.0, 85.0];

/// How a basemap style is consumed by the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    /// A vector style document bound as the map's base style.
    Vector,
    /// A raster tile template drawn as a bitmap overlay without a base style.
    Raster,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasemapStyle {
    pub name: &'static str,
    pub url: &'static str,
    pub kind: StyleKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const CITIES: [City; 9] = [
    City { name: "New York", lat: 40.7128, lon: -74.0060 },
    City { name: "London", lat: 51.5074, lon: -0.1278 },
    City { name: "Paris", lat: 48.8566, lon: 2.3522 },
    City { name: "Tokyo", lat: 35.6895, lon: 139.6917 },
    City { name: "Berlin", lat: 52.5200, lon: 13.4050 },
    City { name: "Sydney", lat: -33.8688, lon: 151.2093 },
    City { name: "Rio de Janeiro", lat: -22.9068, lon: -43.1729 },
    City { name: "Cairo", lat: 30.0444, lon: 31.2357 },
    City { name: "Mumbai", lat: 19.0760, lon: 72.8777 },
];

const STYLES: [BasemapStyle; 5] = [
    BasemapStyle {
        name: "Dark (Carto)",
        url: "https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json",
        kind: StyleKind::Vector,
    },
    BasemapStyle {
        name: "Light (Carto)",
        url: "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json",
        kind: StyleKind::Vector,
    },
    BasemapStyle {
        name: "Voyager (Carto)",
        url: "https://basemaps.cartocdn.com/gl/voyager-gl-style/style.json",
        kind: StyleKind::Vector,
    },
    BasemapStyle {
        name: "Watercolor (Stamen)",
        url: "http://tile.stamen.com/watercolor/{z}/{x}/{y}.jpg",
        kind: StyleKind::Raster,
    },
    BasemapStyle {
        name: "Toner (Stamen)",
        url: "http://tile.stamen.com/toner/{z}/{x}/{y}.png",
        kind: StyleKind::Raster,
    },
];

/// Camera defaults for the city map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub overlay_bounds: [f64; 4],
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            zoom: 11.0,
            pitch: 0.0,
            bearing: 0.0,
            overlay_bounds: GLOBE_BOUNDS,
        }
    }
}

/// Configuration of the city map explorer.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub cities: Vec<City>,
    pub styles: Vec<BasemapStyle>,
    pub defaults: MapDefaults,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            cities: CITIES.to_vec(),
            styles: STYLES.to_vec(),
            defaults: MapDefaults::default(),
        }
    }
}

impl MapConfig {
    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.name == name)
    }

    pub fn style(&self, name: &str) -> Option<&BasemapStyle> {
        self.styles.iter().find(|s| s.name == name)
    }
}

/// Parameters of the synthetic payroll model.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollModel {
    pub years: Vec<i64>,
    pub departments: Vec<&'static str>,
    pub titles: Vec<&'static str>,
    /// Half-open range of employees generated per (year, department, title).
    pub employees_per_combo: (u32, u32),
    pub salary_mean: f64,
    pub salary_std: f64,
    pub ot_hours_mean: f64,
    pub ot_hours_std: f64,
    pub annual_hours: f64,
    pub ot_premium: f64,
    pub seed: Option<u64>,
}

impl Default for PayrollModel {
    fn default() -> Self {
        Self {
            years: vec![2019, 2020, 2021],
            departments: vec!["POLICE", "FIRE", "EDUCATION", "SANITATION", "TRANSPORTATION"],
            titles: vec!["OFFICER", "TEACHER", "WORKER", "MANAGER", "SUPERVISOR"],
            employees_per_combo: (50, 200),
            salary_mean: 60000.0,
            salary_std: 15000.0,
            ot_hours_mean: 20.0,
            ot_hours_std: 10.0,
            annual_hours: 2080.0,
            ot_premium: 1.5,
            seed: None,
        }
    }
}

impl PayrollModel {
    /// Default model with the seed taken from `PAYROLL_SEED` when it parses.
    pub fn from_env() -> Self {
        let seed = std::env::var(PAYROLL_SEED_VAR)
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    log::warn!("Ignoring {}={:?}: not an unsigned integer", PAYROLL_SEED_VAR, raw);
                    None
                }
            });
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Hourly rate with the overtime premium applied.
    pub fn overtime_rate(&self, base_salary: f64) -> f64 {
        base_salary / self.annual_hours * self.ot_premium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_names_are_unique() {
        let config = MapConfig::default();
        for style in &config.styles {
            let matches = config.styles.iter().filter(|s| s.name == style.name).count();
            assert_eq!(matches, 1, "{} listed twice", style.name);
        }
    }

    #[test]
    fn raster_styles_are_tile_templates() {
        for style in &MapConfig::default().styles {
            let templated = style.url.contains("{z}");
            assert_eq!(templated, style.kind == StyleKind::Raster, "{}", style.name);
        }
    }

    #[test]
    fn overtime_rate_uses_work_year() {
        let model = PayrollModel::default();
        assert!((model.overtime_rate(2080.0) - 1.5).abs() < 1e-12);
    }
}
