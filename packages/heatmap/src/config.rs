//! Map configuration.
//!
//! The default configuration is baked into the binary at compile time via
//! [`include_str!`]. A user-supplied TOML file is layered on top of it, so
//! a replacement only needs to list the keys it changes.

use std::path::{Path, PathBuf};

use crime_heatmap_models::{HeatLayerOptions, HighlightArea, LatLng, Legend};
use serde::Deserialize;

use crate::HeatmapError;

/// Embedded default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Complete configuration for one heatmap run.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Incident CSV to read.
    pub input_path: PathBuf,
    /// HTML file to write. Overwritten if it exists.
    pub output_path: PathBuf,
    /// Page title of the generated document.
    pub title: String,
    /// CSV column names.
    pub columns: ColumnConfig,
    /// Base map view settings.
    pub map: BaseMapConfig,
    /// Heat layer selection and rendering.
    pub heat: HeatConfig,
    /// Fixed polygon drawn over the map.
    pub highlight: HighlightArea,
    /// Static legend block.
    pub legend: Legend,
    /// Layer toggle control.
    pub layer_control: LayerControlConfig,
}

/// Names of the CSV columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnConfig {
    /// Incident category column (e.g. `"Primary Type"`).
    pub category: String,
    /// Latitude column.
    pub latitude: String,
    /// Longitude column.
    pub longitude: String,
}

/// Base map view settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseMapConfig {
    /// Initial zoom level.
    pub zoom_start: u8,
    /// Lowest zoom the viewer may reach.
    pub min_zoom: u8,
    /// Highest zoom the viewer may reach.
    pub max_zoom: u8,
    /// Center used when no incident has usable coordinates.
    pub fallback_center: LatLng,
    /// Base tile layer.
    pub tiles: TileConfig,
}

/// Raster tile source for the base layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TileConfig {
    /// Label shown in the layer control.
    pub name: String,
    /// URL template with `{z}`, `{x}`, `{y}` placeholders.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
}

/// Heat layer selection and rendering parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HeatConfig {
    /// How many of the most frequent categories get a layer.
    pub top_n: usize,
    /// Point radius in pixels.
    pub radius: u32,
    /// Blur in pixels.
    pub blur: u32,
    /// Minimum heat opacity.
    pub min_opacity: f64,
    /// Zoom level at which points reach full intensity.
    pub max_zoom: u32,
}

impl HeatConfig {
    /// Rendering options shared by every layer.
    #[must_use]
    pub const fn options(&self) -> HeatLayerOptions {
        HeatLayerOptions {
            radius: self.radius,
            blur: self.blur,
            min_opacity: self.min_opacity,
            max_zoom: self.max_zoom,
        }
    }
}

/// Layer toggle control settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LayerControlConfig {
    /// Whether the control starts collapsed into an icon.
    pub collapsed: bool,
}

impl MapConfig {
    /// Parses the embedded default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError`] if the embedded TOML is invalid.
    pub fn embedded() -> Result<Self, HeatmapError> {
        Self::from_toml_str("")
    }

    /// Reads a TOML file and layers it over the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError`] if the file cannot be read, is not valid
    /// TOML, or produces an inconsistent configuration.
    pub fn from_file(path: &Path) -> Result<Self, HeatmapError> {
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loaded config overrides from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Layers `overrides` over the embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HeatmapError`] if `overrides` is not valid TOML or the
    /// merged configuration fails validation.
    pub fn from_toml_str(overrides: &str) -> Result<Self, HeatmapError> {
        let mut base: toml::Table = DEFAULT_CONFIG_TOML.parse()?;
        let overlay: toml::Table = overrides.parse()?;
        merge_tables(&mut base, overlay);

        let config: Self = toml::Value::Table(base).try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), HeatmapError> {
        let map = &self.map;
        if !(map.min_zoom..=map.max_zoom).contains(&map.zoom_start) {
            return Err(HeatmapError::InvalidConfig {
                message: format!(
                    "zoom_start {} outside min_zoom..=max_zoom ({}..={})",
                    map.zoom_start, map.min_zoom, map.max_zoom
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.highlight.fill_opacity) {
            return Err(HeatmapError::InvalidConfig {
                message: format!(
                    "highlight fill_opacity {} outside 0.0..=1.0",
                    self.highlight.fill_opacity
                ),
            });
        }

        if !(0.0..=1.0).contains(&self.heat.min_opacity) {
            return Err(HeatmapError::InvalidConfig {
                message: format!(
                    "heat min_opacity {} outside 0.0..=1.0",
                    self.heat.min_opacity
                ),
            });
        }

        Ok(())
    }
}

/// Recursively merges `overlay` into `base`. Nested tables merge key by
/// key; any other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_original_layout() {
        let config = MapConfig::embedded().unwrap();

        assert_eq!(
            config.output_path,
            PathBuf::from("chicago_crime_heatmap_legend_area.html")
        );
        assert_eq!(config.columns.category, "Primary Type");
        assert_eq!(config.columns.latitude, "Latitude");
        assert_eq!(config.columns.longitude, "Longitude");
        assert_eq!(config.map.zoom_start, 12);
        assert_eq!(config.map.min_zoom, 11);
        assert_eq!(config.map.max_zoom, 13);
        assert_eq!(config.heat.top_n, 5);
        assert_eq!(config.heat.radius, 10);
        assert_eq!(config.heat.blur, 12);
        assert_eq!(config.highlight.locations.len(), 4);
        assert_eq!(config.highlight.popup, "South Side (Example Area)");
        assert_eq!(config.legend.entries.len(), 3);
        assert!(!config.layer_control.collapsed);
    }

    #[test]
    fn overrides_only_replace_listed_keys() {
        let config = MapConfig::from_toml_str(
            r#"
            output_path = "out/map.html"

            [heat]
            top_n = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.output_path, PathBuf::from("out/map.html"));
        assert_eq!(config.heat.top_n, 3);
        assert_eq!(config.heat.radius, 10);
        assert_eq!(config.heat.blur, 12);
        assert_eq!(config.columns.category, "Primary Type");
    }

    #[test]
    fn arrays_are_replaced_not_merged() {
        let config = MapConfig::from_toml_str(
            r"
            [highlight]
            locations = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]
            ",
        )
        .unwrap();

        assert_eq!(
            config.highlight.locations,
            vec![
                LatLng::new(1.0, 2.0),
                LatLng::new(3.0, 4.0),
                LatLng::new(5.0, 6.0)
            ]
        );
        assert_eq!(config.highlight.color, "red");
    }

    #[test]
    fn rejects_zoom_start_outside_range() {
        let err = MapConfig::from_toml_str(
            r"
            [map]
            zoom_start = 15
            ",
        )
        .unwrap_err();

        assert!(matches!(err, HeatmapError::InvalidConfig { .. }), "{err}");
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = MapConfig::from_toml_str("heat = [").unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)), "{err}");
    }

    #[test]
    fn rejects_wrong_value_type() {
        let err = MapConfig::from_toml_str(
            r#"
            [heat]
            top_n = "five"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)), "{err}");
    }
}
