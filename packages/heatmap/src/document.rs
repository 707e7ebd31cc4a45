//! In-memory map document.
//!
//! A [`MapDocument`] owns everything that ends up on the rendered page:
//! the base map view, the optional bounds lock, the heat layers, the
//! highlight polygon, the legend, and the layer control. It is assembled
//! with consuming `with_*` builders and is not mutated once rendered.

use crime_heatmap_models::{
    BoundingBox, HeatLayer, HeatLayerOptions, HighlightArea, LatLng, Legend,
};
use serde::Serialize;

use crate::config::{MapConfig, TileConfig};

/// Zoom constraints of the base map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomRange {
    /// Initial zoom level.
    pub start: u8,
    /// Lowest allowed zoom.
    pub min: u8,
    /// Highest allowed zoom.
    pub max: u8,
}

/// Base raster tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayer {
    /// Label in the layer control.
    pub name: String,
    /// URL template.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
}

impl From<&TileConfig> for TileLayer {
    fn from(config: &TileConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            attribution: config.attribution.clone(),
        }
    }
}

/// Keeps the interactive viewport inside a bounding box.
///
/// Rendered as a client-side directive on the map object rather than by
/// filtering any data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundsLock {
    /// Box the viewport may not leave.
    pub bounds: BoundingBox,
}

impl BoundsLock {
    /// Script statements that lock `map_var` to the bounds and fit the
    /// initial view to them.
    #[must_use]
    pub fn script(&self, map_var: &str) -> String {
        let [[min_lat, min_lon], [max_lat, max_lon]] = self.bounds.corners();
        let corners = format!("[[{min_lat}, {min_lon}], [{max_lat}, {max_lon}]]");
        format!("{map_var}.setMaxBounds({corners});\n{map_var}.fitBounds({corners}, {{}});\n")
    }
}

/// Layer toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerControl {
    /// Whether the control starts collapsed.
    pub collapsed: bool,
}

/// The complete map, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    /// Page title.
    pub title: String,
    /// Initial view center.
    pub center: LatLng,
    /// Zoom constraints.
    pub zoom: ZoomRange,
    /// Base tiles.
    pub tiles: TileLayer,
    /// Viewport lock, absent when there is nothing to bound.
    pub bounds_lock: Option<BoundsLock>,
    /// Options applied to every heat layer.
    pub heat_options: HeatLayerOptions,
    /// One overlay per selected category, in ranking order.
    pub heat_layers: Vec<HeatLayer>,
    /// Highlighted area, if any.
    pub highlight: Option<HighlightArea>,
    /// Legend block, if any.
    pub legend: Option<Legend>,
    /// Layer toggle control, if any.
    pub layer_control: Option<LayerControl>,
}

impl MapDocument {
    /// Creates a bare map centered at `center` using the view settings
    /// from `config`. No overlays are attached yet.
    #[must_use]
    pub fn new(config: &MapConfig, center: LatLng) -> Self {
        Self {
            title: config.title.clone(),
            center,
            zoom: ZoomRange {
                start: config.map.zoom_start,
                min: config.map.min_zoom,
                max: config.map.max_zoom,
            },
            tiles: TileLayer::from(&config.map.tiles),
            bounds_lock: None,
            heat_options: config.heat.options(),
            heat_layers: Vec::new(),
            highlight: None,
            legend: None,
            layer_control: None,
        }
    }

    /// Locks the viewport to `bounds`.
    #[must_use]
    pub const fn with_bounds_lock(mut self, bounds: BoundingBox) -> Self {
        self.bounds_lock = Some(BoundsLock { bounds });
        self
    }

    /// Adds a heat layer. Empty layers are skipped.
    #[must_use]
    pub fn with_heat_layer(mut self, layer: HeatLayer) -> Self {
        if layer.is_empty() {
            log::debug!("Skipping empty heat layer '{}'", layer.name);
        } else {
            self.heat_layers.push(layer);
        }
        self
    }

    /// Draws a highlighted area.
    #[must_use]
    pub fn with_highlight(mut self, highlight: HighlightArea) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Embeds a legend block.
    #[must_use]
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Adds the layer toggle control.
    #[must_use]
    pub const fn with_layer_control(mut self, collapsed: bool) -> Self {
        self.layer_control = Some(LayerControl { collapsed });
        self
    }
}
