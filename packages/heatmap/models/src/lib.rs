#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Data types shared across the crime heatmap pipeline.
//!
//! Covers the cleaned incident record, the derived bounding box, and the
//! overlay types (heat layers, highlight polygon, legend) that make up a
//! rendered map document.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in WGS84 degrees.
///
/// Serialized as a `[latitude, longitude]` pair, the order Leaflet expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl LatLng {
    /// Creates a coordinate from a latitude/longitude pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(value: LatLng) -> Self {
        [value.latitude, value.longitude]
    }
}

/// One crime incident that survived coordinate cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Primary incident category (e.g. `"THEFT"`). `None` when the source
    /// cell was empty.
    pub category: Option<String>,
    /// Where the incident occurred.
    pub location: LatLng,
}

/// Smallest axis-aligned rectangle containing every cleaned incident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    /// Minimum latitude and minimum longitude.
    pub south_west: LatLng,
    /// Maximum latitude and maximum longitude.
    pub north_east: LatLng,
}

impl BoundingBox {
    /// Returns `true` if the coordinate lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }

    /// Returns the box as `[[min_lat, min_lon], [max_lat, max_lon]]`.
    #[must_use]
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [self.south_west.into(), self.north_east.into()]
    }
}

/// Rendering parameters shared by every heat layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayerOptions {
    /// Radius of each point, in pixels.
    pub radius: u32,
    /// Blur amount, in pixels.
    pub blur: u32,
    /// Minimum opacity the heat will start at.
    pub min_opacity: f64,
    /// Zoom level where points reach maximum intensity.
    pub max_zoom: u32,
}

/// A toggle-able density overlay for a single incident category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatLayer {
    /// Category name, also used as the label in the layer control.
    pub name: String,
    /// Incident coordinates for this category.
    pub points: Vec<LatLng>,
}

impl HeatLayer {
    /// Number of points in this layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this layer has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A fixed polygon drawn on top of the map with a popup label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightArea {
    /// Polygon vertices, in drawing order.
    pub locations: Vec<LatLng>,
    /// Stroke (and fill) color.
    pub color: String,
    /// Whether the polygon interior is filled.
    pub fill: bool,
    /// Interior fill opacity, `0.0..=1.0`.
    pub fill_opacity: f64,
    /// Text shown when the polygon is clicked.
    pub popup: String,
}

/// One colored swatch in the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// CSS color of the swatch.
    pub color: String,
    /// Description next to the swatch.
    pub label: String,
}

/// Trailing note below the legend swatches (e.g. "**Red Box**: ...").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendNote {
    /// Bold lead-in text.
    pub label: String,
    /// Plain text following the label.
    pub text: String,
}

/// Static legend block describing the heat color scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    /// Bold heading.
    pub title: String,
    /// Swatches, top to bottom.
    pub entries: Vec<LegendEntry>,
    /// Optional note rendered after the swatches.
    #[serde(default)]
    pub note: Option<LegendNote>,
}
