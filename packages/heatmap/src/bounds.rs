//! Dataset extent: bounding box and center point.
//!
//! No outlier rejection is performed; a single far-away coordinate widens
//! the box and shifts the center.

use crime_heatmap_models::{BoundingBox, Incident, LatLng};
use geo::{BoundingRect, Centroid, MultiPoint, Point};

/// The area covered by the cleaned incidents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetExtent {
    /// Smallest rectangle containing every incident.
    pub bounds: BoundingBox,
    /// Arithmetic mean of all incident coordinates.
    pub center: LatLng,
}

/// Computes the extent of `incidents`, or `None` if there are none.
#[must_use]
pub fn dataset_extent(incidents: &[Incident]) -> Option<DatasetExtent> {
    let points: MultiPoint<f64> = incidents
        .iter()
        .map(|incident| Point::new(incident.location.longitude, incident.location.latitude))
        .collect();

    let rect = points.bounding_rect()?;
    let centroid = points.centroid()?;

    Some(DatasetExtent {
        bounds: BoundingBox {
            south_west: LatLng::new(rect.min().y, rect.min().x),
            north_east: LatLng::new(rect.max().y, rect.max().x),
        },
        center: LatLng::new(centroid.y(), centroid.x()),
    })
}
