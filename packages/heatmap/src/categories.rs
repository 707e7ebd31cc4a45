//! Category ranking and per-category heat layer generation.
//!
//! Categories are ranked by incident count, highest first. Equal counts
//! are ordered by category name so the layer set is reproducible.

use std::collections::{BTreeMap, BTreeSet};

use crime_heatmap_models::{HeatLayer, Incident, LatLng};

/// Number of incidents in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category name.
    pub name: String,
    /// Number of cleaned incidents with this category.
    pub count: usize,
}

/// Groups incident coordinates by category. Incidents without a category
/// are ignored.
fn group_by_category(incidents: &[Incident]) -> BTreeMap<&str, Vec<LatLng>> {
    let mut groups: BTreeMap<&str, Vec<LatLng>> = BTreeMap::new();
    for incident in incidents {
        if let Some(category) = incident.category.as_deref() {
            groups.entry(category).or_default().push(incident.location);
        }
    }
    groups
}

/// Sorts groups by count descending. The sort is stable over the
/// `BTreeMap`'s name order, which breaks ties lexicographically.
fn ranked(groups: BTreeMap<&str, Vec<LatLng>>) -> Vec<(&str, Vec<LatLng>)> {
    let mut ranked: Vec<_> = groups.into_iter().collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked
}

/// Number of distinct non-null categories among `incidents`.
#[must_use]
pub fn distinct_category_count(incidents: &[Incident]) -> usize {
    incidents
        .iter()
        .filter_map(|incident| incident.category.as_deref())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Builds one heat layer for each of the `top_n` most frequent categories.
///
/// Categories left with no points are skipped, so the result holds
/// `min(top_n, distinct categories)` layers.
#[must_use]
pub fn build_heat_layers(incidents: &[Incident], top_n: usize) -> Vec<HeatLayer> {
    ranked(group_by_category(incidents))
        .into_iter()
        .take(top_n)
        .filter(|(_, points)| !points.is_empty())
        .map(|(name, points)| {
            log::debug!("Heat layer '{name}': {} points", points.len());
            HeatLayer {
                name: name.to_owned(),
                points,
            }
        })
        .collect()
}
