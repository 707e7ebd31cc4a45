//! End-to-end heatmap generation: load, clean, measure, build, render,
//! write.

use std::path::PathBuf;
use std::sync::Arc;

use crate::HeatmapError;
use crate::bounds::dataset_extent;
use crate::categories::{CategoryCount, build_heat_layers, distinct_category_count};
use crate::config::MapConfig;
use crate::document::MapDocument;
use crate::export::write_html;
use crate::load::{CleanedIncidents, load_incidents};
use crate::progress::ProgressCallback;
use crate::render::render_html;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Where the HTML page was written.
    pub output_path: PathBuf,
    /// Data rows in the input file.
    pub raw_row_count: u64,
    /// Rows that survived coordinate cleaning.
    pub incident_count: usize,
    /// Heat layers on the map, in ranking order.
    pub layers: Vec<CategoryCount>,
}

/// Assembles the map document for already-cleaned incidents.
///
/// With no incidents the map falls back to the configured center, has no
/// bounds lock and no heat layers, but still carries the highlight area,
/// legend, and layer control.
#[must_use]
pub fn build_document(config: &MapConfig, cleaned: &CleanedIncidents) -> MapDocument {
    let extent = dataset_extent(&cleaned.incidents);

    let mut doc = match extent {
        Some(extent) => {
            log::info!(
                "Bounds: lat {}..{}, lon {}..{}",
                extent.bounds.south_west.latitude,
                extent.bounds.north_east.latitude,
                extent.bounds.south_west.longitude,
                extent.bounds.north_east.longitude,
            );
            MapDocument::new(config, extent.center).with_bounds_lock(extent.bounds)
        }
        None => {
            log::warn!("No incidents with usable coordinates; using fallback center");
            MapDocument::new(config, config.map.fallback_center)
        }
    };

    for layer in build_heat_layers(&cleaned.incidents, config.heat.top_n) {
        doc = doc.with_heat_layer(layer);
    }

    doc.with_highlight(config.highlight.clone())
        .with_legend(config.legend.clone())
        .with_layer_control(config.layer_control.collapsed)
}

/// Runs the full pipeline described by `config`.
///
/// # Errors
///
/// Returns [`HeatmapError`] if the input cannot be read, a required column
/// is missing, or the output cannot be written.
pub fn run(
    config: &MapConfig,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<PipelineSummary, HeatmapError> {
    progress.set_message("Loading incidents".to_string());
    let cleaned = load_incidents(&config.input_path, &config.columns, progress.as_ref())?;
    progress.finish(format!(
        "Loaded {} incidents ({} rows)",
        cleaned.incidents.len(),
        cleaned.raw_row_count
    ));

    log::info!(
        "{} distinct categories",
        distinct_category_count(&cleaned.incidents)
    );

    let doc = build_document(config, &cleaned);
    let html = render_html(&doc)?;
    write_html(&config.output_path, &html)?;

    Ok(PipelineSummary {
        output_path: config.output_path.clone(),
        raw_row_count: cleaned.raw_row_count,
        incident_count: cleaned.incidents.len(),
        layers: doc
            .heat_layers
            .iter()
            .map(|layer| CategoryCount {
                name: layer.name.clone(),
                count: layer.len(),
            })
            .collect(),
    })
}
