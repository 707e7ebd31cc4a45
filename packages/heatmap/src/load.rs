//! Incident CSV loader and coordinate cleaner.
//!
//! Only three columns are read: category, latitude, and longitude. Rows
//! whose latitude or longitude is missing or not a finite number are
//! dropped without being reported.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crime_heatmap_models::{Incident, LatLng};

use crate::HeatmapError;
use crate::config::ColumnConfig;
use crate::progress::ProgressCallback;

/// How many rows to read between progress updates.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Incidents that survived cleaning, plus the raw row count for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedIncidents {
    /// Rows with usable coordinates, in file order.
    pub incidents: Vec<Incident>,
    /// Number of data rows read, before cleaning.
    pub raw_row_count: u64,
}

impl CleanedIncidents {
    /// Number of rows dropped by the cleaner.
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.raw_row_count - self.incidents.len() as u64
    }

    /// Whether no row survived cleaning.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}

/// Opens the CSV at `path` and returns its cleaned incidents.
///
/// # Errors
///
/// Returns [`HeatmapError`] if the file cannot be opened, the CSV framing
/// is broken, or a required column is missing.
pub fn load_incidents(
    path: &Path,
    columns: &ColumnConfig,
    progress: &dyn ProgressCallback,
) -> Result<CleanedIncidents, HeatmapError> {
    let file = File::open(path)?;
    if let Ok(metadata) = file.metadata() {
        progress.set_total(metadata.len());
    }

    log::info!("Loading incidents from {}", path.display());
    read_incidents(file, columns, progress)
}

/// Reads CSV data from `reader` and returns its cleaned incidents.
///
/// # Errors
///
/// Returns [`HeatmapError`] if the CSV framing is broken or a required
/// column is missing from the header row.
pub fn read_incidents<R: Read>(
    reader: R,
    columns: &ColumnConfig,
    progress: &dyn ProgressCallback,
) -> Result<CleanedIncidents, HeatmapError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let category_idx = column_index(&headers, &columns.category)?;
    let latitude_idx = column_index(&headers, &columns.latitude)?;
    let longitude_idx = column_index(&headers, &columns.longitude)?;

    let mut cleaned = CleanedIncidents::default();
    let mut record = csv::StringRecord::new();

    while reader.read_record(&mut record)? {
        cleaned.raw_row_count += 1;
        if cleaned.raw_row_count % PROGRESS_INTERVAL == 0 {
            progress.set_position(reader.position().byte());
        }

        let latitude = record.get(latitude_idx).and_then(parse_coordinate);
        let longitude = record.get(longitude_idx).and_then(parse_coordinate);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            continue;
        };

        // Only a truly empty cell is null; padded names stay distinct.
        let category = record
            .get(category_idx)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        cleaned.incidents.push(Incident {
            category,
            location: LatLng::new(latitude, longitude),
        });
    }

    progress.set_position(reader.position().byte());

    log::info!("Loaded {} incidents", cleaned.incidents.len());
    log::debug!(
        "Dropped {} of {} rows during cleaning",
        cleaned.dropped_count(),
        cleaned.raw_row_count
    );

    Ok(cleaned)
}

/// Parses one coordinate cell. Empty, non-numeric, and non-finite values
/// yield `None`.
fn parse_coordinate(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, HeatmapError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| HeatmapError::MissingColumn {
            column: name.to_owned(),
        })
}
