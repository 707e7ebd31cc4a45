#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-category crime heatmap generation.
//!
//! Reads an incident CSV export, drops rows without usable coordinates,
//! derives the dataset extent, and renders the most frequent categories
//! as toggle-able heat layers on a standalone Leaflet HTML page.
//!
//! The stages run strictly in sequence; see [`pipeline::run`].

pub mod bounds;
pub mod categories;
pub mod config;
pub mod document;
pub mod export;
pub mod load;
pub mod pipeline;
pub mod progress;
pub mod render;

/// Errors that can occur while generating a heatmap.
#[derive(Debug, thiserror::Error)]
pub enum HeatmapError {
    /// I/O error (input read or output write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML configuration could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON serialization of map data failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the CSV header row.
    #[error("Required column '{column}' not found in CSV header")]
    MissingColumn {
        /// Name of the missing column.
        column: String,
    },

    /// Configuration parsed but holds inconsistent values.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what went wrong.
        message: String,
    },
}
