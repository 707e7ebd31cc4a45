#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the crime heatmap generator.
//!
//! With no arguments it reads the configured incident CSV, renders the top
//! categories as heat layers, and writes the HTML map to the configured
//! output path, printing one confirmation line on success.
//!
//! Uses `indicatif-log-bridge` (via [`crime_heatmap_cli_utils::init_logger`])
//! so log output and the load progress bar never fight for the terminal.

use std::path::{Path, PathBuf};

use clap::Parser;
use crime_heatmap::config::MapConfig;
use crime_heatmap::pipeline;
use crime_heatmap_cli_utils::IndicatifProgress;

#[derive(Parser)]
#[command(
    name = "crime_heatmap",
    about = "Render per-category crime heatmaps into a standalone HTML map"
)]
struct Cli {
    /// TOML file layered over the built-in configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Incident CSV to read (overrides the configured path)
    #[arg(long)]
    input: Option<PathBuf>,

    /// HTML file to write (overrides the configured path)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// Replaces the configured input and output paths with any given on
    /// the command line.
    fn apply_overrides(self, config: &mut MapConfig) {
        if let Some(input) = self.input {
            config.input_path = input;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
    }
}

fn confirmation_line(output_path: &Path) -> String {
    format!("✅ Map created: {}", output_path.display())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = crime_heatmap_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => MapConfig::from_file(path)?,
        None => MapConfig::embedded()?,
    };
    cli.apply_overrides(&mut config);

    let progress = IndicatifProgress::bytes_bar(&multi, "Loading incidents");
    let summary = pipeline::run(&config, &progress)?;

    for layer in &summary.layers {
        log::info!("Heat layer '{}': {} incidents", layer.name, layer.count);
    }

    println!("{}", confirmation_line(&summary.output_path));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("crime_heatmap").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_flags_keep_configured_paths() {
        let mut config = MapConfig::embedded().unwrap();
        let defaults = config.clone();

        parse(&[]).apply_overrides(&mut config);

        assert_eq!(config.input_path, defaults.input_path);
        assert_eq!(config.output_path, defaults.output_path);
    }

    #[test]
    fn input_and_output_flags_replace_configured_paths() {
        let mut config = MapConfig::embedded().unwrap();

        parse(&["--input", "data/2024.csv", "--output", "out/map.html"])
            .apply_overrides(&mut config);

        assert_eq!(config.input_path, PathBuf::from("data/2024.csv"));
        assert_eq!(config.output_path, PathBuf::from("out/map.html"));
    }

    #[test]
    fn output_flag_alone_leaves_input_untouched() {
        let mut config = MapConfig::embedded().unwrap();
        let input = config.input_path.clone();

        parse(&["--output", "elsewhere.html"]).apply_overrides(&mut config);

        assert_eq!(config.input_path, input);
        assert_eq!(config.output_path, PathBuf::from("elsewhere.html"));
    }

    #[test]
    fn config_flag_is_parsed_as_path() {
        let cli = parse(&["--config", "chicago.toml"]);

        assert_eq!(cli.config, Some(PathBuf::from("chicago.toml")));
    }

    #[test]
    fn confirmation_names_output_file() {
        assert_eq!(
            confirmation_line(Path::new("chicago_crime_heatmap_legend_area.html")),
            "✅ Map created: chicago_crime_heatmap_legend_area.html"
        );
    }
}
