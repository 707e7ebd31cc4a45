//! Writes the rendered page to disk.

use std::path::Path;

use crate::HeatmapError;

/// Writes `html` to `path`, creating parent directories as needed.
/// An existing file at `path` is overwritten.
///
/// # Errors
///
/// Returns [`HeatmapError::Io`] if a directory cannot be created or the
/// file cannot be written.
pub fn write_html(path: &Path, html: &str) -> Result<(), HeatmapError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, html)?;
    log::info!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_existing_file() {
        let dir = std::env::temp_dir().join("crime_heatmap_export_overwrite");
        let path = dir.join("nested").join("map.html");

        write_html(&path, "first").unwrap();
        write_html(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        std::fs::remove_dir_all(&dir).ok();
    }
}
