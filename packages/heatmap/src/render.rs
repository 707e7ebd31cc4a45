//! HTML rendering of a [`MapDocument`].
//!
//! Produces a single page that loads Leaflet and Leaflet.heat and builds
//! the map in an inline script. Variable names are derived from element
//! positions, so the same document always renders to the same bytes.

use crime_heatmap_models::{HighlightArea, Legend};
use serde::Serialize;

use crate::HeatmapError;
use crate::document::MapDocument;

const LEAFLET_CSS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT_JS: &str =
    "https://cdn.jsdelivr.net/npm/leaflet.heat@0.2.0/dist/leaflet-heat.js";

const MAP_VAR: &str = "map";
const TILE_VAR: &str = "tile_layer";
const HIGHLIGHT_VAR: &str = "highlight_area";

/// Renders `doc` as a standalone HTML page.
///
/// # Errors
///
/// Returns [`HeatmapError::Json`] if any embedded value fails to serialize.
pub fn render_html(doc: &MapDocument) -> Result<String, HeatmapError> {
    let legend = doc.legend.as_ref().map(render_legend).unwrap_or_default();
    let script = render_script(doc)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta http-equiv="content-type" content="text/html; charset=UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />
    <title>{title}</title>
    <link rel="stylesheet" href="{LEAFLET_CSS}" />
    <script src="{LEAFLET_JS}"></script>
    <script src="{LEAFLET_HEAT_JS}"></script>
    <style>
        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
        #{MAP_VAR} {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}
    </style>
</head>
<body>
    <div id="{MAP_VAR}"></div>
{legend}
    <script>
{script}
    </script>
</body>
</html>
"#,
        title = escape_html(&doc.title),
    ))
}

/// Builds the inline script that constructs the map and its overlays.
fn render_script(doc: &MapDocument) -> Result<String, HeatmapError> {
    let mut script = String::new();

    let map_options = serde_json::json!({
        "center": doc.center,
        "zoom": doc.zoom.start,
        "minZoom": doc.zoom.min,
        "maxZoom": doc.zoom.max,
        "zoomControl": true,
        "preferCanvas": false,
    });
    script.push_str(&format!(
        "var {MAP_VAR} = L.map({}, {});\n",
        to_script_json(MAP_VAR)?,
        to_script_json(&map_options)?,
    ));

    let tile_options = serde_json::json!({
        "attribution": doc.tiles.attribution,
        "minZoom": doc.zoom.min,
        "maxZoom": doc.zoom.max,
    });
    script.push_str(&format!(
        "var {TILE_VAR} = L.tileLayer({}, {}).addTo({MAP_VAR});\n",
        to_script_json(&doc.tiles.url)?,
        to_script_json(&tile_options)?,
    ));

    if let Some(lock) = &doc.bounds_lock {
        script.push_str(&lock.script(MAP_VAR));
    }

    let heat_options = serde_json::json!({
        "radius": doc.heat_options.radius,
        "blur": doc.heat_options.blur,
        "minOpacity": doc.heat_options.min_opacity,
        "maxZoom": doc.heat_options.max_zoom,
    });
    let heat_options = to_script_json(&heat_options)?;

    let mut overlays = Vec::with_capacity(doc.heat_layers.len());
    for (i, layer) in doc.heat_layers.iter().enumerate() {
        let var = format!("heat_layer_{i}");
        script.push_str(&format!("var {var} = L.featureGroup().addTo({MAP_VAR});\n"));
        script.push_str(&format!(
            "L.heatLayer({}, {heat_options}).addTo({var});\n",
            to_script_json(&layer.points)?,
        ));
        overlays.push(format!("{}: {var}", to_script_json(&layer.name)?));
    }

    if let Some(highlight) = &doc.highlight {
        script.push_str(&render_highlight(highlight)?);
    }

    if let Some(control) = &doc.layer_control {
        let control_options = serde_json::json!({
            "collapsed": control.collapsed,
            "autoZIndex": true,
        });
        script.push_str(&format!(
            "L.control.layers({{{}: {TILE_VAR}}}, {{{}}}, {}).addTo({MAP_VAR});\n",
            to_script_json(&doc.tiles.name)?,
            overlays.join(", "),
            to_script_json(&control_options)?,
        ));
    }

    Ok(script)
}

fn render_highlight(highlight: &HighlightArea) -> Result<String, HeatmapError> {
    let options = serde_json::json!({
        "color": highlight.color,
        "fill": highlight.fill,
        "fillColor": highlight.color,
        "fillOpacity": highlight.fill_opacity,
    });

    Ok(format!(
        "var {HIGHLIGHT_VAR} = L.polygon({}, {}).addTo({MAP_VAR});\n\
         {HIGHLIGHT_VAR}.bindPopup({});\n",
        to_script_json(&highlight.locations)?,
        to_script_json(&options)?,
        to_script_json(&highlight.popup)?,
    ))
}

/// Static legend block, pinned to the lower-left corner of the viewport.
fn render_legend(legend: &Legend) -> String {
    let mut html = String::from(
        r#"    <div style="
        position: fixed;
        bottom: 30px;
        left: 30px;
        z-index: 9999;
        background-color: white;
        padding: 10px;
        border: 2px solid grey;
        border-radius: 5px;
        box-shadow: 2px 2px 6px rgba(0,0,0,0.3);
    ">
"#,
    );

    html.push_str(&format!("        <b>{}</b><br>\n", escape_html(&legend.title)));

    for entry in &legend.entries {
        html.push_str(&format!(
            "        <i style=\"background: {}; opacity: 0.6; width: 18px; height: 10px; \
             float: left; margin-right: 5px;\"></i> {}<br>\n",
            escape_html(&entry.color),
            escape_html(&entry.label),
        ));
    }

    if let Some(note) = &legend.note {
        html.push_str(&format!(
            "        <br><b>{}</b>: {}\n",
            escape_html(&note.label),
            escape_html(&note.text),
        ));
    }

    html.push_str("    </div>");
    html
}

/// Serializes `value` as JSON that is safe to place inside a `<script>`
/// element.
fn to_script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, HeatmapError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use crime_heatmap_models::{BoundingBox, HeatLayer, LatLng, LegendEntry};

    use super::*;
    use crate::config::MapConfig;

    fn document() -> MapDocument {
        let config = MapConfig::embedded().unwrap();
        MapDocument::new(&config, LatLng::new(41.8, -87.6))
            .with_bounds_lock(BoundingBox {
                south_west: LatLng::new(41.7, -87.7),
                north_east: LatLng::new(41.9, -87.5),
            })
            .with_heat_layer(HeatLayer {
                name: "THEFT".to_string(),
                points: vec![LatLng::new(41.88, -87.62)],
            })
            .with_heat_layer(HeatLayer {
                name: "BATTERY".to_string(),
                points: vec![LatLng::new(41.9, -87.6)],
            })
            .with_highlight(config.highlight.clone())
            .with_legend(config.legend.clone())
            .with_layer_control(config.layer_control.collapsed)
    }

    #[test]
    fn renders_every_element() {
        let html = render_html(&document()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("var map = L.map(\"map\""));
        assert!(html.contains("\"minZoom\":11"));
        assert!(html.contains("\"maxZoom\":13"));
        assert!(html.contains("map.setMaxBounds([[41.7, -87.7], [41.9, -87.5]]);"));
        assert!(html.contains("L.heatLayer([[41.88,-87.62]], "));
        assert!(html.contains("\"radius\":10"));
        assert!(html.contains("\"blur\":12"));
        assert!(html.contains(
            "L.polygon([[41.74,-87.65],[41.74,-87.58],[41.7,-87.58],[41.7,-87.65]]"
        ));
        assert!(html.contains("highlight_area.bindPopup(\"South Side (Example Area)\");"));
        assert!(html.contains("<b>Crime Heatmap Legend</b>"));
        assert!(html.contains("Higher Crime Concentration"));
        assert!(html.contains("<br><b>Red Box</b>: Example Area Highlight"));
        assert!(html.contains(
            "L.control.layers({\"openstreetmap\": tile_layer}, \
             {\"THEFT\": heat_layer_0, \"BATTERY\": heat_layer_1}, \
             {\"autoZIndex\":true,\"collapsed\":false})"
        ));
    }

    #[test]
    fn no_bounds_lock_without_bounds() {
        let config = MapConfig::embedded().unwrap();
        let doc = MapDocument::new(&config, config.map.fallback_center);

        let html = render_html(&doc).unwrap();

        assert!(!html.contains("setMaxBounds"));
        assert!(!html.contains("fitBounds"));
        assert!(!html.contains("L.heatLayer"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            render_html(&document()).unwrap(),
            render_html(&document()).unwrap()
        );
    }

    #[test]
    fn category_names_cannot_close_the_script() {
        let config = MapConfig::embedded().unwrap();
        let doc = MapDocument::new(&config, LatLng::new(41.8, -87.6))
            .with_heat_layer(HeatLayer {
                name: "</script><b>".to_string(),
                points: vec![LatLng::new(41.88, -87.62)],
            })
            .with_layer_control(false);

        let html = render_html(&doc).unwrap();

        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script><b>"));
    }

    #[test]
    fn legend_text_is_escaped() {
        let legend = Legend {
            title: "Crime & <Heat>".to_string(),
            entries: vec![LegendEntry {
                color: "red".to_string(),
                label: "\"High\"".to_string(),
            }],
            note: None,
        };

        let html = render_legend(&legend);

        assert!(html.contains("<b>Crime &amp; &lt;Heat&gt;</b>"));
        assert!(html.contains("&quot;High&quot;"));
        assert!(!html.contains("Red Box"));
    }
}
