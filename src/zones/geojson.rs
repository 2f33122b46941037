use anyhow::{anyhow, bail, Context, Result};
use log::warn;
use serde_json::{json, Number, Value};
use zonering::{Point, Ring};

use super::ZoneId;

/// CRS name written into every output file (lon/lat, WGS84 axis order).
pub const CRS84: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// Read the outer ring of a single-polygon GeoJSON document.
///
/// Accepts a FeatureCollection (first feature is used), a Feature, or a bare
/// Polygon geometry. Interior rings are ignored.
pub fn parse_ring(bytes: &[u8]) -> Result<Ring> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    let geometry = find_geometry(&value)?;

    match geometry["type"].as_str() {
        Some("Polygon") => {}
        Some(other) => bail!("expected a Polygon geometry, found {other}"),
        None => bail!("geometry has no \"type\" member"),
    }

    let rings = geometry["coordinates"].as_array()
        .ok_or_else(|| anyhow!("Polygon has no coordinates array"))?;
    let exterior = rings.first()
        .and_then(|ring| ring.as_array())
        .ok_or_else(|| anyhow!("Polygon is missing its exterior ring"))?;
    if rings.len() > 1 {
        warn!("[zones] ignoring {} interior ring(s)", rings.len() - 1);
    }

    Ok(Ring::new(parse_ring_coords(exterior)?)?)
}

/// Locate the geometry object inside a GeoJSON document.
fn find_geometry(value: &Value) -> Result<&Value> {
    match value["type"].as_str() {
        Some("FeatureCollection") => {
            let features = value["features"].as_array()
                .ok_or_else(|| anyhow!("FeatureCollection has no features array"))?;
            if features.len() > 1 {
                warn!("[zones] using the first of {} features", features.len());
            }
            let feature = features.first()
                .ok_or_else(|| anyhow!("FeatureCollection is empty"))?;
            feature_geometry(feature)
        }
        Some("Feature") => feature_geometry(value),
        Some(_) => Ok(value),
        None => bail!("document has no \"type\" member"),
    }
}

fn feature_geometry(feature: &Value) -> Result<&Value> {
    let geometry = &feature["geometry"];
    if !geometry.is_object() {
        bail!("feature has no geometry");
    }
    Ok(geometry)
}

/// Parse `[[x, y], [x, y], ...]`. Extra ordinates (z, m) are ignored.
fn parse_ring_coords(coords: &[Value]) -> Result<Vec<Point>> {
    coords.iter().enumerate().map(|(i, pair)| {
        let pair = pair.as_array()
            .filter(|pair| pair.len() >= 2)
            .ok_or_else(|| anyhow!("coordinate {i} is not an [x, y] array"))?;
        let x = pair[0].as_f64().ok_or_else(|| anyhow!("coordinate {i}: x must be a number"))?;
        let y = pair[1].as_f64().ok_or_else(|| anyhow!("coordinate {i}: y must be a number"))?;
        Ok(Point { x, y })
    }).collect()
}

/// A number printed with exactly six decimals.
fn fixed(v: f64) -> Result<Number> {
    format!("{v:.6}").parse::<Number>()
        .map_err(|e| anyhow!("Failed to format coordinate {v}: {e}"))
}

/// Serialize `ring` as a FeatureCollection holding one Polygon feature.
///
/// The ring is closed by repeating its first vertex.
pub fn write_ring(id: &ZoneId, ring: &Ring) -> Result<Vec<u8>> {
    let first = ring.get(0);
    let coords = ring.iter().chain(std::iter::once(&first))
        .map(|p| Ok(json!([fixed(p.x)?, fixed(p.y)?])))
        .collect::<Result<Vec<Value>>>()?;

    let collection = json!({
        "type": "FeatureCollection",
        "name": id.as_str(),
        "crs": {
            "type": "name",
            "properties": { "name": CRS84 },
        },
        "features": [{
            "type": "Feature",
            "properties": { "Name": id.as_str() },
            "geometry": {
                "type": "Polygon",
                "coordinates": [coords],
            },
        }],
    });

    serde_json::to_vec_pretty(&collection).context("Failed to serialize GeoJSON to bytes")
}
