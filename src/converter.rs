use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use geojson::{LineStringType, Position};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};
use crate::projection::PointTransform;

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    // rewrite hole rings too, not only coordinates[0]
    pub all_rings: bool,
    pub pretty: bool,
}

/// Writes the engine's output as `(second, first)`. The default engine reports
/// `(latitude, longitude)`, so this yields GeoJSON's `(longitude, latitude)`.
pub fn transform_point(transform: &dyn PointTransform, coord: &Position) -> Result<Position> {
    if coord.len() < 2 {
        return Err(ConvertError::structure(
            "coordinates",
            format!("position has {} component(s), expected 2", coord.len()),
        ));
    }
    let (x, y) = (coord[0], coord[1]);
    let out = transform
        .transform(x, y)
        .map_err(|source| ConvertError::Transform { x, y, source })?;
    // serde_json would write NaN/inf as null
    if !out.0.is_finite() || !out.1.is_finite() {
        return Err(ConvertError::Transform {
            x,
            y,
            source: format!("non-finite result ({}, {})", out.0, out.1).into(),
        });
    }
    Ok(vec![out.1, out.0])
}

pub fn transform_ring(transform: &dyn PointTransform, ring: &[Position]) -> Result<LineStringType> {
    ring.iter().map(|coord| transform_point(transform, coord)).collect()
}

fn member_mut<'a>(value: &'a mut Value, key: &str, field: &str) -> Result<&'a mut Value> {
    value
        .as_object_mut()
        .ok_or_else(|| ConvertError::structure(field, "parent is not an object"))?
        .get_mut(key)
        .ok_or_else(|| ConvertError::structure(field, "is missing"))
}

fn decode_ring(value: &Value, field: &str) -> Result<LineStringType> {
    serde_json::from_value(value.clone())
        .map_err(|e| ConvertError::structure(field, format!("is not a list of positions: {}", e)))
}

fn encode_ring(ring: LineStringType) -> Value {
    Value::Array(
        ring.into_iter()
            .map(|pos| Value::Array(pos.into_iter().map(Value::from).collect()))
            .collect(),
    )
}

// Returns the rewritten exterior ring so convert can log it.
pub fn reproject_feature(
    feature: &mut Value,
    transform: &dyn PointTransform,
    options: &ConvertOptions,
) -> Result<LineStringType> {
    let geometry = member_mut(feature, "geometry", "geometry")?;
    let rings = member_mut(geometry, "coordinates", "geometry.coordinates")?
        .as_array_mut()
        .ok_or_else(|| ConvertError::structure("geometry.coordinates", "is not an array"))?;
    if rings.is_empty() {
        return Err(ConvertError::structure("geometry.coordinates[0]", "is missing"));
    }

    let count = if options.all_rings { rings.len() } else { 1 };
    let mut exterior = None;
    for (index, slot) in rings.iter_mut().take(count).enumerate() {
        let field = format!("geometry.coordinates[{}]", index);
        let ring = transform_ring(transform, &decode_ring(slot, &field)?)?;
        if index == 0 {
            exterior = Some(ring.clone());
        }
        *slot = encode_ring(ring);
    }
    Ok(exterior.unwrap_or_default())
}

fn features_mut(document: &mut Value) -> Result<&mut Vec<Value>> {
    member_mut(document, "features", "features")?
        .as_array_mut()
        .ok_or_else(|| ConvertError::structure("features", "is not an array"))
}

pub fn reproject_document(
    document: &mut Value,
    transform: &dyn PointTransform,
    options: &ConvertOptions,
) -> Result<()> {
    for (index, feature) in features_mut(document)?.iter_mut().enumerate() {
        reproject_feature(feature, transform, options).map_err(|e| e.in_feature(index))?;
    }
    Ok(())
}

pub fn load_document(path: &Path) -> Result<Value> {
    log::info!("Loading file: {}", path.display());
    // read fully first so I/O failures never surface as parse errors
    let bytes = fs::read(path).map_err(|source| ConvertError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ConvertError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// Write to a temp file beside the target, then rename over it.
pub fn write_document(path: &Path, document: &Value, pretty: bool) -> Result<()> {
    let write_err = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    let mut writer = BufWriter::new(tmp);
    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut writer, document)
    } else {
        serde_json::to_writer(&mut writer, document)
    };
    encoded.map_err(|e| write_err(e.into()))?;
    writer.flush().map_err(write_err)?;

    let tmp = writer.into_inner().map_err(|e| write_err(e.into_error()))?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Nothing is written unless every feature converts.
pub fn convert(
    input: &Path,
    output: &Path,
    transform: &dyn PointTransform,
    options: &ConvertOptions,
) -> Result<()> {
    let mut document = load_document(input)?;
    let features = features_mut(&mut document)?;
    log::info!("Found {} features in file", features.len());

    for (index, feature) in features.iter_mut().enumerate() {
        match feature.get("properties") {
            Some(properties) => log::info!("{}", properties),
            None => log::info!("feature {} has no properties", index),
        }
        let exterior = reproject_feature(feature, transform, options).map_err(|e| e.in_feature(index))?;
        for position in &exterior {
            log::trace!("{}", position[1]);
        }
    }

    write_document(output, &document, options.pretty)
}
