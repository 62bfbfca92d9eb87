use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use stateplane_reproject::error::TransformError;
use stateplane_reproject::{convert, ConvertError, ConvertOptions, PointTransform};
use tempfile::tempdir;

/// Stand-in engine: reports `(northing + 1, easting - 1)`.
struct Offset;

impl PointTransform for Offset {
    fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), TransformError> {
        Ok((y + 1.0, x - 1.0))
    }
}

struct Reject;

impl PointTransform for Reject {
    fn transform(&self, _x: f64, _y: f64) -> Result<(f64, f64), TransformError> {
        Err("outside projection domain".into())
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn converts_single_feature_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out2.geojson");
    fs::write(
        &input,
        r#"{"features":[{"properties":{"id":1},"geometry":{"coordinates":[[[100000.0, 750000.0]]]}}]}"#,
    )
    .unwrap();

    convert(&input, &output, &Offset, &ConvertOptions::default()).unwrap();

    assert_eq!(
        read_json(&output),
        json!({"features":[{"properties":{"id":1},"geometry":{"coordinates":[[[99999.0, 750001.0]]]}}]})
    );
}

#[test]
fn output_is_compact_unless_pretty() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    fs::write(&input, r#"{"features":[{"properties":{},"geometry":{"coordinates":[[[1.0,2.0]]]}}]}"#).unwrap();

    let compact = dir.path().join("compact.geojson");
    convert(&input, &compact, &Offset, &ConvertOptions::default()).unwrap();
    assert!(!fs::read_to_string(&compact).unwrap().contains('\n'));

    let pretty = dir.path().join("pretty.geojson");
    let options = ConvertOptions { pretty: true, ..Default::default() };
    convert(&input, &pretty, &Offset, &options).unwrap();
    assert!(fs::read_to_string(&pretty).unwrap().contains('\n'));
    assert_eq!(read_json(&compact), read_json(&pretty));
}

#[test]
fn overwrites_existing_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.geojson");
    fs::write(&input, r#"{"features":[]}"#).unwrap();
    fs::write(&output, "stale contents that are much longer than the new document").unwrap();

    convert(&input, &output, &Offset, &ConvertOptions::default()).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), r#"{"features":[]}"#);
}

#[test]
fn missing_input_is_read_error() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.geojson");
    let err = convert(&dir.path().join("nope.json"), &output, &Offset, &ConvertOptions::default())
        .unwrap_err();
    assert!(matches!(err, ConvertError::Read { .. }), "{err}");
    assert!(!output.exists());
}

#[test]
fn malformed_json_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.geojson");
    fs::write(&input, r#"{"features": [ {"properties": "#).unwrap();

    let err = convert(&input, &output, &Offset, &ConvertOptions::default()).unwrap_err();

    assert!(matches!(err, ConvertError::Parse { .. }), "{err}");
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn structural_failure_leaves_previous_output_alone() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.geojson");
    fs::write(
        &input,
        r#"{"features":[
            {"properties":{"id":1},"geometry":{"coordinates":[[[1.0,2.0]]]}},
            {"properties":{"id":2},"geometry":{}}
        ]}"#,
    )
    .unwrap();
    fs::write(&output, "previous run").unwrap();

    let err = convert(&input, &output, &Offset, &ConvertOptions::default()).unwrap_err();

    assert_eq!(err.to_string(), "feature 1: `geometry.coordinates` is missing");
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run");
}

#[test]
fn unwritable_output_is_write_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    fs::write(&input, r#"{"features":[]}"#).unwrap();
    let output = dir.path().join("missing-dir").join("out.geojson");

    let err = convert(&input, &output, &Offset, &ConvertOptions::default()).unwrap_err();

    assert!(matches!(err, ConvertError::Write { .. }), "{err}");
}

#[test]
fn directory_input_is_read_error() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.geojson");

    let err = convert(dir.path(), &output, &Offset, &ConvertOptions::default()).unwrap_err();

    assert!(matches!(err, ConvertError::Read { .. }), "{err}");
    assert!(!output.exists());
}

#[test]
fn engine_failure_leaves_previous_output_alone() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.geojson");
    fs::write(&input, r#"{"features":[{"properties":{"id":1},"geometry":{"coordinates":[[[1.0,2.0]]]}}]}"#).unwrap();
    fs::write(&output, "previous run").unwrap();

    let err = convert(&input, &output, &Reject, &ConvertOptions::default()).unwrap_err();

    assert!(matches!(err, ConvertError::Transform { .. }), "{err}");
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous run");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn engine_failure_without_previous_output_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.geojson");
    fs::write(&input, r#"{"features":[{"properties":{},"geometry":{"coordinates":[[[1.0,2.0]]]}}]}"#).unwrap();

    assert!(convert(&input, &output, &Reject, &ConvertOptions::default()).is_err());
    assert!(!output.exists());
}
