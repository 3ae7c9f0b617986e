//! Map-point dumps: a header row followed by `id, x, y, z` rows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::{MapError, MapPoint};

pub fn load_map_points(path: impl AsRef<Path>) -> Result<Vec<MapPoint>, MapError> {
    let path = path.as_ref();
    let points = parse_map_points(BufReader::new(File::open(path)?))?;
    log::info!("loaded {} map points from {}", points.len(), path.display());
    Ok(points)
}

/// Parses comma separated rows. The first line is always treated as a header;
/// blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_map_points(reader: impl BufRead) -> Result<Vec<MapPoint>, MapError> {
    let mut points = Vec::new();
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        points.push(parse_row(line).map_err(|message| MapError::Parse {
            line: idx + 1,
            message,
        })?);
    }
    Ok(points)
}

fn parse_row(line: &str) -> Result<MapPoint, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [id, x, y, z] = fields[..] else {
        return Err(format!("expected 4 columns (id, x, y, z), found {}", fields.len()));
    };

    Ok(MapPoint::new(
        parse_id(id)?,
        parse_coord(x, "x")?,
        parse_coord(y, "y")?,
        parse_coord(z, "z")?,
    ))
}

/// Ids are integers, but numeric dumps often write them as `12.0`.
fn parse_id(field: &str) -> Result<i64, String> {
    if let Ok(id) = field.parse::<i64>() {
        return Ok(id);
    }
    match field.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(format!("invalid point id '{field}'")),
    }
}

fn parse_coord(field: &str, axis: &str) -> Result<f64, String> {
    field
        .parse::<f64>()
        .map_err(|e| format!("invalid {axis} coordinate '{field}': {e}"))
}
