//! ASCII PLY export of map points and camera trajectories for 3-D viewers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::DVec3;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;

use crate::loaders::TrajectoryPose;
use crate::types::{MapError, MapPoint};

/// Light green, so the path stands out against an uncoloured cloud.
pub const TRAJECTORY_COLOR: [u8; 3] = [144, 238, 144];

fn vertex_element(with_color: bool) -> ElementDef {
    let mut element = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        let p = PropertyDef::new(axis.to_string(), PropertyType::Scalar(ScalarType::Double));
        element.properties.add(p);
    }
    if with_color {
        for channel in ["red", "green", "blue"] {
            let p = PropertyDef::new(channel.to_string(), PropertyType::Scalar(ScalarType::UChar));
            element.properties.add(p);
        }
    }
    element
}

fn vertex(p: DVec3, color: Option<[u8; 3]>) -> DefaultElement {
    let mut vertex = DefaultElement::new();
    vertex.insert("x".to_string(), Property::Double(p.x));
    vertex.insert("y".to_string(), Property::Double(p.y));
    vertex.insert("z".to_string(), Property::Double(p.z));
    if let Some([r, g, b]) = color {
        vertex.insert("red".to_string(), Property::UChar(r));
        vertex.insert("green".to_string(), Property::UChar(g));
        vertex.insert("blue".to_string(), Property::UChar(b));
    }
    vertex
}

fn write_vertices(
    mut writer: impl Write,
    positions: impl Iterator<Item = DVec3>,
    color: Option<[u8; 3]>,
) -> Result<(), MapError> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header.elements.add(vertex_element(color.is_some()));

    let vertices = positions.map(|p| vertex(p, color)).collect();
    ply.payload.insert("vertex".to_string(), vertices);

    Writer::new().write_ply(&mut writer, &mut ply)?;
    Ok(())
}

/// Writes the point positions; ids are not part of the PLY.
pub fn write_point_cloud_ply(points: &[MapPoint], writer: impl Write) -> Result<(), MapError> {
    write_vertices(writer, points.iter().map(|p| p.position), None)
}

/// Writes the trajectory positions as [`TRAJECTORY_COLOR`] vertices.
pub fn write_trajectory_ply(poses: &[TrajectoryPose], writer: impl Write) -> Result<(), MapError> {
    write_vertices(
        writer,
        poses.iter().map(|p| p.position),
        Some(TRAJECTORY_COLOR),
    )
}

pub fn save_point_cloud(points: &[MapPoint], path: impl AsRef<Path>) -> Result<(), MapError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_point_cloud_ply(points, &mut writer)?;
    writer.flush()?;
    log::info!("saved {} points to {}", points.len(), path.display());
    Ok(())
}

pub fn save_trajectory(poses: &[TrajectoryPose], path: impl AsRef<Path>) -> Result<(), MapError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_trajectory_ply(poses, &mut writer)?;
    writer.flush()?;
    log::info!("saved {} trajectory poses to {}", poses.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::DQuat;

    use super::*;

    fn split(bytes: &[u8]) -> (Vec<String>, Vec<String>) {
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let mut lines = text.lines().map(str::to_string);
        let header: Vec<_> = lines.by_ref().take_while(|l| l != "end_header").collect();
        let body: Vec<_> = lines.filter(|l| !l.trim().is_empty()).collect();
        (header, body)
    }

    #[test]
    fn point_cloud_ply() {
        let points = [
            MapPoint::new(10, 1.0, 2.0, 3.0),
            MapPoint::new(11, -0.5, 0.0, 4.25),
        ];
        let mut bytes = Vec::new();
        write_point_cloud_ply(&points, &mut bytes).unwrap();

        let (header, body) = split(&bytes);
        assert_eq!(header[0], "ply");
        assert!(header.contains(&"format ascii 1.0".to_string()));
        assert!(header.contains(&"element vertex 2".to_string()));
        assert!(header.contains(&"property double x".to_string()));
        assert!(!header.iter().any(|l| l.contains("red")));

        assert_eq!(body.len(), 2);
        let first: Vec<f64> = body[0]
            .split_whitespace()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(first, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn trajectory_ply_is_coloured() {
        let poses = [TrajectoryPose {
            timestamp: 0.0,
            position: DVec3::new(0.5, 1.5, -2.0),
            orientation: DQuat::IDENTITY,
        }];
        let mut bytes = Vec::new();
        write_trajectory_ply(&poses, &mut bytes).unwrap();

        let (header, body) = split(&bytes);
        assert!(header.contains(&"element vertex 1".to_string()));
        assert!(header.contains(&"property uchar green".to_string()));
        let fields: Vec<&str> = body[0].split_whitespace().collect();
        assert_eq!(fields[3..], ["144", "238", "144"]);
    }
}
