//! Camera trajectories in TUM format: `timestamp x y z qx qy qz qw` per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::{DQuat, DVec3};

use crate::types::MapError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPose {
    pub timestamp: f64,
    pub position: DVec3,
    pub orientation: DQuat,
}

pub fn load_tum_trajectory(path: impl AsRef<Path>) -> Result<Vec<TrajectoryPose>, MapError> {
    let path = path.as_ref();
    let poses = parse_tum_trajectory(BufReader::new(File::open(path)?))?;
    log::info!("loaded {} trajectory poses from {}", poses.len(), path.display());
    Ok(poses)
}

/// Lines without exactly eight numeric fields (including `#` comments) are
/// skipped with a warning rather than failing the whole file.
pub fn parse_tum_trajectory(reader: impl BufRead) -> Result<Vec<TrajectoryPose>, MapError> {
    let mut poses = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_pose(line) {
            Some(pose) => poses.push(pose),
            None => log::warn!("skipping malformed trajectory line {}: {line}", idx + 1),
        }
    }
    Ok(poses)
}

fn parse_pose(line: &str) -> Option<TrajectoryPose> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    let [timestamp, x, y, z, qx, qy, qz, qw] = values[..] else {
        return None;
    };
    Some(TrajectoryPose {
        timestamp,
        position: DVec3::new(x, y, z),
        orientation: DQuat::from_xyzw(qx, qy, qz, qw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_skips_malformed() {
        let text = "# timestamp tx ty tz qx qy qz qw\n\
                    1.5 0.1 0.2 0.3 0 0 0 1\n\
                    2.0 1 2\n\
                    \n\
                    2.5 -1 -2 -3 0 0 0.7071 0.7071\n\
                    3.0 a b c 0 0 0 1\n";
        let poses = parse_tum_trajectory(text.as_bytes()).unwrap();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[0].timestamp, 1.5);
        assert_eq!(poses[0].position, DVec3::new(0.1, 0.2, 0.3));
        assert_eq!(poses[0].orientation, DQuat::IDENTITY);
        assert_eq!(poses[1].position, DVec3::new(-1.0, -2.0, -3.0));
    }
}
