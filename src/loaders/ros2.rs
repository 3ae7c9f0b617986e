use std::path::{Path, PathBuf};

use glam::{DVec2, UVec2};
use image::GenericImageView;
use serde::{Deserialize, Serialize};

use crate::grid::OccupancyGrid;
use crate::types::{
    DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, MapError, MapInfo, OCCUPIED,
};
use crate::visualization::ImageLayout;

/// `map_server` style metadata that accompanies a map image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosMapMetadata {
    pub image: String,
    pub resolution: f64,
    pub origin: [f64; 3],
    #[serde(
        default = "default_occupied_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    pub occupied_thresh: f32,
    #[serde(
        default = "default_free_thresh",
        deserialize_with = "deserialize_threshold"
    )]
    pub free_thresh: f32,
    #[serde(default = "default_negate")]
    pub negate: Negate,
    #[serde(default = "default_map_mode")]
    pub mode: MapMode,
    /// Pixel layout of the image. Plain `map_server` files carry no such key
    /// and use the ROS orientation.
    #[serde(default = "default_layout")]
    pub layout: ImageLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Negate {
    Bool(bool),
    Int(i32),
}

impl Negate {
    fn is_negated(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
        }
    }
}

fn default_negate() -> Negate {
    Negate::Bool(false)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    Trinary,
    Scale,
    Raw,
}

fn default_map_mode() -> MapMode {
    MapMode::Trinary
}

fn default_layout() -> ImageLayout {
    ImageLayout::Ros
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(
            "thresholds must be in the range [0.0, 1.0]",
        ))
    }
}

/// Loads a map image + YAML pair into a binary occupancy grid.
///
/// Pixels follow `map_server` trinary semantics: occupancy is `(255 - v) / 255`,
/// or `v / 255` when `negate` is set. Cells at or above `occupied_thresh` become
/// [`OCCUPIED`], everything else [`FREE`](crate::types::FREE). Pixels are placed according to the
/// `layout` key; other modes are rejected.
pub fn load_occupancy_grid(yaml_path: impl AsRef<Path>) -> Result<OccupancyGrid, MapError> {
    let yaml_path = yaml_path.as_ref();
    let yaml_str = std::fs::read_to_string(yaml_path)?;
    let metadata: RosMapMetadata = serde_yaml::from_str(&yaml_str)?;

    if metadata.occupied_thresh <= metadata.free_thresh {
        return Err(MapError::InvalidMetadata(
            "occupied_thresh must be greater than free_thresh".to_string(),
        ));
    }
    if metadata.mode != MapMode::Trinary {
        return Err(MapError::InvalidMetadata(format!(
            "only trinary maps can be loaded as occupancy grids, got {:?}",
            metadata.mode
        )));
    }
    if !(metadata.resolution.is_finite() && metadata.resolution > 0.0) {
        return Err(MapError::InvalidMetadata(format!(
            "resolution must be positive, got {}",
            metadata.resolution
        )));
    }

    let negate = metadata.negate.is_negated();
    let image_path = resolve_image_path(yaml_path, &metadata.image);
    let image = image::open(&image_path)?;
    let (image_width, image_height) = image.dimensions();
    let gray = image.to_luma8();

    // Both layouts swap back into themselves: indexed transposes, ros keeps.
    let (width, height) = metadata.layout.image_dimensions(image_width, image_height);
    let info = MapInfo {
        width,
        height,
        resolution: metadata.resolution,
        origin: DVec2::new(metadata.origin[0], metadata.origin[1]),
    };
    let mut grid = OccupancyGrid::empty(info);

    for y in 0..height {
        for x in 0..width {
            let (col, row) = metadata.layout.pixel_of(UVec2::new(x, y), height);
            let value = gray.get_pixel(col, row).0[0] as f32 / 255.0;
            let occupancy = if negate { value } else { 1.0 - value };
            if occupancy >= metadata.occupied_thresh {
                grid.set(UVec2::new(x, y), OCCUPIED)?;
            }
        }
    }

    Ok(grid)
}

pub(crate) fn resolve_image_path(yaml_path: &Path, image_ref: &str) -> PathBuf {
    let image_path = PathBuf::from(image_ref);
    if image_path.is_absolute() {
        return image_path;
    }

    match yaml_path.parent() {
        Some(parent) => parent.join(image_path),
        None => image_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_defaults() {
        let yaml = "image: map.pgm\nresolution: 0.05\norigin: [-1.0, 2.0, 0.0]\n";
        let metadata: RosMapMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.negate, Negate::Bool(false));
        assert_eq!(metadata.mode, MapMode::Trinary);
        assert_eq!(metadata.occupied_thresh, DEFAULT_OCCUPIED_THRESH);
        assert_eq!(metadata.free_thresh, DEFAULT_FREE_THRESH);
    }

    #[test]
    fn threshold_out_of_range() {
        let yaml = "image: map.pgm\nresolution: 0.05\norigin: [0, 0, 0]\noccupied_thresh: 1.5\n";
        assert!(serde_yaml::from_str::<RosMapMetadata>(yaml).is_err());
    }

    #[test]
    fn negate_accepts_int_and_bool() {
        for (value, expected) in [("1", true), ("0", false), ("true", true)] {
            let yaml = format!("image: m.pgm\nresolution: 1\norigin: [0, 0, 0]\nnegate: {value}\n");
            let metadata: RosMapMetadata = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(metadata.negate.is_negated(), expected);
        }
    }

    #[test]
    fn plain_map_server_yaml_uses_ros_layout() {
        let yaml = "image: map.pgm\nresolution: 0.05\norigin: [0, 0, 0]\n";
        let metadata: RosMapMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.layout, ImageLayout::Ros);
    }

    #[test]
    fn rejects_non_trinary_modes() {
        let dir = tempfile::tempdir().unwrap();
        image::GrayImage::new(2, 2)
            .save(dir.path().join("map.pgm"))
            .unwrap();
        for mode in ["scale", "raw"] {
            let yaml_path = dir.path().join(format!("{mode}.yaml"));
            let yaml = format!("image: map.pgm\nresolution: 1.0\norigin: [0, 0, 0]\nmode: {mode}\n");
            std::fs::write(&yaml_path, yaml).unwrap();
            assert!(
                matches!(load_occupancy_grid(&yaml_path), Err(MapError::InvalidMetadata(_))),
                "{mode}"
            );
        }

        let yaml_path = dir.path().join("trinary.yaml");
        std::fs::write(&yaml_path, "image: map.pgm\nresolution: 1.0\norigin: [0, 0, 0]\n").unwrap();
        let grid = load_occupancy_grid(&yaml_path).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
    }

    #[test]
    fn relative_image_path() {
        let resolved = resolve_image_path(Path::new("/maps/site.yaml"), "site.pgm");
        assert_eq!(resolved, PathBuf::from("/maps/site.pgm"));
        let resolved = resolve_image_path(Path::new("/maps/site.yaml"), "/data/site.pgm");
        assert_eq!(resolved, PathBuf::from("/data/site.pgm"));
    }
}
