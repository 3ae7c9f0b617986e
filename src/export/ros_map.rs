//! Writes occupancy grids as a binary PGM image plus `map_server` YAML.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};

use crate::grid::OccupancyGrid;
use crate::loaders::{MapMode, Negate, RosMapMetadata};
use crate::types::{DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, MapError};
use crate::visualization::{ImageLayout, occupancy_grid_to_image};

/// Paths written by [`save_occupancy_grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedMap {
    pub image: PathBuf,
    pub metadata: PathBuf,
}

/// Encodes the grid as a P5 (binary) graymap, one byte per cell.
pub fn write_pgm(
    grid: &OccupancyGrid,
    layout: ImageLayout,
    writer: impl Write,
) -> Result<(), MapError> {
    let img = occupancy_grid_to_image(grid, layout);
    PnmEncoder::new(writer)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::L8)?;
    Ok(())
}

/// Metadata describing `grid` stored next to an image named `image`.
///
/// Occupied cells are white in the image, hence `negate: 1`.
pub fn map_metadata(grid: &OccupancyGrid, image: &str, layout: ImageLayout) -> RosMapMetadata {
    let info = grid.info();
    RosMapMetadata {
        image: image.to_string(),
        resolution: info.resolution,
        origin: [info.origin.x, info.origin.y, 0.0],
        occupied_thresh: DEFAULT_OCCUPIED_THRESH,
        free_thresh: DEFAULT_FREE_THRESH,
        negate: Negate::Int(1),
        mode: MapMode::Trinary,
        layout,
    }
}

/// Writes `<output>.pgm` and `<output>.yaml`. Any extension on `output` is replaced.
pub fn save_occupancy_grid(
    grid: &OccupancyGrid,
    output: impl AsRef<Path>,
    layout: ImageLayout,
) -> Result<SavedMap, MapError> {
    let output = output.as_ref();
    let image = output.with_extension("pgm");
    let metadata = output.with_extension("yaml");
    let image_name = image
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            MapError::InvalidConfig(format!("invalid map output path {}", output.display()))
        })?;

    let mut writer = BufWriter::new(File::create(&image)?);
    write_pgm(grid, layout, &mut writer)?;
    writer.flush()?;

    let yaml = serde_yaml::to_string(&map_metadata(grid, image_name, layout))?;
    std::fs::write(&metadata, yaml)?;

    log::info!(
        "saved {}x{} map ({layout:?} layout) to {} + {}",
        grid.width(),
        grid.height(),
        image.display(),
        metadata.display()
    );
    Ok(SavedMap { image, metadata })
}
