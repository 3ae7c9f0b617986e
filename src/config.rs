//! Run configuration, loadable from YAML.
//!
//! ```yaml
//! grid_size: [1000, 1000]
//! cell_size: 0.1
//! basis: aligned
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::index::check_cell_size;
use crate::types::{DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, MapError};

/// Which orthonormal axes of the fitted plane become the grid's x and y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneBasis {
    /// Rotate the plane normal onto +Z along the shortest arc and keep x, y.
    /// A plane that is already horizontal keeps its world x, y unchanged.
    #[default]
    Aligned,
    /// Use the directions of largest and second-largest spread of the points.
    Principal,
}

impl FromStr for PlaneBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aligned" => Ok(Self::Aligned),
            "principal" => Ok(Self::Principal),
            other => Err(format!(
                "unknown plane basis '{other}', expected 'aligned' or 'principal'"
            )),
        }
    }
}

impl fmt::Display for PlaneBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aligned => f.write_str("aligned"),
            Self::Principal => f.write_str("principal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Grid extent in cells, `[x, y]`.
    pub grid_size: [u32; 2],
    /// Edge length of one cell in world units.
    pub cell_size: f64,
    pub basis: PlaneBasis,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            basis: PlaneBasis::default(),
        }
    }
}

impl MapperConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MapError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        let [width, height] = self.grid_size;
        if width == 0 || height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }
        check_cell_size(self.cell_size)
    }
}
