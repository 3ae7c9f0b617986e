//! Command line front end.
//!
//! ```text
//! pcl2grid grid PointCloud.txt -o gridmap --cell-size 0.1
//! pcl2grid cloud PointCloud.txt -o pointcloud.ply
//! pcl2grid trajectory CameraTrajectory.txt -o trajectory.ply
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage details.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pcl2grid::export::{save_occupancy_grid, save_point_cloud, save_trajectory};
use pcl2grid::{
    ImageLayout, MapperConfig, PlaneBasis, build_grid_map, load_map_points, load_tum_trajectory,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an occupancy grid (PGM + YAML) from a map-point file
    Grid {
        /// Map points, `id, x, y, z` per row after a header row
        input: PathBuf,

        /// Output path; `.pgm` and `.yaml` are written next to each other
        #[arg(short, long, default_value = "gridmap")]
        output: PathBuf,

        /// YAML config file; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Grid extent in cells
        #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
        grid_size: Option<Vec<u32>>,

        /// Edge length of one cell in world units
        #[arg(long)]
        cell_size: Option<f64>,

        /// In-plane axes: `aligned` or `principal`
        #[arg(long)]
        basis: Option<PlaneBasis>,

        /// Write the image in map-viewer orientation (x along columns, y = 0
        /// at the bottom) instead of one image row per x index
        #[arg(long)]
        ros_orientation: bool,
    },
    /// Convert a map-point file to an ASCII PLY point cloud
    Cloud {
        input: PathBuf,

        #[arg(short, long, default_value = "pointcloud.ply")]
        output: PathBuf,
    },
    /// Convert a TUM trajectory to a coloured ASCII PLY
    Trajectory {
        input: PathBuf,

        #[arg(short, long, default_value = "trajectory.ply")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match args.command {
        Command::Grid {
            input,
            output,
            config,
            grid_size,
            cell_size,
            basis,
            ros_orientation,
        } => {
            let mut mapper = match config {
                Some(path) => MapperConfig::from_yaml_file(path)?,
                None => MapperConfig::default(),
            };
            if let Some([width, height]) = grid_size.as_deref() {
                mapper.grid_size = [*width, *height];
            }
            if let Some(cell_size) = cell_size {
                mapper.cell_size = cell_size;
            }
            if let Some(basis) = basis {
                mapper.basis = basis;
            }

            let points = load_map_points(&input)?;
            let map = build_grid_map(&points, &mapper)?;
            let layout = if ros_orientation {
                ImageLayout::Ros
            } else {
                ImageLayout::Indexed
            };
            let saved = save_occupancy_grid(&map.grid, &output, layout)?;
            println!(
                "Grid map saved as {} ({} cells occupied, {} dropped)",
                saved.image.display(),
                map.grid.occupied_count(),
                map.stats.dropped_cells
            );
        }
        Command::Cloud { input, output } => {
            let points = load_map_points(&input)?;
            save_point_cloud(&points, &output)?;
        }
        Command::Trajectory { input, output } => {
            let poses = load_tum_trajectory(&input)?;
            save_trajectory(&poses, &output)?;
        }
    }

    Ok(())
}
