#![deny(missing_docs)]
//! Package to ingest HRRR point forecasts into a local archive.

//
// Public API
//
pub use crate::archive::Archive;
pub use crate::cmd_line::CmdLineArgs;
pub use crate::errors::HrrrIngestErr;
pub use crate::extract::{extract_level_group, process_grib_file};
pub use crate::grib::{LevelDataset, LevelFilter};
pub use crate::locate::nearest_grid_point;
pub use crate::points::{parse_points, read_points_file, Coords};
pub use crate::records::ForecastRecord;
pub use crate::variables::{LevelType, StepType, Variable, VariableSpec};

//
// Implementation only
//
mod archive;
mod cmd_line;
mod errors;
mod extract;
mod grib;
mod locate;
mod points;
mod records;
pub mod remote;
mod variables;
