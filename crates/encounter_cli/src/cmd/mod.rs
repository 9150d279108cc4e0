pub mod generate;
pub mod list;

use std::path::PathBuf;

/// Default data root, relative to the workspace.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("crates/encounter_engine/data")
}
