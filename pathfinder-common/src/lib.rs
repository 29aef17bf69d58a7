// pathfinder-common/src/lib.rs
pub mod config;
pub mod error;
pub mod report;

pub use config::ScanConfig;
pub use error::{PathfinderError, Result};
pub use report::{QualifyingDirectory, ScanReport, SymlinkHealth};
