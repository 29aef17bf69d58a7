// pathfinder-core/src/lib.rs
pub mod fs;
pub mod scan;
pub mod search_path;
pub mod symlink;

pub use fs::{FsProbe, HostFs};
pub use scan::{effective_binary, probe_directory, Scanner};
pub use search_path::enumerate_search_directories;
pub use symlink::{inspect_symlink, locate_in_search_path};
