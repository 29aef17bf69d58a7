// pathfinder-core/src/search_path.rs
use std::collections::HashSet;

use pathfinder_common::error::{PathfinderError, Result};
use tracing::debug;

/// Splits the raw search path into unique directories, keeping the first
/// occurrence of each. Empty segments are skipped.
pub fn enumerate_search_directories(raw: Option<&str>, separator: char) -> Result<Vec<String>> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            return Err(PathfinderError::Config(
                "the PATH environment variable is not set or is empty".to_string(),
            ))
        }
    };

    let (dirs, _) = raw.split(separator).filter(|s| !s.is_empty()).fold(
        (Vec::new(), HashSet::new()),
        |(mut dirs, mut seen), dir| {
            if seen.insert(dir) {
                dirs.push(dir.to_string());
            } else {
                debug!("Skipping duplicate search path entry: {}", dir);
            }
            (dirs, seen)
        },
    );

    if dirs.is_empty() {
        return Err(PathfinderError::Config(format!(
            "the PATH environment variable contains no directories: {raw:?}"
        )));
    }

    debug!("Search path has {} unique directories", dirs.len());
    Ok(dirs)
}
