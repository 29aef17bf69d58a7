// pathfinder-core/src/symlink.rs
//! Health checks for the version manager's symlink location.
use std::io;
use std::path::Path;

use pathfinder_common::report::SymlinkHealth;
use tracing::debug;

use crate::fs::{join_lexical, EntryKind, FsProbe};

pub fn inspect_symlink(fs: &dyn FsProbe, path: &Path) -> SymlinkHealth {
    match fs.lstat(path) {
        Ok(EntryKind::Symlink) => {}
        Ok(kind) => {
            debug!("{} exists but is a {:?}", path.display(), kind);
            return SymlinkHealth::NotASymlink;
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => return SymlinkHealth::Missing,
        Err(e) => {
            return SymlinkHealth::Unreadable {
                reason: format!("could not determine if {} is a symlink: {e}", path.display()),
            }
        }
    }

    let target = match fs.read_link(path) {
        Ok(target) if target.is_absolute() => target,
        Ok(relative) => {
            let parent = path.parent().unwrap_or(Path::new(""));
            join_lexical(parent, &relative)
        }
        Err(e) => {
            return SymlinkHealth::Unreadable {
                reason: format!("could not read link {}: {e}", path.display()),
            }
        }
    };

    match fs.stat(&target) {
        Ok(EntryKind::Dir) => SymlinkHealth::Valid { target },
        Ok(_) => SymlinkHealth::PointsToFile { target },
        Err(e) => SymlinkHealth::Unreadable {
            reason: format!("link target {} is not accessible: {e}", target.display()),
        },
    }
}

/// Position of `symlink` among `dirs`, ignoring ASCII case and trailing
/// path separators.
pub fn locate_in_search_path(dirs: &[String], symlink: &Path) -> Option<usize> {
    let wanted = symlink.to_string_lossy();
    let wanted = trim_separators(&wanted);
    dirs.iter()
        .position(|dir| trim_separators(dir).eq_ignore_ascii_case(wanted))
}

fn trim_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        path
    } else {
        trimmed
    }
}
