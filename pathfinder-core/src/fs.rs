// pathfinder-core/src/fs.rs
//! Read-only filesystem primitives used while probing search path entries.
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// The filesystem calls a scan is allowed to make.
pub trait FsProbe: Debug + Send + Sync {
    /// Kind of `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Kind of `path` itself, without following a final symlink.
    fn lstat(&self, path: &Path) -> io::Result<EntryKind>;

    /// Fully dereferenced absolute path.
    fn real_path(&self, path: &Path) -> io::Result<PathBuf>;

    /// Immediate target of a symlink.
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Probes the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFs;

impl FsProbe for HostFs {
    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        fs::metadata(path).map(|m| m.file_type().into())
    }

    fn lstat(&self, path: &Path) -> io::Result<EntryKind> {
        fs::symlink_metadata(path).map(|m| m.file_type().into())
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }
}

/// Joins `relative` onto `base` resolving `.` and `..` lexically.
///
/// Only sound when `base` contains no symlinks, e.g. a canonical path.
pub fn join_lexical(base: &Path, relative: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
            Component::RootDir | Component::Prefix(_) => {
                out = PathBuf::from(component.as_os_str());
            }
        }
    }
    out
}
