// pathfinder-core/src/scan.rs
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::unbounded;
use pathfinder_common::config::ScanConfig;
use pathfinder_common::error::Result;
use pathfinder_common::report::{QualifyingDirectory, ScanReport};
use threadpool::ThreadPool;
use tracing::{debug, info, instrument, trace};

use crate::fs::{join_lexical, EntryKind, FsProbe, HostFs};
use crate::search_path::enumerate_search_directories;

/// Scans the configured search path for the target binary.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: Arc<ScanConfig>,
    fs: Arc<dyn FsProbe>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self::with_probe(config, Arc::new(HostFs))
    }

    pub fn with_probe(config: ScanConfig, fs: Arc<dyn FsProbe>) -> Self {
        Self {
            config: Arc::new(config),
            fs,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn search_directories(&self) -> Result<Vec<String>> {
        enumerate_search_directories(self.config.search_path.as_deref(), self.config.separator)
    }

    /// Probes one directory. The returned entry's index is a placeholder.
    pub fn probe_directory(&self, dir: &str) -> Option<QualifyingDirectory> {
        probe_directory(self.fs.as_ref(), &self.config, dir)
    }

    #[instrument(skip_all, name = "scan")]
    pub fn scan(&self) -> Result<ScanReport> {
        let dirs = self.search_directories()?;
        Ok(self.scan_directories(&dirs))
    }

    /// Probes already enumerated directories in order.
    pub fn scan_directories(&self, dirs: &[String]) -> ScanReport {
        let qualifying: Vec<QualifyingDirectory> = dirs
            .iter()
            .filter_map(|dir| self.probe_directory(dir))
            .collect();
        self.finish(qualifying, dirs.len())
    }

    /// Same as [`Scanner::scan`], with probes spread over a worker pool.
    #[instrument(skip_all, name = "scan_parallel")]
    pub fn scan_parallel(&self, workers: usize) -> Result<ScanReport> {
        let dirs = self.search_directories()?;
        Ok(self.scan_directories_parallel(&dirs, workers))
    }

    pub fn scan_directories_parallel(&self, dirs: &[String], workers: usize) -> ScanReport {
        let searched = dirs.len();
        let num_workers = workers
            .clamp(1, num_cpus::get().max(1))
            .min(searched)
            .max(1);
        let pool = ThreadPool::new(num_workers);
        debug!("Probing {} directories with {} workers", searched, num_workers);

        let (result_tx, result_rx) = unbounded();
        for (position, dir) in dirs.iter().cloned().enumerate() {
            let fs = Arc::clone(&self.fs);
            let config = Arc::clone(&self.config);
            let result_tx = result_tx.clone();
            pool.execute(move || {
                let probed = probe_directory(fs.as_ref(), &config, &dir);
                let _ = result_tx.send((position, probed));
            });
        }
        drop(result_tx);
        pool.join();

        let mut results: Vec<(usize, Option<QualifyingDirectory>)> = result_rx.iter().collect();
        results.sort_by_key(|(position, _)| *position);
        let qualifying = results.into_iter().filter_map(|(_, dir)| dir).collect();
        self.finish(qualifying, searched)
    }

    fn finish(&self, qualifying: Vec<QualifyingDirectory>, searched: usize) -> ScanReport {
        let report = ScanReport::from_ordered(qualifying, searched);
        info!(
            "{} of {} directories contain {}, verdict: {}",
            report.entries.len(),
            searched,
            self.config.target_binary,
            if report.verdict { "ok" } else { "misplaced" }
        );
        report
    }
}

/// Returns the directory if `<dir>/<target_binary>` is a regular file.
/// Failures of any kind count as absence.
pub fn probe_directory(
    fs: &dyn FsProbe,
    config: &ScanConfig,
    dir: &str,
) -> Option<QualifyingDirectory> {
    let candidate = Path::new(dir).join(&config.target_binary);
    match fs.stat(&candidate) {
        Ok(EntryKind::File) => {}
        Ok(kind) => {
            trace!("{} is not a regular file ({:?})", candidate.display(), kind);
            return None;
        }
        Err(e) => {
            trace!("{} not usable: {}", candidate.display(), e);
            return None;
        }
    }

    let is_managed_link = is_managed_link(fs, config, Path::new(dir));
    debug!("Found {} (managed: {})", candidate.display(), is_managed_link);
    Some(QualifyingDirectory {
        path: dir.to_string(),
        is_managed_link,
        original_index: 0,
    })
}

fn is_managed_link(fs: &dyn FsProbe, config: &ScanConfig, dir: &Path) -> bool {
    match fs.lstat(dir) {
        Ok(EntryKind::Symlink) => {}
        Ok(_) => return false,
        Err(e) => {
            debug!("Could not lstat {}: {}", dir.display(), e);
            return false;
        }
    }

    let real = match fs.real_path(dir) {
        Ok(real) => real,
        Err(e) => {
            debug!("Could not resolve symlink {}: {}", dir.display(), e);
            return false;
        }
    };

    let marker = join_lexical(&real, &config.marker_relative);
    match fs.stat(&marker) {
        Ok(_) => true,
        Err(e) => {
            debug!(
                "{} resolves to {} but has no marker at {}: {}",
                dir.display(),
                real.display(),
                marker.display(),
                e
            );
            false
        }
    }
}

/// The binary the operating system would run for the target name, looked up
/// over `dirs` in order.
pub fn effective_binary(config: &ScanConfig, dirs: &[String]) -> Option<PathBuf> {
    let joined = match env::join_paths(dirs) {
        Ok(joined) => joined,
        Err(e) => {
            debug!("Could not join search path for lookup: {}", e);
            return None;
        }
    };
    let cwd = env::current_dir().unwrap_or_else(|e| {
        debug!("Could not read current directory, using '.': {}", e);
        PathBuf::from(".")
    });
    which::which_in(&config.target_binary, Some(joined), cwd)
        .map_err(|e| debug!("{} not resolvable on PATH: {}", config.target_binary, e))
        .ok()
}
