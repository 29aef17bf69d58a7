// pathfinder/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::io::{self, Write};

use clap::{ArgAction, Parser};
use pathfinder_common::error::Result;
use pathfinder_common::ScanConfig;
use pathfinder_core::{effective_binary, inspect_symlink, locate_in_search_path, HostFs, Scanner};
use tracing::debug;
use tracing::level_filters::LevelFilter;

pub mod report;

use crate::cli::report::{Diagnosis, SymlinkCheck};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "pathfinder", bin_name = "pathfinder")]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of directories to probe concurrently
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Exit with status 1 when the managed symlink is not first
    #[arg(long)]
    pub strict: bool,
}

impl CliArgs {
    /// Runs the scan and prints the report to stdout. Returns the verdict.
    pub fn run(&self, config: ScanConfig) -> Result<bool> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(config, &mut out)
    }

    pub fn run_to<W: Write>(&self, config: ScanConfig, out: &mut W) -> Result<bool> {
        let diagnosis = diagnose(config.clone(), self.jobs as usize)?;

        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&diagnosis)?)?;
        } else {
            write!(out, "{}", report::render_text(&diagnosis, &config))?;
        }
        out.flush()?;

        Ok(diagnosis.report.verdict)
    }

    /// Log level selected by `-v`; warnings only by default.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Process exit status for a finished scan.
    pub fn exit_code(&self, verdict: bool) -> i32 {
        if self.strict && !verdict {
            1
        } else {
            0
        }
    }
}

pub fn diagnose(config: ScanConfig, jobs: usize) -> Result<Diagnosis> {
    let scanner = Scanner::new(config);
    let dirs = scanner.search_directories()?;
    let report = if jobs > 1 {
        scanner.scan_directories_parallel(&dirs, jobs)
    } else {
        scanner.scan_directories(&dirs)
    };

    let effective = effective_binary(scanner.config(), &dirs);
    debug!("Effective binary: {:?}", effective);

    let symlink = scanner.config().managed_symlink.as_ref().map(|path| SymlinkCheck {
        path: path.clone(),
        health: inspect_symlink(&HostFs, path),
        position: locate_in_search_path(&dirs, path),
    });

    Ok(Diagnosis {
        report,
        effective_binary: effective,
        symlink,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use pathfinder_common::error::PathfinderError;
    use pathfinder_common::SymlinkHealth;

    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("pathfinder").chain(argv.iter().copied()))
            .unwrap()
    }

    /// Builds `<root>/other/node` and, on unix, `<root>/nodejs -> <root>/real/v20`
    /// with the marker at `<root>/real/nvm`.
    fn fixture(root: &Path) -> (PathBuf, PathBuf) {
        let other = root.join("other");
        fs::create_dir(&other).unwrap();
        fs::write(other.join("node"), b"").unwrap();

        let real = root.join("real").join("v20");
        fs::create_dir_all(&real).unwrap();
        fs::write(real.join("node"), b"").unwrap();
        fs::write(root.join("real").join("nvm"), b"").unwrap();

        let link = root.join("nodejs");
        #[cfg(unix)]
        std::os::unix::fs::symlink(&real, &link).unwrap();
        (link, other)
    }

    #[test]
    fn defaults_without_arguments() {
        let cli = args(&[]);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.jobs, 1);
        assert!(!cli.json);
        assert!(!cli.strict);
    }

    #[test]
    fn flags_parse() {
        let cli = args(&["-vv", "--json", "--jobs", "4", "--strict"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.jobs, 4);
        assert!(cli.json);
        assert!(cli.strict);
    }

    #[test]
    fn verbosity_selects_log_level() {
        assert_eq!(args(&[]).log_level(), LevelFilter::WARN);
        assert_eq!(args(&["-v"]).log_level(), LevelFilter::INFO);
        assert_eq!(args(&["-vv"]).log_level(), LevelFilter::DEBUG);
        assert_eq!(args(&["-vvvv"]).log_level(), LevelFilter::TRACE);
    }

    #[test]
    fn zero_jobs_is_rejected() {
        assert!(CliArgs::try_parse_from(["pathfinder", "--jobs", "0"]).is_err());
    }

    #[test]
    fn strict_maps_failed_verdict_to_exit_status() {
        let lenient = args(&[]);
        assert_eq!(lenient.exit_code(false), 0);
        assert_eq!(lenient.exit_code(true), 0);

        let strict = args(&["--strict"]);
        assert_eq!(strict.exit_code(false), 1);
        assert_eq!(strict.exit_code(true), 0);
    }

    #[test]
    fn sequential_and_parallel_diagnoses_agree() {
        let tmp = tempfile::tempdir().unwrap();
        let (link, other) = fixture(tmp.path());
        let search_path = format!("{};{};{}", other.display(), link.display(), other.display());
        let config = ScanConfig::new(search_path, "node", "../nvm").with_separator(';');

        let sequential = diagnose(config.clone(), 1).unwrap();
        let parallel = diagnose(config, 4).unwrap();
        assert_eq!(sequential.report, parallel.report);
        assert_eq!(sequential.report.searched, 2);
        assert_eq!(sequential.report.entries[0].path, other.display().to_string());
        assert!(!sequential.report.verdict);
    }

    #[test]
    fn missing_search_path_is_a_config_error() {
        let mut config = ScanConfig::new("", "node", "../nvm");
        config.search_path = None;
        let err = diagnose(config, 1).unwrap_err();
        assert!(matches!(err, PathfinderError::Config(_)));
    }

    #[cfg(unix)]
    #[test]
    fn diagnose_checks_managed_symlink_end_to_end() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let (link, other) = fixture(tmp.path());
        let node = link.join("node");
        fs::set_permissions(&node, fs::Permissions::from_mode(0o755)).unwrap();

        let search_path = format!("{};{}", link.display(), other.display());
        let config = ScanConfig::new(search_path, "node", "../nvm")
            .with_separator(';')
            .with_managed_symlink(&link);

        let diagnosis = diagnose(config, 1).unwrap();
        assert!(diagnosis.report.verdict);
        assert_eq!(diagnosis.effective_binary, Some(node));

        let check = diagnosis.symlink.unwrap();
        assert_eq!(check.position, Some(0));
        assert!(matches!(check.health, SymlinkHealth::Valid { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn json_output_carries_diagnostics() {
        let tmp = tempfile::tempdir().unwrap();
        let (link, other) = fixture(tmp.path());
        let missing = tmp.path().join("not-yet");
        let search_path = format!("{};{}", other.display(), link.display());
        let config = ScanConfig::new(search_path, "node", "../nvm")
            .with_separator(';')
            .with_managed_symlink(&missing);

        let mut out = Vec::new();
        let verdict = args(&["--json"]).run_to(config, &mut out).unwrap();
        assert!(!verdict);

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["verdict"], serde_json::Value::Bool(false));
        assert_eq!(value["entries"][1]["is_managed_link"], true);
        assert_eq!(value["symlink"]["health"]["state"], "missing");
        assert!(value["symlink"]["position"].is_null());
        assert!(value.get("effective_binary").is_some());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_surface_as_io_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ScanConfig::new(tmp.path().display().to_string(), "node", "../nvm")
            .with_separator(';');
        let err = args(&[]).run_to(config, &mut BrokenPipe).unwrap_err();
        assert!(matches!(err, PathfinderError::Io(_)));
    }

    #[test]
    fn text_output_is_written_to_the_given_writer() {
        colored::control::set_override(false);
        let tmp = tempfile::tempdir().unwrap();
        let (_, other) = fixture(tmp.path());
        let config = ScanConfig::new(other.display().to_string(), "node", "../nvm")
            .with_separator(';');

        let mut out = Vec::new();
        let verdict = args(&[]).run_to(config, &mut out).unwrap();
        assert!(!verdict);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&format!("  1. {}\n", other.display())));
        assert!(text.contains("INCORRECTLY positioned"));
    }
}
