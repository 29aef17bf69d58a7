// pathfinder/src/cli/report.rs
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use colored::Colorize;
use pathfinder_common::report::{ScanReport, SymlinkHealth};
use pathfinder_common::ScanConfig;
use serde::Serialize;

const PRODUCT: &str = "NVM for Windows";
const RUNTIME: &str = "Node.js";

#[derive(Debug, Clone, Serialize)]
pub struct SymlinkCheck {
    pub path: PathBuf,
    pub health: SymlinkHealth,
    /// Position in the deduplicated search path.
    pub position: Option<usize>,
}

/// Everything printed for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    #[serde(flatten)]
    pub report: ScanReport,
    pub effective_binary: Option<PathBuf>,
    pub symlink: Option<SymlinkCheck>,
}

pub fn render_text(diagnosis: &Diagnosis, config: &ScanConfig) -> String {
    let mut out = String::new();
    let report = &diagnosis.report;

    let _ = writeln!(
        out,
        "PATH directories containing {}:\n",
        config.target_binary
    );
    for entry in &report.entries {
        let label = if entry.is_managed_link {
            format!(" ({})", config.managed_label).cyan().to_string()
        } else {
            String::new()
        };
        let _ = writeln!(out, "  {}. {}{}", entry.original_index + 1, entry.path, label);
    }

    if report.verdict {
        let _ = writeln!(
            out,
            "\n{}",
            format!("{PRODUCT} is correctly positioned in the PATH.").green()
        );
    } else {
        let _ = writeln!(
            out,
            "\n{}",
            format!("{PRODUCT} is INCORRECTLY positioned in the PATH (must be first)")
                .red()
                .bold()
        );
        let _ = writeln!(
            out,
            "A prior/alternative installation of {RUNTIME} may be preventing {PRODUCT} from functioning."
        );
    }

    if let Some(binary) = &diagnosis.effective_binary {
        let _ = writeln!(
            out,
            "\n{} {}",
            format!("Active {}:", config.target_binary).dimmed(),
            binary.display()
        );
    }

    if let Some(check) = &diagnosis.symlink {
        let problems = symlink_problems(check, config);
        let missing = check.health == SymlinkHealth::Missing;
        if !problems.is_empty() || missing {
            let _ = writeln!(out);
        }
        for problem in problems {
            let _ = writeln!(out, "{} {}", "Warning:".yellow(), problem);
        }
        if missing {
            let _ = writeln!(
                out,
                "{} ({}) does not exist yet. It is created when a version is activated.",
                config.managed_label,
                check.path.display()
            );
        }
    }

    out
}

fn symlink_problems(check: &SymlinkCheck, config: &ScanConfig) -> Vec<String> {
    let mut problems = Vec::new();
    let path = check.path.display();

    if check.position.is_none() {
        problems.push(format!(
            "The {} ({path}) was not found in the PATH environment variable.",
            config.managed_label
        ));
    }

    if check.health.is_problem() {
        problems.extend(describe_health(&check.health, config, &check.path));
    }

    problems
}

fn describe_health(health: &SymlinkHealth, config: &ScanConfig, path: &Path) -> Option<String> {
    match health {
        SymlinkHealth::NotASymlink => Some(format!(
            "{} ({}) is not a valid symlink.",
            config.managed_label,
            path.display()
        )),
        SymlinkHealth::PointsToFile { target } => Some(format!(
            "{} is a symlink to a file ({}) instead of a directory.",
            config.managed_label,
            target.display()
        )),
        SymlinkHealth::Unreadable { reason } => Some(reason.clone()),
        SymlinkHealth::Missing | SymlinkHealth::Valid { .. } => None,
    }
}
