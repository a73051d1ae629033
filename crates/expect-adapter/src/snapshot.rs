use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// How one snapshot check resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SnapshotOutcome {
    /// No stored snapshot existed; the current rendering was written and
    /// the check passes.
    Created,
    Matched,
    /// Stored snapshot differed but `UPDATE_SNAPSHOTS` asked for a
    /// rewrite; the check passes.
    Updated,
}

/// Why a snapshot check failed.
#[derive(Debug)]
pub enum SnapshotFailure {
    /// Stored and current renderings differ; carries a line diff
    /// (`-` stored, `+` current).
    Mismatch { name: String, diff: String },
    Io(std::io::Error),
}

/// Text snapshots under one root directory, one `<name>.snap` per
/// snapshot.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new("snapshots")
    }
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.snap"))
    }

    /// Compares `current` against the stored snapshot. First run stores
    /// it and passes; `UPDATE_SNAPSHOTS=1` rewrites on mismatch.
    pub fn verify(&self, name: &str, current: &str) -> Result<SnapshotOutcome, SnapshotFailure> {
        let path = self.path_for(name);
        if !path.exists() {
            self.write(&path, current).map_err(SnapshotFailure::Io)?;
            info!(snapshot = name, path = %path.display(), "stored new snapshot");
            return Ok(SnapshotOutcome::Created);
        }

        let stored = fs::read_to_string(&path).map_err(SnapshotFailure::Io)?;
        if stored == current {
            debug!(snapshot = name, "snapshot matches");
            return Ok(SnapshotOutcome::Matched);
        }

        if update_requested() {
            self.write(&path, current).map_err(SnapshotFailure::Io)?;
            info!(snapshot = name, path = %path.display(), "updated snapshot");
            return Ok(SnapshotOutcome::Updated);
        }

        warn!(snapshot = name, "snapshot mismatch");
        Err(SnapshotFailure::Mismatch {
            name: name.to_string(),
            diff: line_diff(&stored, current),
        })
    }

    fn write(&self, path: &Path, current: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, current)
    }
}

fn update_requested() -> bool {
    matches!(
        std::env::var("UPDATE_SNAPSHOTS")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Positional line diff: unchanged lines indented, stored-only lines
/// prefixed `-`, current-only lines prefixed `+`.
fn line_diff(stored: &str, current: &str) -> String {
    let stored_lines: Vec<&str> = stored.lines().collect();
    let current_lines: Vec<&str> = current.lines().collect();
    let mut out = Vec::new();
    for i in 0..stored_lines.len().max(current_lines.len()) {
        match (stored_lines.get(i), current_lines.get(i)) {
            (Some(s), Some(c)) if s == c => out.push(format!("  {s}")),
            (Some(s), Some(c)) => {
                out.push(format!("- {s}"));
                out.push(format!("+ {c}"));
            }
            (Some(s), None) => out.push(format!("- {s}")),
            (None, Some(c)) => out.push(format!("+ {c}")),
            (None, None) => {}
        }
    }
    out.join("\n")
}
