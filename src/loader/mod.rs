//! Parses project documents and reconciles stored figures on the way in.
//!
//! Every load runs the full audit; discrepancies are logged and attached to
//! the result, never fatal. A document only fails to load when it is not
//! valid JSON or uses a status value the schema does not know.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::audit::{audit_project, DataQualityIssue};
use crate::models::Project;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse project document")]
    Parse(#[from] serde_json::Error),
}

/// A parsed project together with whatever the reconciliation audit found.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: Project,
    pub findings: Vec<DataQualityIssue>,
}

pub fn from_json_str(raw: &str) -> Result<LoadedProject, LoadError> {
    let project: Project = serde_json::from_str(raw)?;
    let findings = audit_project(&project);
    for issue in &findings {
        warn!(project = %project.code, %issue, "stored figure disagrees with recomputation");
    }
    debug!(
        project = %project.code,
        phases = project.phases.len(),
        findings = findings.len(),
        "project loaded"
    );
    Ok(LoadedProject { project, findings })
}

pub fn from_json_file(path: &Path) -> Result<LoadedProject, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json_str(&raw)
}
