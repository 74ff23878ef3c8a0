//! Bundled demo dataset and the in-memory project store.
//!
//! The demo document carries the same discrepancies a real export would,
//! so loading it produces audit findings on purpose.

use crate::loader::{self, LoadedProject, LoadError};
use crate::models::Project;

pub const DEMO_PROJECT_JSON: &str = include_str!("demo_project.json");

/// In-memory project store keyed by project code. Callers own an instance
/// and pass it where needed; there is no global.
#[derive(Debug, Default)]
pub struct FixtureRepository {
    projects: Vec<Project>,
}

impl FixtureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a project, replacing any existing one with the same code.
    pub fn insert(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.code == project.code) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.code == code)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }
}

pub fn demo_project() -> Result<LoadedProject, LoadError> {
    loader::from_json_str(DEMO_PROJECT_JSON)
}

pub fn demo_repository() -> Result<FixtureRepository, LoadError> {
    let loaded = demo_project()?;
    let mut repo = FixtureRepository::new();
    repo.insert(loaded.project);
    Ok(repo)
}
