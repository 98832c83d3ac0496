//! Project loading, saving, validation, and introspection.

use std::path::Path;

use nx_project::schema::Project;

use crate::error::{AppError, AppResult};

/// Summary of an input document for listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub points: usize,
    /// Cell count per kind name.
    pub cells: Vec<(String, usize)>,
    pub groups: Vec<String>,
    pub elements: usize,
}

/// Load a project, YAML or JSON by extension.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => nx_project::from_json_str(&content)?,
        _ => nx_project::from_yaml_str(&content)?,
    };
    Ok(project)
}

/// Save a project as YAML.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    nx_project::save_yaml(path, project)?;
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    nx_project::validate_project(project)?;
    Ok(())
}

pub fn summarize_project(project: &Project) -> ProjectSummary {
    ProjectSummary {
        name: project.name.clone(),
        points: project.mesh.points.len(),
        cells: project
            .mesh
            .cells
            .iter()
            .map(|(kind, cells)| (kind.clone(), cells.len()))
            .collect(),
        groups: project.mesh.field_data.keys().cloned().collect(),
        elements: project.elements.len(),
    }
}
