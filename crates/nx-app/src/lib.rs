//! Shared application service layer for netex.
//!
//! Ties document loading, compilation to mesh and element inputs,
//! extraction and digesting together for the CLI.

pub mod compile;
pub mod error;
pub mod extract_service;
pub mod hash;
pub mod project_service;

// Re-export key types for convenience
pub use compile::{
    CompiledProject, compile_elements, compile_mesh, compile_project, compile_settings,
};
pub use error::{AppError, AppResult};
pub use extract_service::{ExtractOptions, ExtractResponse, ExtractSummary, extract, extract_file};
pub use hash::topology_digest;
pub use project_service::{
    ProjectSummary, load_project, save_project, summarize_project, validate_project,
};
