//! End-to-end extraction: document in, topology out.

use std::path::Path;

use nx_core::PassId;
use nx_graph::{
    CellKind, DeviceAnnotator, ExtractionReport, Graph, TopologyExtractor, TopologyView, classify,
    validate_topology,
};
use nx_project::schema::Project;
use serde::Serialize;
use tracing::info;

use crate::compile::compile_project;
use crate::error::{AppError, AppResult};
use crate::hash::topology_digest;
use crate::project_service::load_project;

/// Command-line overrides of document settings.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub max_passes: Option<u32>,
    pub cell_kind: Option<String>,
    pub max_simple_paths: Option<usize>,
    pub no_prune: bool,
}

#[derive(Debug, Clone)]
pub struct ExtractResponse {
    pub graph: Graph,
    pub report: ExtractionReport,
    pub view: TopologyView,
    pub digest: String,
    /// Mesh nodes that received a device annotation.
    pub annotated: usize,
}

/// Serializable run overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractSummary {
    pub passes: usize,
    pub final_pass: u32,
    pub converged: bool,
    pub nodes: usize,
    pub edges: usize,
    pub annotated: usize,
    pub terminals: usize,
    pub dummies: usize,
    pub removed: usize,
    pub branches: Vec<String>,
    pub warnings: Vec<String>,
    pub digest: String,
}

impl ExtractResponse {
    pub fn summary(&self) -> ExtractSummary {
        ExtractSummary {
            passes: self.report.passes.len(),
            final_pass: self.report.final_pass.get(),
            converged: self.report.converged,
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            annotated: self.annotated,
            terminals: classify(&self.graph).terminal_nodes.len(),
            dummies: self.report.dummies.len(),
            removed: self.report.removed.len(),
            branches: self
                .report
                .accepted
                .iter()
                .map(|p| p.metadata.to_string())
                .collect(),
            warnings: self.report.warnings.clone(),
            digest: self.digest.clone(),
        }
    }
}

fn apply_options(project: &Project, options: &ExtractOptions) -> AppResult<Project> {
    let mut project = project.clone();
    let settings = &mut project.settings;
    if let Some(max_passes) = options.max_passes {
        if max_passes == 0 {
            return Err(AppError::InvalidInput(
                "max passes must be at least 1".to_string(),
            ));
        }
        settings.max_passes = max_passes;
    }
    if let Some(kind) = &options.cell_kind {
        if CellKind::from_name(kind).is_none() {
            return Err(AppError::InvalidInput(format!("Unknown cell kind: {kind}")));
        }
        settings.cell_kind = kind.clone();
    }
    if options.max_simple_paths.is_some() {
        settings.max_simple_paths = options.max_simple_paths;
    }
    if options.no_prune {
        settings.prune = false;
    }
    Ok(project)
}

/// Build, annotate and extract the topology of one document.
pub fn extract(project: &Project, options: &ExtractOptions) -> AppResult<ExtractResponse> {
    let project = apply_options(project, options)?;
    nx_project::validate_project(&project)?;
    let compiled = compile_project(&project)?;

    let mut graph = compiled.builder.build(&compiled.mesh)?;
    let annotated = DeviceAnnotator::new(compiled.tolerance)
        .annotate(&mut graph, &compiled.elements)?
        .annotated
        .len();

    let report = TopologyExtractor::new(compiled.config).run(&mut graph, PassId::FIRST)?;
    if compiled.config.prune {
        validate_topology(&graph, report.final_pass)?;
    }

    let view = TopologyView::from_graph(&graph);
    let digest = topology_digest(&view);
    info!(
        project = %project.name,
        nodes = graph.node_count(),
        branches = report.accepted.len(),
        digest = %digest,
        "extraction finished"
    );

    Ok(ExtractResponse {
        graph,
        report,
        view,
        digest,
        annotated,
    })
}

pub fn extract_file(path: &Path, options: &ExtractOptions) -> AppResult<ExtractResponse> {
    let project = load_project(path)?;
    extract(&project, options)
}
