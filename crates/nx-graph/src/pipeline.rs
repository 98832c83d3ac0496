//! Fixed-point extraction driver.

use nx_core::{NodeId, PassId};
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::dummy::synthesize_dummies;
use crate::error::GraphResult;
use crate::graph::Graph;
use crate::label::{AcceptedPath, label_branches};
use crate::prune::prune;
use crate::validate::validate_coverage;

/// Knobs for one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Upper bound on labeling passes before giving up on a fixed point.
    pub max_passes: u32,
    /// Cap on simple paths enumerated per endpoint pair during junction search.
    pub max_simple_paths: Option<usize>,
    /// Delete non-topology nodes after the last pass.
    pub prune: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_passes: 32,
            max_simple_paths: None,
            prune: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub pass: PassId,
    pub branch_nodes: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Junctions synthesized after this pass.
    pub dummies: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    /// Pass whose labels survive in the graph.
    pub final_pass: PassId,
    pub passes: Vec<PassSummary>,
    /// Every synthesized junction, in creation order.
    pub dummies: Vec<NodeId>,
    /// Branches of the final pass.
    pub accepted: Vec<AcceptedPath>,
    pub removed: Vec<NodeId>,
    pub warnings: Vec<String>,
    /// Dummy synthesis stopped producing junctions within `max_passes`.
    pub converged: bool,
}

/// Drives classification, labeling and junction synthesis to a fixed point,
/// then prunes.
#[derive(Debug, Clone, Default)]
pub struct TopologyExtractor {
    config: ExtractionConfig,
}

impl TopologyExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Run on an annotated mesh graph, starting at `first_pass`.
    ///
    /// The returned `final_pass.next()` is the pass a later run should start at.
    pub fn run(&self, graph: &mut Graph, first_pass: PassId) -> GraphResult<ExtractionReport> {
        let mut pass = first_pass;
        let mut classification = classify(graph);
        let mut labels = label_branches(graph, pass, &classification.branch_nodes)?;

        let mut passes = vec![PassSummary {
            pass,
            branch_nodes: classification.branch_nodes.len(),
            accepted: labels.accepted.len(),
            rejected: labels.rejected,
            dummies: Vec::new(),
        }];
        let mut dummies = Vec::new();
        let mut warnings = std::mem::take(&mut labels.warnings);
        let mut converged = false;

        loop {
            if passes.len() >= self.config.max_passes as usize {
                warn!(
                    passes = passes.len(),
                    "junction synthesis did not reach a fixed point"
                );
                break;
            }

            let synth = synthesize_dummies(
                graph,
                &classification.branch_nodes,
                self.config.max_simple_paths,
            )?;
            if synth.dummies.is_empty() {
                converged = true;
                break;
            }
            if let Some(last) = passes.last_mut() {
                last.dummies = synth.dummies.clone();
            }
            dummies.extend(synth.dummies);

            classification = classify(graph);
            pass = pass.next();
            labels = label_branches(graph, pass, &classification.branch_nodes)?;
            warnings.append(&mut labels.warnings);
            debug!(
                pass = %pass,
                dummies = dummies.len(),
                masters = classification.master_nodes.len(),
                "relabeled after synthesis"
            );

            passes.push(PassSummary {
                pass,
                branch_nodes: classification.branch_nodes.len(),
                accepted: labels.accepted.len(),
                rejected: labels.rejected,
                dummies: Vec::new(),
            });
        }

        validate_coverage(&labels.accepted)?;

        let removed = if self.config.prune {
            prune(graph, pass).removed
        } else {
            Vec::new()
        };

        info!(
            final_pass = %pass,
            passes = passes.len(),
            branches = labels.accepted.len(),
            dummies = dummies.len(),
            nodes = graph.node_count(),
            converged,
            "extracted topology"
        );

        Ok(ExtractionReport {
            final_pass: pass,
            passes,
            dummies,
            accepted: labels.accepted,
            removed,
            warnings,
            converged,
        })
    }
}
