//! Conduction path discovery and branch labeling.

use std::collections::BTreeSet;

use nx_core::{NodeId, PassId};
use tracing::{debug, warn};

use crate::device::{BranchAnnotation, BranchMetadata, Descriptor};
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::paths::shortest_path;

/// A path accepted as a branch in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedPath {
    pub nodes: Vec<NodeId>,
    pub metadata: BranchMetadata,
}

impl AcceptedPath {
    pub fn source(&self) -> NodeId {
        self.metadata.source_node
    }

    pub fn target(&self) -> NodeId {
        self.metadata.target_node
    }

    /// Nodes strictly between the endpoints.
    pub fn interior(&self) -> &[NodeId] {
        &self.nodes[1..self.nodes.len() - 1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelReport {
    pub pass: PassId,
    pub accepted: Vec<AcceptedPath>,
    /// Shortest paths thrown out for crossing a branch node.
    pub rejected: usize,
    pub warnings: Vec<String>,
}

/// A path is valid when no interior node demarcates a branch: it may not
/// enter a nested device instance nor run through another port.
fn is_valid_path(graph: &Graph, path: &[NodeId]) -> bool {
    path.len() >= 2
        && path[1..path.len() - 1]
            .iter()
            .all(|&n| graph.node(n).is_some_and(|node| !node.is_branch_device()))
}

/// Descriptor of an endpoint; a classification gap becomes a node warning.
fn endpoint_descriptor(
    graph: &mut Graph,
    id: NodeId,
    warnings: &mut Vec<String>,
) -> GraphResult<Descriptor> {
    let node = graph.node_or_err(id)?;
    let derived = match &node.device {
        Some(device) => device.descriptor(id),
        None => Err(GraphError::Classification {
            node: id,
            what: "branch endpoint has no device annotation".to_string(),
        }),
    };

    match derived {
        Ok(descriptor) => Ok(descriptor),
        Err(err @ GraphError::Classification { .. }) => {
            let message = err.to_string();
            warn!(node = %id, "{message}");
            graph.node_mut_or_err(id)?.warnings.push(message.clone());
            warnings.push(message);
            Ok(Descriptor::Unresolved)
        }
        Err(err) => Err(err),
    }
}

/// Find the non-redundant branch paths between `branch_nodes` and label them.
///
/// Pairs are visited per connected component in ascending id order. A pair
/// is skipped when an already accepted path contains both of its nodes,
/// otherwise one shortest path is tried. Interior nodes of every accepted
/// path get a `BranchAnnotation` for `pass`; edges along it get the label
/// `"{pass}:{index}"`. Unreachable pairs are not an error.
pub fn label_branches(
    graph: &mut Graph,
    pass: PassId,
    branch_nodes: &BTreeSet<NodeId>,
) -> GraphResult<LabelReport> {
    let mut paths: Vec<(Vec<NodeId>, BTreeSet<NodeId>)> = Vec::new();
    let mut rejected = 0;

    for component in graph.components() {
        let members: Vec<NodeId> = component
            .into_iter()
            .filter(|n| branch_nodes.contains(n))
            .collect();

        for &s in &members {
            for &t in &members {
                if s == t {
                    continue;
                }
                if paths
                    .iter()
                    .any(|(_, covered)| covered.contains(&s) && covered.contains(&t))
                {
                    continue;
                }
                let Some(path) = shortest_path(graph, s, t) else {
                    continue;
                };
                if !is_valid_path(graph, &path) {
                    rejected += 1;
                    continue;
                }
                let covered = path.iter().copied().collect();
                paths.push((path, covered));
            }
        }
    }

    let mut warnings = Vec::new();
    let mut accepted = Vec::with_capacity(paths.len());
    for (index, (nodes, _)) in paths.into_iter().enumerate() {
        let (s, t) = (nodes[0], nodes[nodes.len() - 1]);
        let metadata = BranchMetadata {
            index,
            source: endpoint_descriptor(graph, s, &mut warnings)?,
            target: endpoint_descriptor(graph, t, &mut warnings)?,
            source_node: s,
            target_node: t,
        };

        for &n in &nodes[1..nodes.len() - 1] {
            let position = graph.node_or_err(n)?.position;
            graph.set_branch(
                n,
                BranchAnnotation {
                    pass,
                    metadata: metadata.clone(),
                    position,
                },
            )?;
        }
        for w in nodes.windows(2) {
            graph.set_edge_label(w[0], w[1], format!("{pass}:{index}"))?;
        }

        accepted.push(AcceptedPath { nodes, metadata });
    }

    debug!(
        pass = %pass,
        branch_nodes = branch_nodes.len(),
        accepted = accepted.len(),
        rejected,
        "labeled branches"
    );
    Ok(LabelReport {
        pass,
        accepted,
        rejected,
        warnings,
    })
}
