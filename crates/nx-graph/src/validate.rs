//! Topology validation logic.

use std::collections::BTreeSet;

use nx_core::{NodeId, PassId};

use crate::device::Descriptor;
use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;
use crate::label::AcceptedPath;

fn invalid(what: String) -> GraphError {
    GraphError::Validation { what }
}

/// Check the graph is simple: every edge joins two distinct live nodes and
/// adjacency is symmetric.
pub fn validate_structure(graph: &Graph) -> GraphResult<()> {
    for a in graph.node_ids() {
        for b in graph.neighbors(a) {
            if a == b {
                return Err(GraphError::SelfLoop { node: a });
            }
            if !graph.contains(b) {
                return Err(GraphError::InvalidNodeRef { node: b });
            }
            if !graph.has_edge(b, a) {
                return Err(invalid(format!("edge {a}-{b} is one-sided")));
            }
        }
    }
    Ok(())
}

/// Check a pruned graph: structure, annotation exclusivity, and endpoint
/// integrity of every branch label against `pass`.
pub fn validate_topology(graph: &Graph, pass: PassId) -> GraphResult<()> {
    validate_structure(graph)?;

    for node in graph.nodes() {
        let Some(branch) = &node.branch else {
            continue;
        };
        if node.is_branch_device() {
            return Err(invalid(format!(
                "node {} is both a branch device and a branch label",
                node.id
            )));
        }
        if branch.pass != pass {
            return Err(invalid(format!(
                "node {} carries a label from {} (expected {pass})",
                node.id, branch.pass
            )));
        }

        let meta = &branch.metadata;
        for (endpoint, descriptor) in [
            (meta.source_node, &meta.source),
            (meta.target_node, &meta.target),
        ] {
            check_endpoint(graph, node.id, endpoint, descriptor)?;
        }
    }
    Ok(())
}

fn check_endpoint(
    graph: &Graph,
    labeled: NodeId,
    endpoint: NodeId,
    recorded: &Descriptor,
) -> GraphResult<()> {
    let target = graph.node(endpoint).ok_or_else(|| {
        invalid(format!("node {labeled} refers to removed endpoint {endpoint}"))
    })?;
    let device = target
        .device
        .as_ref()
        .filter(|d| d.is_branch())
        .ok_or_else(|| {
            invalid(format!(
                "endpoint {endpoint} of node {labeled} is not a branch node"
            ))
        })?;

    if *recorded == Descriptor::Unresolved {
        return Ok(());
    }
    let actual = device.descriptor(endpoint)?;
    if actual != *recorded {
        return Err(invalid(format!(
            "node {labeled} names endpoint {endpoint} '{recorded}' but it is '{actual}'"
        )));
    }
    Ok(())
}

/// No two accepted paths of one pass may join the same endpoint pair.
pub fn validate_coverage(accepted: &[AcceptedPath]) -> GraphResult<()> {
    let mut seen = BTreeSet::new();
    for path in accepted {
        let (s, t) = (path.source(), path.target());
        let key = if s < t { (s, t) } else { (t, s) };
        if !seen.insert(key) {
            return Err(invalid(format!("endpoints {s} and {t} covered twice")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{BranchAnnotation, BranchMetadata, DeviceAnnotation};
    use crate::graph::Style;
    use nx_core::Coord;

    fn port(name: &str) -> DeviceAnnotation {
        DeviceAnnotation::Port {
            name: name.into(),
            terminal: false,
        }
    }

    fn labeled_chain() -> (Graph, Vec<NodeId>) {
        let mut g = Graph::new();
        let ids: Vec<_> = (0..3)
            .map(|_| g.add_node(Coord::default()).unwrap())
            .collect();
        g.add_edge(ids[0], ids[1]).unwrap();
        g.add_edge(ids[1], ids[2]).unwrap();
        g.set_device(ids[0], port("A"), Style::default()).unwrap();
        g.set_device(ids[2], port("B"), Style::default()).unwrap();
        g.set_branch(
            ids[1],
            BranchAnnotation {
                pass: PassId::FIRST,
                metadata: BranchMetadata {
                    index: 0,
                    source: Descriptor::Port("A".into()),
                    target: Descriptor::Port("B".into()),
                    source_node: ids[0],
                    target_node: ids[2],
                },
                position: Coord::default(),
            },
        )
        .unwrap();
        (g, ids)
    }

    #[test]
    fn valid_topology_passes() {
        let (g, _) = labeled_chain();
        validate_topology(&g, PassId::FIRST).unwrap();
    }

    #[test]
    fn stale_pass_is_rejected() {
        let (g, _) = labeled_chain();
        assert!(validate_topology(&g, PassId::FIRST.next()).is_err());
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let (mut g, ids) = labeled_chain();
        g.remove_node(ids[2]);
        let err = validate_topology(&g, PassId::FIRST).unwrap_err();
        assert!(err.to_string().contains("removed endpoint"));
    }

    #[test]
    fn renamed_endpoint_is_rejected() {
        let (mut g, ids) = labeled_chain();
        g.node_mut(ids[2]).unwrap().device = Some(port("C"));
        assert!(validate_topology(&g, PassId::FIRST).is_err());
    }
}
