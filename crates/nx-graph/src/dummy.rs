//! Synthesis of implicit junction nodes.

use std::collections::{BTreeSet, HashSet};

use nx_core::NodeId;
use tracing::{debug, warn};

use crate::device::DeviceAnnotation;
use crate::error::GraphResult;
use crate::graph::{Graph, Style};
use crate::paths::all_simple_paths;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DummyReport {
    /// Nodes promoted to `Dummy`, ascending.
    pub dummies: Vec<NodeId>,
    /// Some simple-path enumeration hit the configured cap.
    pub truncated: bool,
}

/// Last node of `a` that also lies on `b`.
fn last_shared(a: &[NodeId], b: &HashSet<NodeId>) -> Option<NodeId> {
    a.iter().rev().copied().find(|n| b.contains(n))
}

/// Promote labeled nodes where conduction paths diverge to `Dummy` branch nodes.
///
/// Per component, all simple paths from the smallest branch node to every
/// other branch node are enumerated. Two paths start out together and the
/// last node they share is where they split; every such split point that
/// currently carries a branch label becomes a junction.
pub fn synthesize_dummies(
    graph: &mut Graph,
    branch_nodes: &BTreeSet<NodeId>,
    max_simple_paths: Option<usize>,
) -> GraphResult<DummyReport> {
    let mut report = DummyReport::default();
    let mut next_dummy = graph
        .nodes()
        .filter(|n| matches!(n.device, Some(DeviceAnnotation::Dummy { .. })))
        .count();

    let mut splits: BTreeSet<NodeId> = BTreeSet::new();
    for component in graph.components() {
        let members: Vec<NodeId> = component
            .into_iter()
            .filter(|n| branch_nodes.contains(n))
            .collect();
        let Some((&s0, targets)) = members.split_first() else {
            continue;
        };

        let mut paths = Vec::new();
        for &t in targets {
            let found = all_simple_paths(graph, s0, t, max_simple_paths);
            if found.truncated {
                warn!(source = %s0, target = %t, "simple path enumeration truncated");
                report.truncated = true;
            }
            paths.extend(found.paths);
        }

        let sets: Vec<HashSet<NodeId>> = paths
            .iter()
            .map(|p| p.iter().copied().collect())
            .collect();
        for (i, a) in paths.iter().enumerate() {
            for (j, b) in sets.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(n) = last_shared(a, b) {
                    splits.insert(n);
                }
            }
        }
    }

    for n in splits {
        let node = graph.node_or_err(n)?;
        if node.branch.is_none() {
            continue;
        }
        let dummy = DeviceAnnotation::Dummy {
            name: format!("D{next_dummy}"),
            position: node.position,
        };
        next_dummy += 1;
        graph.set_device(n, dummy, Style::dummy())?;
        report.dummies.push(n);
    }

    debug!(dummies = report.dummies.len(), "synthesized junctions");
    Ok(report)
}
