//! Final reduction to the topology graph.

use nx_core::{NodeId, PassId};
use tracing::debug;

use crate::graph::Graph;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: Vec<NodeId>,
}

/// Delete every node that is neither a branch-demarcating device nor
/// labeled by `pass`. Incident edges go with the node.
pub fn prune(graph: &mut Graph, pass: PassId) -> PruneReport {
    let doomed: Vec<NodeId> = graph
        .nodes()
        .filter(|n| {
            let current = n.branch.as_ref().is_some_and(|b| b.pass == pass);
            !n.is_branch_device() && !current
        })
        .map(|n| n.id)
        .collect();

    for &id in &doomed {
        graph.remove_node(id);
    }

    debug!(pass = %pass, removed = doomed.len(), kept = graph.node_count(), "pruned graph");
    PruneReport { removed: doomed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{BranchAnnotation, BranchMetadata, Descriptor, DeviceAnnotation};
    use crate::graph::Style;
    use nx_core::Coord;

    fn labeled(pass: PassId, s: NodeId, t: NodeId) -> BranchAnnotation {
        BranchAnnotation {
            pass,
            metadata: BranchMetadata {
                index: 0,
                source: Descriptor::Port("A".into()),
                target: Descriptor::Port("B".into()),
                source_node: s,
                target_node: t,
            },
            position: Coord::default(),
        }
    }

    #[test]
    fn keeps_devices_and_current_labels() {
        let mut g = Graph::new();
        let ids: Vec<_> = (0..5)
            .map(|_| g.add_node(Coord::default()).unwrap())
            .collect();
        for w in ids.windows(2) {
            g.add_edge(w[0], w[1]).unwrap();
        }
        let p1 = PassId::FIRST;
        let p2 = p1.next();
        g.set_device(
            ids[0],
            DeviceAnnotation::Port {
                name: "A".into(),
                terminal: false,
            },
            Style::default(),
        )
        .unwrap();
        g.set_device(
            ids[4],
            DeviceAnnotation::EdgeConnector { name: "E".into() },
            Style::default(),
        )
        .unwrap();
        g.set_branch(ids[1], labeled(p2, ids[0], ids[3])).unwrap();
        g.set_branch(ids[2], labeled(p1, ids[0], ids[3])).unwrap();

        let report = prune(&mut g, p2);
        assert_eq!(report.removed, vec![ids[2], ids[3], ids[4]]);
        assert_eq!(g.node_ids().collect::<Vec<_>>(), vec![ids[0], ids[1]]);
        assert!(g.has_edge(ids[0], ids[1]));
        assert_eq!(g.edge_count(), 1);
    }
}
