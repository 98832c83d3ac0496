//! Branch/master/terminal node classification.

use std::collections::BTreeSet;

use nx_core::NodeId;

use crate::device::DeviceAnnotation;
use crate::graph::Graph;

/// Node sets derived from one graph snapshot.
///
/// Never cached: recompute after any topology or annotation change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Nodes that demarcate independent conducting branches.
    pub branch_nodes: BTreeSet<NodeId>,
    /// Branch nodes minus pass-through devices that only continue a series link.
    pub master_nodes: BTreeSet<NodeId>,
    /// Terminal ports.
    pub terminal_nodes: BTreeSet<NodeId>,
}

pub fn classify(graph: &Graph) -> Classification {
    let mut out = Classification::default();

    for node in graph.nodes() {
        let Some(device) = &node.device else {
            continue;
        };

        if device.is_branch() {
            out.branch_nodes.insert(node.id);
        }

        let master = match device {
            DeviceAnnotation::DeviceInstance { two_terminal, .. } => {
                !two_terminal || graph.degree(node.id) > 2
            }
            DeviceAnnotation::Port { .. }
            | DeviceAnnotation::ContactPort { .. }
            | DeviceAnnotation::BranchPort { .. }
            | DeviceAnnotation::Dummy { .. } => true,
            DeviceAnnotation::EdgeConnector { .. } => false,
        };
        if master {
            out.master_nodes.insert(node.id);
        }

        if device.is_terminal() {
            out.terminal_nodes.insert(node.id);
        }
    }

    out
}
