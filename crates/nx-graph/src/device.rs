//! Device and branch annotations carried by graph nodes.

use std::fmt;

use nx_core::{Coord, NodeId, PassId};

use crate::error::{GraphError, GraphResult};

/// What a layout element contributes to the node it coincides with.
///
/// This is a closed set: every classification site matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceAnnotation {
    /// Reference to a nested sub-circuit (cell instance).
    DeviceInstance {
        name: String,
        /// Name of the referenced cell; used as the branch descriptor.
        reference: String,
        /// Pass-through element (e.g. a via) that only splits a branch
        /// when it has more than two connections.
        two_terminal: bool,
    },
    Port {
        name: String,
        /// Terminal ports are the i/o ports of a component.
        terminal: bool,
    },
    ContactPort {
        name: String,
    },
    BranchPort {
        name: String,
    },
    /// Synthetic junction found from mesh topology.
    Dummy {
        name: String,
        position: Coord,
    },
    /// Connector between mesh regions; may only sit inside a path.
    EdgeConnector {
        name: String,
    },
}

impl DeviceAnnotation {
    pub fn name(&self) -> &str {
        match self {
            DeviceAnnotation::DeviceInstance { name, .. }
            | DeviceAnnotation::Port { name, .. }
            | DeviceAnnotation::ContactPort { name }
            | DeviceAnnotation::BranchPort { name }
            | DeviceAnnotation::Dummy { name, .. }
            | DeviceAnnotation::EdgeConnector { name } => name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DeviceAnnotation::DeviceInstance { .. } => "device_instance",
            DeviceAnnotation::Port { .. } => "port",
            DeviceAnnotation::ContactPort { .. } => "contact_port",
            DeviceAnnotation::BranchPort { .. } => "branch_port",
            DeviceAnnotation::Dummy { .. } => "dummy",
            DeviceAnnotation::EdgeConnector { .. } => "edge_connector",
        }
    }

    /// Whether a node with this annotation demarcates a branch.
    ///
    /// A branch node is also exactly what a conduction path may not cross.
    pub fn is_branch(&self) -> bool {
        match self {
            DeviceAnnotation::DeviceInstance { .. }
            | DeviceAnnotation::Port { .. }
            | DeviceAnnotation::ContactPort { .. }
            | DeviceAnnotation::BranchPort { .. }
            | DeviceAnnotation::Dummy { .. } => true,
            DeviceAnnotation::EdgeConnector { .. } => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DeviceAnnotation::Port { terminal: true, .. })
    }

    /// Descriptor used in branch metadata when this node is a path endpoint.
    pub fn descriptor(&self, node: NodeId) -> GraphResult<Descriptor> {
        match self {
            DeviceAnnotation::DeviceInstance { reference, .. } => {
                Ok(Descriptor::Reference(reference.clone()))
            }
            DeviceAnnotation::Port { name, .. }
            | DeviceAnnotation::ContactPort { name }
            | DeviceAnnotation::BranchPort { name }
            | DeviceAnnotation::Dummy { name, .. } => Ok(Descriptor::Port(name.clone())),
            DeviceAnnotation::EdgeConnector { name } => Err(GraphError::Classification {
                node,
                what: format!("edge connector '{name}' cannot terminate a branch"),
            }),
        }
    }
}

impl fmt::Display for DeviceAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceAnnotation::DeviceInstance {
                name, reference, ..
            } => write!(f, "DeviceInstance {name} ({reference})"),
            DeviceAnnotation::Port { name, terminal } => {
                if *terminal {
                    write!(f, "Terminal {name}")
                } else {
                    write!(f, "Port {name}")
                }
            }
            DeviceAnnotation::ContactPort { name } => write!(f, "ContactPort {name}"),
            DeviceAnnotation::BranchPort { name } => write!(f, "BranchPort {name}"),
            DeviceAnnotation::Dummy { name, .. } => write!(f, "Dummy {name}"),
            DeviceAnnotation::EdgeConnector { name } => write!(f, "EdgeConnector {name}"),
        }
    }
}

/// Names a branch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Descriptor {
    /// Name of the referenced sub-circuit.
    Reference(String),
    /// Name of a port-like endpoint.
    Port(String),
    /// Derivation failed; the endpoint node carries a warning.
    Unresolved,
}

impl Descriptor {
    pub fn as_str(&self) -> &str {
        match self {
            Descriptor::Reference(s) | Descriptor::Port(s) => s,
            Descriptor::Unresolved => "?",
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one accepted branch within a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchMetadata {
    /// 0-based index of the path within its pass.
    pub index: usize,
    pub source: Descriptor,
    pub target: Descriptor,
    pub source_node: NodeId,
    pub target_node: NodeId,
}

impl fmt::Display for BranchMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch {}: {} -> {}", self.index, self.source, self.target)
    }
}

/// Label placed on the interior nodes of an accepted path.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchAnnotation {
    pub pass: PassId,
    pub metadata: BranchMetadata,
    pub position: Coord,
}
