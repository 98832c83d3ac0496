//! Core graph data structures.

use std::collections::{BTreeMap, BTreeSet};

use nx_core::{Coord, NodeId};
use petgraph::unionfind::UnionFind;

use crate::device::{BranchAnnotation, DeviceAnnotation};
use crate::error::{GraphError, GraphResult};

/// Display class of a node. Carried through to the visualization layer only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub class: String,
    pub color: String,
}

impl Style {
    pub fn new(class: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            color: color.into(),
        }
    }

    /// Plain conductor triangles.
    pub fn metal() -> Self {
        Self::new("metal", "#1e90ff")
    }

    /// Synthesized junctions.
    pub fn dummy() -> Self {
        Self::new("dummy", "#8fbc8f")
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::metal()
    }
}

/// A node of the mesh/topology graph.
///
/// Mesh nodes start with neither annotation. `device` is set by the
/// annotator or dummy synthesis; `branch` by the labeler. A node with a
/// branch-demarcating device never carries a branch annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Coord,
    /// Point indices of the source mesh cell (empty for hand-built nodes).
    pub cell: Vec<usize>,
    /// Physical group id of the source cell.
    pub physical: Option<i64>,
    /// Physical group name resolved through the mesh field data.
    pub surface: Option<String>,
    pub device: Option<DeviceAnnotation>,
    pub branch: Option<BranchAnnotation>,
    pub style: Style,
    /// Diagnostics raised against this node during extraction.
    pub warnings: Vec<String>,
}

impl Node {
    pub fn new(id: NodeId, position: Coord) -> Self {
        Self {
            id,
            position,
            cell: Vec::new(),
            physical: None,
            surface: None,
            device: None,
            branch: None,
            style: Style::default(),
            warnings: Vec::new(),
        }
    }

    /// Carries a device annotation that demarcates a branch.
    pub fn is_branch_device(&self) -> bool {
        self.device.as_ref().is_some_and(DeviceAnnotation::is_branch)
    }

    /// Human-readable label: device first, then branch metadata.
    pub fn label(&self) -> String {
        if let Some(device) = &self.device {
            if device.is_branch() || self.branch.is_none() {
                return device.to_string();
            }
        }
        match &self.branch {
            Some(branch) => branch.metadata.to_string(),
            None => "mesh".to_string(),
        }
    }
}

/// Simple undirected graph stored as an arena of node slots.
///
/// Slot `i` holds the node whose id has index `i`; removed nodes leave
/// an empty slot so ids are never reused. Adjacency sets are ordered, which
/// makes every neighbour walk canonical.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    slots: Vec<Option<Node>>,
    adjacency: Vec<BTreeSet<NodeId>>,
    /// Keyed by `(min, max)` endpoint.
    edge_labels: BTreeMap<(NodeId, NodeId), String>,
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b { (a, b) } else { (b, a) }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            edge_labels: BTreeMap::new(),
        }
    }

    /// Add a plain node and return its ID.
    ///
    /// Fails once the arena holds as many slots as the id range allows.
    pub fn add_node(&mut self, position: Coord) -> GraphResult<NodeId> {
        let id = NodeId::try_from_slot(self.slots.len())?;
        self.slots.push(Some(Node::new(id, position)));
        self.adjacency.push(BTreeSet::new());
        Ok(id)
    }

    /// Connect two nodes. Returns `false` when the edge already existed.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> GraphResult<bool> {
        if a == b {
            return Err(GraphError::SelfLoop { node: a });
        }
        for n in [a, b] {
            if !self.contains(n) {
                return Err(GraphError::InvalidNodeRef { node: n });
            }
        }
        let inserted = self.adjacency[a.slot()].insert(b);
        self.adjacency[b.slot()].insert(a);
        Ok(inserted)
    }

    /// Delete a node together with its incident edges.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.slot())?.take()?;
        let neighbors = std::mem::take(&mut self.adjacency[id.slot()]);
        for n in neighbors {
            self.adjacency[n.slot()].remove(&id);
            self.edge_labels.remove(&edge_key(id, n));
        }
        Some(node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.slot()), Some(Some(_)))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.slot())?.as_ref()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.slot())?.as_mut()
    }

    pub(crate) fn node_or_err(&self, id: NodeId) -> GraphResult<&Node> {
        self.node(id).ok_or(GraphError::InvalidNodeRef { node: id })
    }

    pub(crate) fn node_mut_or_err(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.node_mut(id).ok_or(GraphError::InvalidNodeRef { node: id })
    }

    /// Live nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().flatten()
    }

    /// Live node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        self.nodes().map(|n| n.id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Total number of ids ever handed out (live or removed).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Neighbours in ascending id order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> {
        self.adjacency.get(id.slot()).into_iter().flatten().copied()
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.adjacency.get(id.slot()).map_or(0, BTreeSet::len)
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(a.slot())
            .is_some_and(|adj| adj.contains(&b))
    }

    /// Edges as `(low, high)` pairs in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> {
        self.node_ids().flat_map(move |a| {
            self.neighbors(a)
                .filter(move |&b| a < b)
                .map(move |b| (a, b))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn set_edge_label(
        &mut self,
        a: NodeId,
        b: NodeId,
        label: impl Into<String>,
    ) -> GraphResult<()> {
        if !self.has_edge(a, b) {
            return Err(GraphError::Validation {
                what: format!("no edge between {a} and {b} to label"),
            });
        }
        self.edge_labels.insert(edge_key(a, b), label.into());
        Ok(())
    }

    pub fn edge_label(&self, a: NodeId, b: NodeId) -> Option<&str> {
        self.edge_labels.get(&edge_key(a, b)).map(String::as_str)
    }

    /// Attach or replace a node's device annotation and style.
    pub fn set_device(
        &mut self,
        id: NodeId,
        device: DeviceAnnotation,
        style: Style,
    ) -> GraphResult<()> {
        let node = self.node_mut_or_err(id)?;
        if device.is_branch() {
            node.branch = None;
        }
        node.device = Some(device);
        node.style = style;
        Ok(())
    }

    /// Attach a branch label, replacing any earlier one.
    pub fn set_branch(&mut self, id: NodeId, branch: BranchAnnotation) -> GraphResult<()> {
        let node = self.node_mut_or_err(id)?;
        if node.is_branch_device() {
            return Err(GraphError::Classification {
                node: id,
                what: "branch label on a branch-demarcating device".to_string(),
            });
        }
        node.branch = Some(branch);
        Ok(())
    }

    /// Connected components, each sorted ascending, ordered by smallest id.
    pub fn components(&self) -> Vec<Vec<NodeId>> {
        let mut sets = UnionFind::<usize>::new(self.slots.len());
        for (a, b) in self.edges() {
            sets.union(a.slot(), b.slot());
        }

        let mut by_root: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for id in self.node_ids() {
            by_root.entry(sets.find(id.slot())).or_default().push(id);
        }

        let mut components: Vec<Vec<NodeId>> = by_root.into_values().collect();
        components.sort_by_key(|c| c[0]);
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> (Graph, Vec<NodeId>) {
        let mut g = Graph::new();
        let ids: Vec<_> = (0..n)
            .map(|i| g.add_node(Coord::new(i as f64, 0.0)).unwrap())
            .collect();
        for w in ids.windows(2) {
            g.add_edge(w[0], w[1]).unwrap();
        }
        (g, ids)
    }

    #[test]
    fn ids_follow_slot_order() {
        let (g, ids) = chain(3);
        let slots: Vec<usize> = ids.iter().map(|id| id.slot()).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(g.node_ids().count(), 3);
    }

    #[test]
    fn slot_overflow_is_a_core_error() {
        let err: GraphError = NodeId::try_from_slot(u32::MAX as usize).unwrap_err().into();
        assert!(matches!(
            err,
            GraphError::Core(nx_core::NxError::IdOverflow { .. })
        ));
    }

    #[test]
    fn graph_stays_simple() {
        let (mut g, ids) = chain(3);
        assert!(!g.add_edge(ids[1], ids[0]).unwrap());
        assert_eq!(g.edge_count(), 2);
        assert!(matches!(
            g.add_edge(ids[2], ids[2]),
            Err(GraphError::SelfLoop { .. })
        ));
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(ids[0], ids[1]), (ids[1], ids[2])]);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let (mut g, ids) = chain(3);
        g.set_edge_label(ids[0], ids[1], "b").unwrap();
        let removed = g.remove_node(ids[1]).unwrap();
        assert_eq!(removed.id, ids[1]);
        assert_eq!(g.edge_count(), 0);
        assert!(g.edge_label(ids[0], ids[1]).is_none());
        assert!(matches!(
            g.add_edge(ids[0], ids[1]),
            Err(GraphError::InvalidNodeRef { .. })
        ));

        let fresh = g.add_node(Coord::default()).unwrap();
        assert_eq!(fresh.index(), 3);
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn components_are_canonical() {
        let mut g = Graph::new();
        let a = g.add_node(Coord::default()).unwrap();
        let b = g.add_node(Coord::default()).unwrap();
        let c = g.add_node(Coord::default()).unwrap();
        let d = g.add_node(Coord::default()).unwrap();
        g.add_edge(d, b).unwrap();
        g.add_edge(a, c).unwrap();

        assert_eq!(g.components(), vec![vec![a, c], vec![b, d]]);
    }

    #[test]
    fn neighbors_ascend() {
        let mut g = Graph::new();
        let hub = g.add_node(Coord::default()).unwrap();
        let spokes: Vec<_> = (0..4)
            .map(|_| g.add_node(Coord::default()).unwrap())
            .collect();
        for &s in spokes.iter().rev() {
            g.add_edge(hub, s).unwrap();
        }
        assert_eq!(g.neighbors(hub).collect::<Vec<_>>(), spokes);
        assert_eq!(g.degree(hub), 4);
    }

    #[test]
    fn labels_prefer_devices() {
        let mut g = Graph::new();
        let n = g.add_node(Coord::default()).unwrap();
        assert_eq!(g.node(n).unwrap().label(), "mesh");
        g.set_device(
            n,
            DeviceAnnotation::Port {
                name: "P1".into(),
                terminal: false,
            },
            Style::new("port", "#ff0000"),
        )
        .unwrap();
        assert_eq!(g.node(n).unwrap().label(), "Port P1");
        assert_eq!(g.node(n).unwrap().style.class, "port");
    }
}
