//! Renderer-facing views of a graph.
//!
//! Every node exposes a position, a human-readable label and a style; the
//! views are plain data sorted by id so serializing one is reproducible.

use std::fmt;

use nx_core::Coord;
use petgraph::dot::Dot;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::graph::{Graph, Node};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleView {
    pub class: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchView {
    pub pass: u32,
    pub index: usize,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: u32,
    pub position: Coord,
    pub label: String,
    /// Device variant name, `"branch"` for labeled nodes, else `"mesh"`.
    pub kind: &'static str,
    pub style: StyleView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl NodeView {
    fn from_node(node: &Node) -> Self {
        let kind = match (&node.device, &node.branch) {
            (Some(device), _) if device.is_branch() => device.kind_name(),
            (_, Some(_)) => "branch",
            (Some(device), None) => device.kind_name(),
            (None, None) => "mesh",
        };
        Self {
            id: node.id.index(),
            position: node.position,
            label: node.label(),
            kind,
            style: StyleView {
                class: node.style.class.clone(),
                color: node.style.color.clone(),
            },
            branch: node.branch.as_ref().map(|b| BranchView {
                pass: b.pass.get(),
                index: b.metadata.index,
                source: b.metadata.source.to_string(),
                target: b.metadata.target.to_string(),
            }),
            warnings: node.warnings.clone(),
        }
    }
}

impl fmt::Display for NodeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.id, self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub a: u32,
    pub b: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopologyView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl TopologyView {
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph.nodes().map(NodeView::from_node).collect();
        let edges = graph
            .edges()
            .map(|(a, b)| EdgeView {
                a: a.index(),
                b: b.index(),
                label: graph.edge_label(a, b).map(str::to_string),
            })
            .collect();
        Self { nodes, edges }
    }

    /// Compact petgraph copy for downstream analysis; edge weights are labels.
    pub fn to_petgraph(&self) -> UnGraph<NodeView, String> {
        let mut g = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let index: std::collections::HashMap<u32, NodeIndex> = self
            .nodes
            .iter()
            .map(|n| (n.id, g.add_node(n.clone())))
            .collect();
        for e in &self.edges {
            if let (Some(&a), Some(&b)) = (index.get(&e.a), index.get(&e.b)) {
                g.add_edge(a, b, e.label.clone().unwrap_or_default());
            }
        }
        g
    }

    /// Graphviz rendering.
    pub fn to_dot(&self) -> String {
        let g = self.to_petgraph();
        format!("{}", Dot::with_config(&g, &[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceAnnotation;
    use crate::graph::Style;

    fn sample() -> Graph {
        let mut g = Graph::new();
        let a = g.add_node(Coord::new(0.0, 0.0)).unwrap();
        let b = g.add_node(Coord::new(1.0, 0.0)).unwrap();
        g.add_edge(a, b).unwrap();
        g.set_edge_label(a, b, "P1:0").unwrap();
        g.set_device(
            a,
            DeviceAnnotation::Port {
                name: "IN".into(),
                terminal: false,
            },
            Style::default(),
        )
        .unwrap();
        g
    }

    #[test]
    fn view_lists_nodes_and_edges_by_id() {
        let view = TopologyView::from_graph(&sample());
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.nodes[0].id, 0);
        assert_eq!(view.nodes[0].kind, "port");
        assert_eq!(view.nodes[1].kind, "mesh");
        assert_eq!(view.edges[0].label.as_deref(), Some("P1:0"));
    }

    #[test]
    fn dot_mentions_labels() {
        let dot = TopologyView::from_graph(&sample()).to_dot();
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("P1:0"));
        assert!(dot.contains("Port IN"));
    }

    #[test]
    fn petgraph_copy_keeps_counts() {
        let g = TopologyView::from_graph(&sample()).to_petgraph();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }
}
