//! Mesh-to-graph construction.

use std::collections::BTreeMap;

use nx_core::{Coord, NxError, Real, ensure_finite};
use tracing::debug;

use crate::error::{GraphResult, MeshDataError};
use crate::graph::Graph;
use crate::mesh::{CellKind, MeshData};

/// Builds the adjacency graph of a mesh: one node per cell of the chosen
/// kind, edges between cells that share a facet.
///
/// Triangle facets are their three edges (unordered point pairs); line
/// facets are their two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshGraphBuilder {
    kind: CellKind,
    unit_scale: Real,
}

impl Default for MeshGraphBuilder {
    fn default() -> Self {
        Self {
            kind: CellKind::Triangle,
            unit_scale: 1.0,
        }
    }
}

impl MeshGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: CellKind) -> Self {
        self.kind = kind;
        self
    }

    /// Factor applied to cell centroids (e.g. grids per unit).
    pub fn with_unit_scale(mut self, unit_scale: Real) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Build the graph. Fails before creating any node if the mesh is incomplete.
    pub fn build(&self, mesh: &MeshData) -> GraphResult<Graph> {
        let kind = self.kind;
        ensure_finite(self.unit_scale, "unit scale").map_err(MeshDataError::from)?;
        if self.unit_scale <= 0.0 {
            return Err(MeshDataError::from(NxError::InvalidArg {
                what: "unit scale must be positive",
            })
            .into());
        }
        if mesh.field_data.is_empty() {
            return Err(MeshDataError::MissingFieldData.into());
        }
        let cells = mesh.cells(kind)?;
        let physical = mesh.physical(kind)?;
        Self::check_cells(kind, cells, mesh.points.len())?;

        let mut graph = Graph::with_capacity(cells.len());
        let mut ids = Vec::with_capacity(cells.len());
        for (cell, vertices) in cells.iter().enumerate() {
            let corners: Vec<Coord> = vertices.iter().map(|&v| mesh.points[v]).collect();
            let position = Coord::centroid(&corners)
                .unwrap_or_default()
                .scale(self.unit_scale)
                .finite("cell centroid")
                .map_err(MeshDataError::from)?;

            let id = graph.add_node(position)?;
            ids.push(id);
            let node = graph.node_mut_or_err(id)?;
            node.cell = vertices.clone();
            node.physical = Some(physical[cell]);
            node.surface = mesh.group_name(kind, physical[cell]).map(str::to_string);
        }

        for (a, b) in Self::facet_adjacency(kind, cells) {
            graph.add_edge(ids[a], ids[b])?;
        }

        debug!(
            kind = %kind,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built mesh graph"
        );
        Ok(graph)
    }

    fn check_cells(kind: CellKind, cells: &[Vec<usize>], points: usize) -> GraphResult<()> {
        for (cell, vertices) in cells.iter().enumerate() {
            if vertices.len() != kind.arity() {
                return Err(MeshDataError::CellArity {
                    kind,
                    cell,
                    expected: kind.arity(),
                    found: vertices.len(),
                }
                .into());
            }
            if let Some(&index) = vertices.iter().find(|&&v| v >= points) {
                return Err(MeshDataError::PointOutOfRange {
                    kind,
                    cell,
                    index,
                    len: points,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Pairs of cells sharing at least one facet, `(earlier, later)`.
    fn facet_adjacency(kind: CellKind, cells: &[Vec<usize>]) -> Vec<(usize, usize)> {
        let mut owners: BTreeMap<Vec<usize>, Vec<usize>> = BTreeMap::new();
        let mut pairs = Vec::new();

        for (cell, vertices) in cells.iter().enumerate() {
            for facet in Self::facets(kind, vertices) {
                let seen = owners.entry(facet).or_default();
                if seen.contains(&cell) {
                    continue;
                }
                pairs.extend(seen.iter().map(|&earlier| (earlier, cell)));
                seen.push(cell);
            }
        }
        pairs
    }

    fn facets(kind: CellKind, v: &[usize]) -> Vec<Vec<usize>> {
        match kind {
            CellKind::Line => vec![vec![v[0]], vec![v[1]]],
            CellKind::Triangle => [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])]
                .into_iter()
                .map(|(a, b)| if a < b { vec![a, b] } else { vec![b, a] })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FieldEntry;
    use nx_core::NodeId;

    fn node_id(i: u32) -> NodeId {
        NodeId::from_index(i).unwrap()
    }

    /// Four triangles in a strip: 0-1-2-3 share consecutive edges.
    fn strip() -> MeshData {
        let mut mesh = MeshData {
            points: (0..6)
                .map(|i| Coord::new((i / 2) as f64, (i % 2) as f64))
                .collect(),
            ..Default::default()
        };
        mesh.cells.insert(
            CellKind::Triangle,
            vec![vec![0, 1, 2], vec![1, 3, 2], vec![2, 3, 4], vec![3, 5, 4]],
        );
        mesh.physical.insert(CellKind::Triangle, vec![1; 4]);
        mesh.field_data
            .insert("M6".into(), FieldEntry { id: 1, dim: 2 });
        mesh
    }

    #[test]
    fn strip_becomes_chain() {
        let graph = MeshGraphBuilder::new().build(&strip()).unwrap();
        let edges: Vec<_> = graph
            .edges()
            .map(|(a, b)| (a.index(), b.index()))
            .collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3)]);
        let n0 = graph.node(node_id(0)).unwrap();
        assert_eq!(n0.surface.as_deref(), Some("M6"));
        assert_eq!(n0.cell, vec![0, 1, 2]);
    }

    #[test]
    fn centroids_are_scaled() {
        let graph = MeshGraphBuilder::new()
            .with_unit_scale(3.0)
            .build(&strip())
            .unwrap();
        let n0 = graph.node(node_id(0)).unwrap();
        // Centroid of (0,0), (0,1), (1,0) is (1/3, 1/3).
        assert!((n0.position.x - 1.0).abs() < 1e-12);
        assert!((n0.position.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_positive_scale_fails() {
        let err = MeshGraphBuilder::new()
            .with_unit_scale(0.0)
            .build(&strip())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::GraphError::MeshData(MeshDataError::Numeric(NxError::InvalidArg { .. }))
        ));
    }

    #[test]
    fn lines_join_at_shared_points() {
        let mut mesh = strip();
        mesh.cells.insert(CellKind::Line, vec![vec![0, 1], vec![1, 2], vec![1, 3]]);
        mesh.physical.insert(CellKind::Line, vec![2, 2, 2]);
        let graph = MeshGraphBuilder::new()
            .with_kind(CellKind::Line)
            .build(&mesh)
            .unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn missing_cells_fail() {
        let err = MeshGraphBuilder::new()
            .with_kind(CellKind::Line)
            .build(&strip())
            .unwrap_err();
        assert_eq!(
            err,
            crate::GraphError::MeshData(MeshDataError::MissingCells {
                kind: CellKind::Line
            })
        );
    }

    #[test]
    fn missing_physical_and_field_data_fail() {
        let mut mesh = strip();
        mesh.physical.clear();
        assert!(matches!(
            MeshGraphBuilder::new().build(&mesh),
            Err(crate::GraphError::MeshData(MeshDataError::MissingPhysical { .. }))
        ));

        let mut mesh = strip();
        mesh.field_data.clear();
        assert!(matches!(
            MeshGraphBuilder::new().build(&mesh),
            Err(crate::GraphError::MeshData(MeshDataError::MissingFieldData))
        ));
    }

    #[test]
    fn bad_point_index_fails() {
        let mut mesh = strip();
        mesh.cells.insert(
            CellKind::Triangle,
            vec![vec![0, 1, 9], vec![1, 3, 2], vec![2, 3, 4], vec![3, 5, 4]],
        );
        assert!(matches!(
            MeshGraphBuilder::new().build(&mesh),
            Err(crate::GraphError::MeshData(MeshDataError::PointOutOfRange { index: 9, .. }))
        ));
    }

    #[test]
    fn degenerate_triangle_has_no_self_loop() {
        let mut mesh = strip();
        mesh.cells.insert(CellKind::Triangle, vec![vec![0, 1, 1]]);
        mesh.physical.insert(CellKind::Triangle, vec![1]);
        let graph = MeshGraphBuilder::new().build(&mesh).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }
}
