//! Mesh description consumed from the meshing step.
//!
//! Mirrors the usual point/cell/cell-data/field-data layout of mesh files:
//! cells are grouped by kind, each cell carries a physical group id, and the
//! field data maps a group name (layer/instance metadata) to that id.

use std::collections::BTreeMap;
use std::fmt;

use nx_core::Coord;

use crate::error::MeshDataError;

/// Kind of mesh cell a graph can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    Line,
    Triangle,
}

impl CellKind {
    /// Number of vertices per cell.
    pub fn arity(self) -> usize {
        match self {
            CellKind::Line => 2,
            CellKind::Triangle => 3,
        }
    }

    /// Topological dimension, as stored alongside field data.
    pub fn dim(self) -> u8 {
        match self {
            CellKind::Line => 1,
            CellKind::Triangle => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellKind::Line => "line",
            CellKind::Triangle => "triangle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "line" => Some(CellKind::Line),
            "triangle" => Some(CellKind::Triangle),
            _ => None,
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named physical group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry {
    pub id: i64,
    pub dim: u8,
}

/// Layer and datatype encoded in a group name such as `5_0_1`
/// (`layer_datatype_polygon`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerKey {
    pub layer: u32,
    pub datatype: u32,
}

impl LayerKey {
    /// Parse the leading `layer_datatype` fields of a group name.
    pub fn parse(name: &str) -> Option<Self> {
        let mut fields = name.split('_');
        let layer = fields.next()?.parse().ok()?;
        let datatype = fields.next()?.parse().ok()?;
        Some(Self { layer, datatype })
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.layer, self.datatype)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub points: Vec<Coord>,
    pub cells: BTreeMap<CellKind, Vec<Vec<usize>>>,
    /// Per-cell physical group ids, parallel to `cells`.
    pub physical: BTreeMap<CellKind, Vec<i64>>,
    pub field_data: BTreeMap<String, FieldEntry>,
}

impl MeshData {
    pub fn cells(&self, kind: CellKind) -> Result<&[Vec<usize>], MeshDataError> {
        self.cells
            .get(&kind)
            .map(Vec::as_slice)
            .ok_or(MeshDataError::MissingCells { kind })
    }

    /// Physical group ids for `kind`, checked against the cell count.
    pub fn physical(&self, kind: CellKind) -> Result<&[i64], MeshDataError> {
        let cells = self.cells(kind)?;
        let physical = self
            .physical
            .get(&kind)
            .ok_or(MeshDataError::MissingPhysical { kind })?;
        if physical.len() != cells.len() {
            return Err(MeshDataError::PhysicalCountMismatch {
                kind,
                expected: cells.len(),
                found: physical.len(),
            });
        }
        Ok(physical)
    }

    /// Name of the physical group `id` for cells of `kind`.
    pub fn group_name(&self, kind: CellKind, id: i64) -> Option<&str> {
        self.field_data
            .iter()
            .find(|(_, e)| e.id == id && e.dim == kind.dim())
            .map(|(name, _)| name.as_str())
    }

    /// Cell indices grouped by physical group name.
    pub fn physical_groups(
        &self,
        kind: CellKind,
    ) -> Result<BTreeMap<String, Vec<usize>>, MeshDataError> {
        if self.field_data.is_empty() {
            return Err(MeshDataError::MissingFieldData);
        }
        let physical = self.physical(kind)?;
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (cell, &id) in physical.iter().enumerate() {
            if let Some(name) = self.group_name(kind, id) {
                groups.entry(name.to_string()).or_default().push(cell);
            }
        }
        Ok(groups)
    }

    /// Cell indices grouped by the layer and datatype in their group name.
    ///
    /// Groups whose name does not start with `layer_datatype` are skipped.
    pub fn layer_groups(
        &self,
        kind: CellKind,
    ) -> Result<BTreeMap<LayerKey, Vec<usize>>, MeshDataError> {
        let mut layers: BTreeMap<LayerKey, Vec<usize>> = BTreeMap::new();
        for (name, cells) in self.physical_groups(kind)? {
            if let Some(key) = LayerKey::parse(&name) {
                layers.entry(key).or_default().extend(cells);
            }
        }
        for cells in layers.values_mut() {
            cells.sort_unstable();
        }
        Ok(layers)
    }
}
