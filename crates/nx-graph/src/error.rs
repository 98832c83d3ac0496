//! Graph-specific error types.

use nx_core::{NodeId, NxError};
use thiserror::Error;

use crate::mesh::CellKind;

/// Malformed or incomplete mesh input. Always fatal: raised before any node exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshDataError {
    #[error("{kind} cells not found in mesh")]
    MissingCells { kind: CellKind },

    #[error("physical group data not found for {kind} cells")]
    MissingPhysical { kind: CellKind },

    #[error("{kind} physical group count {found} does not match cell count {expected}")]
    PhysicalCountMismatch {
        kind: CellKind,
        expected: usize,
        found: usize,
    },

    #[error("mesh field data is empty")]
    MissingFieldData,

    #[error("{kind} cell {cell} has {found} vertices (expected {expected})")]
    CellArity {
        kind: CellKind,
        cell: usize,
        expected: usize,
        found: usize,
    },

    #[error("{kind} cell {cell} refers to point {index} but mesh has {len} points")]
    PointOutOfRange {
        kind: CellKind,
        cell: usize,
        index: usize,
        len: usize,
    },

    #[error("invalid mesh value: {0}")]
    Numeric(#[from] NxError),
}

/// Graph construction, classification and validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("mesh data error: {0}")]
    MeshData(#[from] MeshDataError),

    /// A device annotation cannot supply what the caller asked of it.
    #[error("node {node}: {what}")]
    Classification { node: NodeId, what: String },

    #[error("node {node} does not exist")]
    InvalidNodeRef { node: NodeId },

    #[error("edge from node {node} to itself")]
    SelfLoop { node: NodeId },

    #[error("topology invalid: {what}")]
    Validation { what: String },

    #[error(transparent)]
    Core(#[from] NxError),
}

pub type GraphResult<T> = Result<T, GraphError>;
