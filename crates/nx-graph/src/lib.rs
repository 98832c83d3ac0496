//! nx-graph: mesh graph and topology extraction for netex.
//!
//! Provides:
//! - Mesh to graph construction (one node per cell, edges on shared facets)
//! - Device annotation by spatial coincidence
//! - Branch classification, labeling, junction synthesis and pruning
//! - Validation and renderer-facing views
//!
//! # Example
//!
//! ```
//! use nx_core::{Coord, PassId};
//! use nx_graph::{DeviceAnnotation, Graph, Style, TopologyExtractor};
//!
//! let mut g = Graph::new();
//! let ids: Vec<_> = (0..4)
//!     .map(|i| g.add_node(Coord::new(i as f64, 0.0)).unwrap())
//!     .collect();
//! for w in ids.windows(2) {
//!     g.add_edge(w[0], w[1]).unwrap();
//! }
//! for (id, name) in [(ids[0], "P1"), (ids[3], "P2")] {
//!     let port = DeviceAnnotation::Port { name: name.into(), terminal: false };
//!     g.set_device(id, port, Style::default()).unwrap();
//! }
//!
//! let report = TopologyExtractor::default().run(&mut g, PassId::FIRST).unwrap();
//! assert_eq!(report.accepted.len(), 1);
//! assert_eq!(g.node_count(), 4);
//! ```

pub mod annotate;
pub mod builder;
pub mod classify;
pub mod device;
pub mod dummy;
pub mod error;
pub mod export;
pub mod graph;
pub mod label;
pub mod mesh;
pub mod paths;
pub mod pipeline;
pub mod prune;
pub mod validate;

// Re-exports for ergonomics
pub use annotate::{
    AnnotationReport, Coincidence, DeviceAnnotator, Element, Footprint, FootprintCoincidence,
};
pub use builder::MeshGraphBuilder;
pub use classify::{Classification, classify};
pub use device::{BranchAnnotation, BranchMetadata, Descriptor, DeviceAnnotation};
pub use dummy::{DummyReport, synthesize_dummies};
pub use error::{GraphError, GraphResult, MeshDataError};
pub use export::{BranchView, EdgeView, NodeView, StyleView, TopologyView};
pub use graph::{Graph, Node, Style};
pub use label::{AcceptedPath, LabelReport, label_branches};
pub use mesh::{CellKind, FieldEntry, LayerKey, MeshData};
pub use paths::{SimplePaths, all_simple_paths, shortest_path};
pub use pipeline::{ExtractionConfig, ExtractionReport, PassSummary, TopologyExtractor};
pub use prune::{PruneReport, prune};
pub use validate::{validate_coverage, validate_structure, validate_topology};
