//! Attaching layout elements to mesh nodes.

use nx_core::geom::polygon_contains;
use nx_core::{Coord, NodeId, Real};
use rayon::prelude::*;
use tracing::debug;

use crate::device::DeviceAnnotation;
use crate::error::GraphResult;
use crate::graph::{Graph, Node, Style};

/// Geometric extent of a placed element.
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    /// Closed polygon, boundary inclusive.
    Polygon(Vec<Coord>),
    /// Disc around a point (e.g. a port midpoint).
    Point { at: Coord, radius: Real },
    /// Every mesh cell of the named physical group.
    Surface(String),
}

/// A flattened layout element: where it is, what it is, how it looks.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub footprint: Footprint,
    pub device: DeviceAnnotation,
    pub style: Style,
}

/// Decides whether a graph node falls on an element.
pub trait Coincidence: Sync {
    fn coincides(&self, node: &Node, element: &Element) -> bool;
}

impl<F> Coincidence for F
where
    F: Fn(&Node, &Element) -> bool + Sync,
{
    fn coincides(&self, node: &Node, element: &Element) -> bool {
        self(node, element)
    }
}

/// Default test: node position against the element footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintCoincidence {
    pub tolerance: Real,
}

impl Default for FootprintCoincidence {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl Coincidence for FootprintCoincidence {
    fn coincides(&self, node: &Node, element: &Element) -> bool {
        match &element.footprint {
            Footprint::Polygon(points) => polygon_contains(points, node.position, self.tolerance),
            Footprint::Point { at, radius } => {
                node.position.distance(*at) <= radius + self.tolerance
            }
            Footprint::Surface(name) => node.surface.as_deref() == Some(name.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationReport {
    /// `(node, element index)` in ascending node order.
    pub annotated: Vec<(NodeId, usize)>,
}

/// Copies device annotations and styles from elements onto coincident nodes.
///
/// Only nodes without a device annotation are considered, and the first
/// coincident element in list order wins. Topology is never touched.
#[derive(Debug, Clone, Default)]
pub struct DeviceAnnotator<C = FootprintCoincidence> {
    coincidence: C,
}

impl DeviceAnnotator<FootprintCoincidence> {
    pub fn new(tolerance: Real) -> Self {
        Self {
            coincidence: FootprintCoincidence { tolerance },
        }
    }
}

impl<C: Coincidence> DeviceAnnotator<C> {
    pub fn with_coincidence(coincidence: C) -> Self {
        Self { coincidence }
    }

    pub fn annotate(
        &self,
        graph: &mut Graph,
        elements: &[Element],
    ) -> GraphResult<AnnotationReport> {
        let plain: Vec<&Node> = graph.nodes().filter(|n| n.device.is_none()).collect();
        let annotated: Vec<(NodeId, usize)> = plain
            .par_iter()
            .filter_map(|node| {
                elements
                    .iter()
                    .position(|e| self.coincidence.coincides(node, e))
                    .map(|i| (node.id, i))
            })
            .collect();

        for &(id, i) in &annotated {
            let element = &elements[i];
            graph.set_device(id, element.device.clone(), element.style.clone())?;
        }

        debug!(
            elements = elements.len(),
            annotated = annotated.len(),
            "annotated devices"
        );
        Ok(AnnotationReport { annotated })
    }
}
