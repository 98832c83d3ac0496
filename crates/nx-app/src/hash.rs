//! Content-based digests of extracted topologies.

use nx_graph::TopologyView;
use sha2::{Digest, Sha256};

/// Hex sha256 of the view's compact JSON form.
pub fn topology_digest(view: &TopologyView) -> String {
    let mut hasher = Sha256::new();

    let view_json = serde_json::to_string(view).unwrap_or_default();
    hasher.update(view_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nx_core::Coord;
    use nx_graph::Graph;

    fn view(n: usize) -> TopologyView {
        let mut g = Graph::new();
        let ids: Vec<_> = (0..n)
            .map(|i| g.add_node(Coord::new(i as f64, 0.0)).unwrap())
            .collect();
        for w in ids.windows(2) {
            g.add_edge(w[0], w[1]).unwrap();
        }
        TopologyView::from_graph(&g)
    }

    #[test]
    fn digest_stability() {
        assert_eq!(topology_digest(&view(3)), topology_digest(&view(3)));
        assert_eq!(topology_digest(&view(3)).len(), 64);
    }

    #[test]
    fn digest_differs_for_different_topologies() {
        assert_ne!(topology_digest(&view(3)), topology_digest(&view(4)));
    }
}
