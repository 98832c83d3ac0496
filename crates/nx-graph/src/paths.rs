//! Path search over the mesh graph.
//!
//! Both searches walk neighbours in ascending id order, so results depend
//! only on graph contents, never on insertion history.

use std::collections::VecDeque;

use nx_core::NodeId;

use crate::graph::Graph;

/// Breadth-first shortest path from `s` to `t`, endpoints included.
///
/// Among equally short paths the one discovered first wins.
pub fn shortest_path(graph: &Graph, s: NodeId, t: NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains(s) || !graph.contains(t) {
        return None;
    }
    if s == t {
        return Some(vec![s]);
    }

    let mut parent: Vec<Option<NodeId>> = vec![None; graph.capacity()];
    let mut visited = vec![false; graph.capacity()];
    visited[s.slot()] = true;
    let mut queue = VecDeque::from([s]);

    while let Some(n) = queue.pop_front() {
        for m in graph.neighbors(n) {
            if visited[m.slot()] {
                continue;
            }
            visited[m.slot()] = true;
            parent[m.slot()] = Some(n);
            if m == t {
                let mut path = vec![t];
                let mut cur = t;
                while let Some(p) = parent[cur.slot()] {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(m);
        }
    }
    None
}

/// Result of a simple-path enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplePaths {
    pub paths: Vec<Vec<NodeId>>,
    /// Enumeration stopped at the caller's limit.
    pub truncated: bool,
}

/// Every simple path from `s` to `t`, in depth-first order.
///
/// The count of simple paths grows exponentially with the number of cycles;
/// `limit` caps how many are collected.
pub fn all_simple_paths(
    graph: &Graph,
    s: NodeId,
    t: NodeId,
    limit: Option<usize>,
) -> SimplePaths {
    let mut out = SimplePaths::default();
    if s == t || !graph.contains(s) || !graph.contains(t) {
        return out;
    }

    let mut on_path = vec![false; graph.capacity()];
    on_path[s.slot()] = true;
    let mut path = vec![s];
    let mut stack = vec![graph.neighbors(s).collect::<Vec<_>>().into_iter()];

    while let Some(frontier) = stack.last_mut() {
        match frontier.next() {
            Some(n) if n == t => {
                let mut found = path.clone();
                found.push(t);
                out.paths.push(found);
                if limit.is_some_and(|l| out.paths.len() >= l) {
                    out.truncated = true;
                    break;
                }
            }
            Some(n) => {
                if !on_path[n.slot()] {
                    on_path[n.slot()] = true;
                    path.push(n);
                    stack.push(graph.neighbors(n).collect::<Vec<_>>().into_iter());
                }
            }
            None => {
                stack.pop();
                if let Some(n) = path.pop() {
                    on_path[n.slot()] = false;
                }
            }
        }
    }
    out
}
