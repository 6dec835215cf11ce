use tracing::debug;

use super::queue::IndexedPriorityQueue;
use crate::{
    error::Error,
    kbn_summation,
    map::{Link, PointSet, ROOT},
};

/// A spanning tree rooted at [`ROOT`], in the forward direction.
///
/// The parent of each point is stored in the point set's links.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    /// Children of each point in the order Prim's algorithm reached them
    pub children: Vec<Vec<usize>>,
    pub weight: f64,
}

impl SpanningTree {
    pub fn edge_count(&self) -> usize {
        self.children.iter().map(Vec::len).sum()
    }
}

/// Compute the MST of a complete graph over the point set with Prim's algorithm in O(V^2 log(V)) time.
///
/// Decrease-key doubles as edge discovery: every point starts at an infinite
/// distance from the tree, so the first time a point is reached counts as a decrease,
/// and every successful decrease makes the extracted point the new parent.
///
/// <https://en.wikipedia.org/wiki/Prim%27s_algorithm>
pub fn compute_mst<M: PointSet + ?Sized>(map: &mut M) -> Result<SpanningTree, Error> {
    let count = map.count();
    if count == 0 {
        return Err(Error::Unsupported("cannot span an empty point set"));
    }

    let mut queue = IndexedPriorityQueue::with_capacity(count);
    for point in 0..count {
        queue.insert(point, if point == ROOT { 0. } else { f64::INFINITY })?;
    }
    map.set_link(ROOT, Link::Parent(ROOT));

    let mut in_mst = vec![false; count];
    let mut children = vec![vec![]; count];
    while !queue.is_empty() {
        let u = queue.extract_min()?;
        in_mst[u] = true;
        if u != ROOT {
            // An infinite key means no finite edge ever reached this point
            if queue.priority(u).map_or(true, f64::is_infinite) {
                return Err(Error::Disconnected(u));
            }
            children[map.link(u).target()].push(u);
        }

        for v in 0..count {
            if in_mst[v] {
                continue;
            }
            if queue.decrease_key(v, map.distance(u, v)) {
                map.set_link(v, Link::Parent(u));
            }
        }
    }

    kbn_summation! {
        for point in (0..count).filter(|point| *point != ROOT) => {
            weight += map.distance(point, map.link(point).target());
        }
    }
    debug!("Spanning tree of {} points has weight {}", count, weight);

    Ok(SpanningTree { children, weight })
}
