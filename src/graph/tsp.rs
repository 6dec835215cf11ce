use tracing::debug;

use super::mst::SpanningTree;
use crate::map::{Link, PointSet, ROOT};

/// Approximate a closed loop TSP solution by shortcutting a walk around the MST.
///
/// Every tree edge is walked twice, so the walk costs twice the tree. Skipping
/// points that were already visited can only make it shorter when the distance
/// satisfies the triangle inequality, and the MST is never longer than the
/// optimal tour, so the result is at most twice the optimum.
///
/// The tour is written into the point set as successor links, closing back at [`ROOT`].
///
/// <https://en.wikipedia.org/wiki/Travelling_salesman_problem#Heuristic_and_approximation_algorithms>
pub fn approximate_tsp_with_mst<M: PointSet + ?Sized>(map: &mut M, tree: &SpanningTree) {
    let walk = tree_walk(&tree.children, ROOT);
    debug!("Shortcutting a tree walk of length {}", walk.len());
    shortcut(map, &walk);
}

/// Preorder walk that revisits a point after returning from each of its children.
///
/// Uses an explicit stack so deep trees cannot overflow the call stack.
pub fn tree_walk(children: &[Vec<usize>], root: usize) -> Vec<usize> {
    let mut walk = Vec::with_capacity((2 * children.len()).saturating_sub(1));
    walk.push(root);
    // Each entry is a point and the index of the next child to descend into
    let mut stack = vec![(root, 0)];
    while let Some(&(point, next_child)) = stack.last() {
        match children[point].get(next_child) {
            Some(&child) => {
                let last = stack.len() - 1;
                stack[last].1 += 1;
                walk.push(child);
                stack.push((child, 0));
            }
            None => {
                stack.pop();
                if let Some(&(parent, _)) = stack.last() {
                    walk.push(parent);
                }
            }
        }
    }
    walk
}

/// Link each first visit in the walk to the next one, then close the loop at the root.
fn shortcut<M: PointSet + ?Sized>(map: &mut M, walk: &[usize]) {
    let mut seen = vec![false; map.count()];
    let mut previous = match walk.first() {
        Some(first) => *first,
        None => return,
    };
    for &next in walk {
        if !seen[next] {
            seen[next] = true;
            map.set_link(previous, Link::Successor(next));
            previous = next;
        }
    }
    map.set_link(previous, Link::Successor(ROOT));
}
