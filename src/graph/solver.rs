use tracing::info;

use super::{
    mst::{compute_mst, SpanningTree},
    tour, tsp,
};
use crate::{error::Error, map::PointSet};

/// Owns a point set and the spanning tree most recently computed over it.
#[derive(Debug, Clone)]
pub struct TspGraph<M> {
    map: Option<M>,
    tree: Option<SpanningTree>,
}

impl<M> Default for TspGraph<M> {
    fn default() -> Self {
        Self {
            map: None,
            tree: None,
        }
    }
}

impl<M: PointSet> TspGraph<M> {
    pub fn new(map: M) -> Self {
        Self {
            map: Some(map),
            tree: None,
        }
    }

    /// Replace the point set, forgetting any tree computed for the old one.
    pub fn initialize(&mut self, map: M) {
        self.map = Some(map);
        self.tree = None;
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn into_map(self) -> Option<M> {
        self.map
    }

    pub fn tree(&self) -> Option<&SpanningTree> {
        self.tree.as_ref()
    }

    /// Compute the MST, leaving parent links in the point set.
    ///
    /// The previous tree is dropped first, since a failed run leaves the links half rewritten.
    pub fn mst(&mut self) -> Result<&SpanningTree, Error> {
        self.tree = None;
        let map = self
            .map
            .as_mut()
            .ok_or(Error::Unsupported("no point set has been given"))?;
        let tree = compute_mst(map)?;
        info!(
            "Found MST with {} edges and weight {}",
            tree.edge_count(),
            tree.weight
        );
        Ok(self.tree.insert(tree))
    }

    /// Build a tour from the MST, computing the MST first if there is none for this point set.
    ///
    /// Calling this again rebuilds the tour from the stored tree.
    pub fn tsp(&mut self) -> Result<(), Error> {
        if self.tree.is_none() {
            self.mst()?;
        }
        let (map, tree) = match (self.map.as_mut(), self.tree.as_ref()) {
            (Some(map), Some(tree)) => (map, tree),
            _ => return Err(Error::Unsupported("no point set has been given")),
        };
        tsp::approximate_tsp_with_mst(map, tree);
        map.redraw();
        Ok(())
    }

    pub fn is_valid_tour(&self) -> bool {
        self.map.as_ref().map_or(false, tour::is_valid_tour)
    }

    pub fn tour_order(&self) -> Option<Vec<usize>> {
        self.map.as_ref().and_then(tour::tour_order)
    }

    pub fn tour_distance(&self) -> Result<f64, Error> {
        self.map
            .as_ref()
            .map_or(Err(Error::InvalidTour), tour::tour_distance)
    }
}
