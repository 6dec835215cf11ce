use clap::ValueEnum;
use ndarray::prelude::*;
use serde::Serialize;
use tracing::trace;

use crate::math::{euclidean_distance, manhattan_distance};

/// Loading point maps from files and generating random ones
pub mod io;

/// The root of every spanning tree and the start of every tour.
pub const ROOT: usize = 0;

/// What a point's link currently means.
///
/// The link array is shared by both phases of the construction: while building
/// the spanning tree it holds parent pointers, and once the tour is built it
/// holds successor pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Link {
    /// Parent of the point in the spanning tree. The root is its own parent.
    Parent(usize),
    /// Next point in the tour
    Successor(usize),
}

impl Link {
    pub fn target(self) -> usize {
        match self {
            Self::Parent(target) | Self::Successor(target) => target,
        }
    }
}

/// A set of points with a distance function and one mutable link per point.
///
/// The distance function is assumed to be symmetric and non-negative. The
/// approximation bound of the tour additionally needs the triangle inequality.
pub trait PointSet {
    fn count(&self) -> usize;

    fn distance(&self, i: usize, j: usize) -> f64;

    fn link(&self, point: usize) -> Link;

    fn set_link(&mut self, point: usize, link: Link);

    /// Hook for visualizing the current links.
    fn redraw(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
}

/// Points stored as the rows of an `n x dim` matrix.
#[derive(Debug, Clone)]
pub struct PointMap {
    points: Array2<f64>,
    metric: DistanceMetric,
    links: Vec<Link>,
}

impl PointMap {
    /// Every point starts out as its own parent, which is not a valid tour for more than one point.
    pub fn new(points: Array2<f64>, metric: DistanceMetric) -> Self {
        let links = (0..points.nrows()).map(Link::Parent).collect();
        Self {
            points,
            metric,
            links,
        }
    }

    pub fn from_rows<const N: usize>(rows: &[[f64; N]], metric: DistanceMetric) -> Self {
        let points = Array2::from_shape_fn((rows.len(), N), |(i, j)| rows[i][j]);
        Self::new(points, metric)
    }

    pub fn points(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }
}

impl PointSet for PointMap {
    fn count(&self) -> usize {
        self.points.nrows()
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        let (a, b) = (self.points.row(i), self.points.row(j));
        match self.metric {
            DistanceMetric::Euclidean => euclidean_distance(a, b),
            DistanceMetric::Manhattan => manhattan_distance(a, b),
        }
    }

    fn link(&self, point: usize) -> Link {
        self.links[point]
    }

    fn set_link(&mut self, point: usize, link: Link) {
        self.links[point] = link;
    }

    fn redraw(&mut self) {
        trace!(
            "Redraw {} points ({} successor links)",
            self.links.len(),
            self.links
                .iter()
                .filter(|link| matches!(link, Link::Successor(_)))
                .count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_map_links_every_point_to_itself() {
        let map = PointMap::from_rows(&[[0., 0.], [1., 0.], [2., 0.]], DistanceMetric::Euclidean);
        assert_eq!(
            (0..map.count()).map(|i| map.link(i)).collect::<Vec<_>>(),
            vec![Link::Parent(0), Link::Parent(1), Link::Parent(2)]
        );
    }

    #[test]
    fn distance_follows_metric() {
        let rows = [[0., 0.], [3., 4.]];
        let euclidean = PointMap::from_rows(&rows, DistanceMetric::Euclidean);
        let manhattan = PointMap::from_rows(&rows, DistanceMetric::Manhattan);
        assert_eq!(euclidean.distance(0, 1), 5.);
        assert_eq!(manhattan.distance(1, 0), 7.);
        assert_eq!(euclidean.distance(1, 1), 0.);
    }

    #[test]
    fn set_link_keeps_the_tag() {
        let mut map = PointMap::from_rows(&[[0.], [1.]], DistanceMetric::Euclidean);
        map.set_link(1, Link::Parent(0));
        map.set_link(0, Link::Successor(1));
        assert_eq!(map.link(1), Link::Parent(0));
        assert_eq!(map.link(0), Link::Successor(1));
        assert_eq!(map.link(0).target(), 1);
    }
}
