use crate::{
    error::Error,
    kbn_summation,
    map::{Link, PointSet, ROOT},
};

/// Check that the successor links form exactly one cycle through every point.
pub fn is_valid_tour<M: PointSet + ?Sized>(map: &M) -> bool {
    tour_order(map).is_some()
}

/// Points in the order the tour visits them, starting at [`ROOT`].
///
/// Returns `None` if the links are not a valid tour.
pub fn tour_order<M: PointSet + ?Sized>(map: &M) -> Option<Vec<usize>> {
    let count = map.count();
    if count == 0 {
        return None;
    }

    let mut passed = vec![false; count];
    let mut order = Vec::with_capacity(count);
    let mut point = ROOT;
    loop {
        passed[point] = true;
        order.push(point);
        let next = match map.link(point) {
            Link::Successor(next) => next,
            Link::Parent(_) => return None,
        };
        if next == ROOT {
            break;
        }
        if next >= count || passed[next] {
            return None;
        }
        point = next;
    }

    // Returned to the root early
    if order.len() != count {
        return None;
    }
    Some(order)
}

/// Total length of the tour, or [`Error::InvalidTour`] if the links are not one.
pub fn tour_distance<M: PointSet + ?Sized>(map: &M) -> Result<f64, Error> {
    if !is_valid_tour(map) {
        return Err(Error::InvalidTour);
    }
    kbn_summation! {
        for point in 0..map.count() => {
            distance += map.distance(point, map.link(point).target());
        }
    }
    Ok(distance)
}
