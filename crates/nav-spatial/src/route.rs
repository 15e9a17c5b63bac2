//! Route geometry consumed by the live navigation loop.

use nav_core::Coordinate;

/// Where a [`Route`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteSource {
    /// Remote routing service geometry.
    Online,
    /// Offline pathfinder (possibly degraded to direct lines).
    Offline,
}

impl RouteSource {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteSource::Online  => "online",
            RouteSource::Offline => "offline",
        }
    }
}

/// An ordered, immutable sequence of coordinates from the requested start to
/// the requested destination.
///
/// A preference or waypoint change produces a whole new `Route`; there is
/// no way to edit one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Coordinate>,
    source: RouteSource,
}

impl Route {
    pub fn new(points: Vec<Coordinate>, source: RouteSource) -> Self {
        Self { points, source }
    }

    /// Straight two-point segment, the last-resort result.
    pub fn direct(start: Coordinate, end: Coordinate) -> Self {
        Self::new(vec![start, end], RouteSource::Offline)
    }

    #[inline]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn source(&self) -> RouteSource {
        self.source
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Sum of all segment lengths in metres.
    pub fn total_length_m(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_m(w[1])).sum()
    }

    /// Path distance from `pos` to the destination, travelling first to the
    /// point at `next_index` and then along the remaining segments.
    ///
    /// Once `next_index` is past the end, this is the direct distance to the
    /// final point.
    pub fn remaining_m(&self, pos: Coordinate, next_index: usize) -> f64 {
        let Some(last) = self.last() else { return 0.0 };
        match self.points.get(next_index) {
            None => pos.distance_m(last),
            Some(&target) => {
                let tail: f64 = self.points[next_index..]
                    .windows(2)
                    .map(|w| w[0].distance_m(w[1]))
                    .sum();
                pos.distance_m(target) + tail
            }
        }
    }

    /// The point `distance_m` metres ahead of `pos` along the path that runs
    /// through `points[next_index..]`.
    ///
    /// Saturates at the final point.  Returns `pos` for an empty route.
    pub fn point_along(&self, pos: Coordinate, next_index: usize, distance_m: f64) -> Coordinate {
        let mut left = distance_m.max(0.0);
        let mut from = pos;
        for &to in self.points.iter().skip(next_index) {
            let seg = from.distance_m(to);
            if seg >= left {
                return from.destination(left, from.bearing_deg(to));
            }
            left -= seg;
            from = to;
        }
        self.last().unwrap_or(pos)
    }
}
