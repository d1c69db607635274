//! Helper functions for comparing and measuring [`Point`]s.
//!
//! All comparisons are done on the fixed-point integers. Floating
//! point is only used for the segment length, which is truncated back
//! to an integer before it leaves this module.

use crate::types::point::{Point, Rectangle};

/// The normalized extent of a [`Rectangle`].
///
/// Corners may arrive in any order, so each axis is normalized on its
/// own with min/max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub north: i32,
    pub south: i32,
    pub east: i32,
    pub west: i32,
}

impl Bounds {
    /// Normalizes the corners of `rect`.
    pub fn from_rectangle(rect: &Rectangle) -> Self {
        let lo = rect.lo_corner();
        let hi = rect.hi_corner();
        Bounds {
            north: lo.latitude.max(hi.latitude),
            south: lo.latitude.min(hi.latitude),
            east: lo.longitude.max(hi.longitude),
            west: lo.longitude.min(hi.longitude),
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: &Point) -> bool {
        self.west <= point.longitude
            && point.longitude <= self.east
            && self.south <= point.latitude
            && point.latitude <= self.north
    }
}

/// Returns `true` if `point` lies inside `rect` or on its boundary.
pub fn in_range(point: &Point, rect: &Rectangle) -> bool {
    Bounds::from_rectangle(rect).contains(point)
}

/// Euclidean length of the segment between two points, in fixed-point
/// units, truncated toward zero.
///
/// Differences are taken in `i64` so that segments spanning the whole
/// coordinate range do not overflow.
pub fn segment_distance(from: &Point, to: &Point) -> i64 {
    let d_lat = (to.latitude as i64 - from.latitude as i64) as f64;
    let d_lon = (to.longitude as i64 - from.longitude as i64) as f64;
    (d_lat * d_lat + d_lon * d_lon).sqrt() as i64
}
