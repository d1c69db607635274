//! Struct definitions and implementations for [`Point`] and
//! [`Rectangle`].
//!
//! Coordinates are fixed-point degrees: latitude and longitude are
//! multiplied by 1e7 and stored as signed integers, so two points are
//! equal only when both integers are equal.

use serde::{Deserialize, Serialize};

/// Fixed-point degrees scale factor.
pub const COORD_FACTOR: f64 = 1e7;

/// A [`Point`] is a geographic position on the wire.
///
/// Equality and hashing are exact integer comparisons on both axes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Point {
    /// Latitude in degrees × 1e7.
    #[prost(int32, tag = "1")]
    pub latitude: i32,

    /// Longitude in degrees × 1e7.
    #[prost(int32, tag = "2")]
    pub longitude: i32,
}

impl Point {
    /// Creates a point from fixed-point latitude and longitude.
    pub fn new(latitude: i32, longitude: i32) -> Self {
        Point {
            latitude,
            longitude,
        }
    }

    /// Latitude in floating-point degrees, for display only.
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude as f64 / COORD_FACTOR
    }

    /// Longitude in floating-point degrees, for display only.
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude as f64 / COORD_FACTOR
    }
}

/// An axis-aligned box given by two opposite corners.
///
/// The corners are not ordered: `lo` may be north or east of `hi`.
/// Consumers normalize through
/// [`Bounds`](`crate::utils::geometry::Bounds`) before testing
/// containment.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Rectangle {
    /// One corner of the rectangle.
    #[prost(message, optional, tag = "1")]
    pub lo: Option<Point>,

    /// The opposite corner of the rectangle.
    #[prost(message, optional, tag = "2")]
    pub hi: Option<Point>,
}

impl Rectangle {
    /// Creates a rectangle from two corners in any order.
    pub fn new(lo: Point, hi: Point) -> Self {
        Rectangle {
            lo: Some(lo),
            hi: Some(hi),
        }
    }

    /// The `lo` corner. A missing corner is the origin.
    pub fn lo_corner(&self) -> Point {
        self.lo.unwrap_or_default()
    }

    /// The `hi` corner. A missing corner is the origin.
    pub fn hi_corner(&self) -> Point {
        self.hi.unwrap_or_default()
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
