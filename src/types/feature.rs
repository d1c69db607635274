//! Struct definitions and implementations for [`Feature`].
//!
//! A feature is a named point of interest. The empty name is reserved:
//! it marks "no feature here" and is what a lookup returns when nothing
//! is stored at the requested point.

use serde::{Deserialize, Serialize};

use super::point::Point;

/// A named point of interest.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    /// The name of the feature. Empty for the "no feature" sentinel.
    #[prost(string, tag = "1")]
    pub name: String,

    /// Where the feature is located.
    #[prost(message, optional, tag = "2")]
    pub location: Option<Point>,
}

impl Feature {
    /// Creates a named feature.
    pub fn new(name: impl Into<String>, location: Point) -> Self {
        Feature {
            name: name.into(),
            location: Some(location),
        }
    }

    /// Builds the sentinel returned when no feature exists at `point`.
    pub fn unnamed(point: Point) -> Self {
        Feature {
            name: String::new(),
            location: Some(point),
        }
    }

    /// `false` for the sentinel.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// The feature's location. A missing location is the origin.
    pub fn point(&self) -> Point {
        self.location.unwrap_or_default()
    }
}
