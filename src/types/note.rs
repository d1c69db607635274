//! Struct definitions for [`RouteNote`] and its registry key
//! [`NoteKey`].

use serde::{Deserialize, Serialize};

use super::point::Point;

/// A message attached to a location.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteNote {
    /// Where the note was left.
    #[prost(message, optional, tag = "1")]
    pub location: Option<Point>,

    /// The note text.
    #[prost(string, tag = "2")]
    pub message: String,
}

impl RouteNote {
    /// Creates a note at `location`.
    pub fn new(location: Point, message: impl Into<String>) -> Self {
        RouteNote {
            location: Some(location),
            message: message.into(),
        }
    }

    /// The registry key for this note. A missing location keys to the
    /// origin.
    pub fn key(&self) -> NoteKey {
        NoteKey::from(self.location.unwrap_or_default())
    }
}

/// Composite registry key: both fixed-point axes, compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub latitude: i32,
    pub longitude: i32,
}

impl From<Point> for NoteKey {
    fn from(point: Point) -> Self {
        NoteKey {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}
