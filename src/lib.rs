//! Geospatial Feature Service Library.
//! Answers point lookups and range queries over a fixed feature
//! dataset, summarizes recorded routes and relays location notes
//! between chat participants.

#[macro_use]
extern crate log;

pub mod error;

pub mod types {
    pub mod feature;
    pub mod note;
    pub mod point;
    pub mod summary;
}

pub mod utils {
    pub mod config;
    pub mod geometry;
    pub mod loader;
}

pub mod algorithms {
    pub mod route;
}

pub mod store {
    pub mod feature_store;
    pub mod note_registry;
}

pub mod service {
    pub mod route_guide;
}

pub use error::{Result, RouteGuideError};
pub use service::route_guide::{FeatureStream, NoteStream, RouteGuide};
pub use store::{feature_store::FeatureStore, note_registry::NoteRegistry};
pub use types::{
    feature::Feature, note::RouteNote, point::Point, point::Rectangle, summary::RouteSummary,
};
pub use utils::config::Config;
