//! The read-only feature dataset.
//!
//! A [`FeatureStore`] is built once at startup and never mutated, so it
//! can be shared between calls behind an `Arc` without locking. Lookups
//! are linear scans in storage order.

use std::path::Path;

use crate::types::feature::Feature;
use crate::types::point::{Point, Rectangle};
use crate::utils::geometry::Bounds;
use crate::utils::loader::load_features;

/// An immutable, ordered list of named features.
#[derive(Debug, Default, Clone)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Builds a store from already deserialized features.
    ///
    /// Unnamed features mean "nothing here" and are dropped. The order
    /// of the remaining features is kept.
    pub fn new(features: Vec<Feature>) -> Self {
        let total = features.len();
        let features: Vec<Feature> = features.into_iter().filter(Feature::is_named).collect();
        if features.len() != total {
            debug!(
                "Dropped {} unnamed features from the dataset",
                total - features.len()
            );
        }
        info!("Feature store ready with {} features", features.len());
        FeatureStore { features }
    }

    /// Loads the dataset at `path`.
    ///
    /// A dataset that cannot be read or parsed yields an empty store;
    /// every lookup against it returns the unnamed sentinel.
    pub fn from_file(path: &Path) -> Self {
        match load_features(path) {
            Ok(features) => FeatureStore::new(features),
            Err(e) => {
                error!("{}; continuing with an empty feature store", e);
                FeatureStore::default()
            }
        }
    }

    /// Number of stored features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// `true` if the store holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Returns the stored feature at index `idx`, in storage order.
    pub fn get(&self, idx: usize) -> Option<&Feature> {
        self.features.get(idx)
    }

    /// First feature whose location equals `point` exactly.
    pub fn find(&self, point: &Point) -> Option<&Feature> {
        self.features.iter().find(|f| f.point() == *point)
    }

    /// `true` if any stored feature sits exactly at `point`.
    pub fn contains(&self, point: &Point) -> bool {
        self.find(point).is_some()
    }

    /// Looks up the feature at `point`, returning the unnamed sentinel
    /// if there is none.
    pub fn get_feature(&self, point: &Point) -> Feature {
        match self.find(point) {
            Some(feature) => feature.clone(),
            None => Feature::unnamed(*point),
        }
    }

    /// Lazily yields every feature inside `rect` (edges included) in
    /// storage order.
    pub fn list_features<'a>(&'a self, rect: &Rectangle) -> impl Iterator<Item = &'a Feature> + 'a {
        let bounds = Bounds::from_rectangle(rect);
        self.features
            .iter()
            .filter(move |f| bounds.contains(&f.point()))
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
