//! Loads the feature dataset from a JSON file.
//!
//! The file holds a list of features:
//!
//! ```json
//! [{"location": {"latitude": 409146138, "longitude": -746188906},
//!   "name": "Berkshire Valley Management Area Trail, Jefferson, NJ, USA"}]
//! ```

use std::path::Path;

use crate::error::{Result, RouteGuideError};
use crate::types::feature::Feature;

/// Reads and parses the dataset at `path`.
///
/// The returned list is in file order and may contain unnamed entries;
/// filtering is left to [`FeatureStore`](`crate::store::feature_store::FeatureStore`).
pub fn load_features(path: &Path) -> Result<Vec<Feature>> {
    info!("Loading features from file: {}", path.display());
    let data = std::fs::read(path).map_err(|source| RouteGuideError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let features: Vec<Feature> =
        serde_json::from_slice(&data).map_err(|source| RouteGuideError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Parsed {} features from {}", features.len(), path.display());
    Ok(features)
}
