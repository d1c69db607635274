//! Definition for the [`RouteSummary`] type.

use serde::{Deserialize, Serialize};

/// Aggregate statistics over one recorded route.
///
/// Produced once at the end of a route recording and never modified.
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Number of points received.
    #[prost(int32, tag = "1")]
    pub point_count: i32,

    /// Number of received points that match a stored feature.
    #[prost(int32, tag = "2")]
    pub feature_count: i32,

    /// Sum of the per-segment truncated distances, in fixed-point units.
    #[prost(int32, tag = "3")]
    pub distance: i32,

    /// Whole seconds between call start and end of input.
    #[prost(int32, tag = "4")]
    pub elapsed_time: i32,
}
