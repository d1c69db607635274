//! Incremental route summarization.
//!
//! A [`RouteAggregator`] is fed one point at a time as a route streams
//! in and produces a single [`RouteSummary`] when the input ends.

use tokio::time::Instant;

use crate::store::feature_store::FeatureStore;
use crate::types::point::Point;
use crate::types::summary::RouteSummary;
use crate::utils::geometry::segment_distance;

/// Running totals for one route recording.
#[derive(Debug)]
pub struct RouteAggregator<'a> {
    store: &'a FeatureStore,
    point_count: i32,
    feature_count: i32,
    distance: i32,
    last_point: Option<Point>,
    started_at: Instant,
}

impl<'a> RouteAggregator<'a> {
    /// Starts a recording. The elapsed time of the summary is measured
    /// from this call.
    pub fn new(store: &'a FeatureStore) -> Self {
        RouteAggregator {
            store,
            point_count: 0,
            feature_count: 0,
            distance: 0,
            last_point: None,
            started_at: Instant::now(),
        }
    }

    /// Accounts for the next point of the route.
    ///
    /// Each segment is truncated to an integer before it is added, so
    /// the total differs from the truncated length of the whole path.
    /// Counters saturate instead of wrapping.
    pub fn push(&mut self, point: Point) {
        self.point_count = self.point_count.saturating_add(1);
        if self.store.contains(&point) {
            self.feature_count = self.feature_count.saturating_add(1);
        }
        if let Some(last) = self.last_point {
            let segment = segment_distance(&last, &point);
            let segment = i32::try_from(segment).unwrap_or(i32::MAX);
            self.distance = self.distance.saturating_add(segment);
        }
        self.last_point = Some(point);
    }

    /// Number of points pushed so far.
    pub fn point_count(&self) -> i32 {
        self.point_count
    }

    /// Closes the recording and returns its summary.
    pub fn finish(self) -> RouteSummary {
        let elapsed = self.started_at.elapsed().as_secs();
        RouteSummary {
            point_count: self.point_count,
            feature_count: self.feature_count,
            distance: self.distance,
            elapsed_time: i32::try_from(elapsed).unwrap_or(i32::MAX),
        }
    }
}

/// Summarizes a route that is already fully in memory.
pub fn summarize<I: IntoIterator<Item = Point>>(store: &FeatureStore, points: I) -> RouteSummary {
    let mut aggregator = RouteAggregator::new(store);
    for point in points {
        aggregator.push(point);
    }
    aggregator.finish()
}
