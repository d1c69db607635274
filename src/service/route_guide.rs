//! The four route guide calls.
//!
//! [`RouteGuide`] orchestrates the read-only [`FeatureStore`] and the
//! shared [`NoteRegistry`]. It keeps no state between calls other than
//! what lives in those two components.
//!
//! Streaming inputs are `Stream`s of `Result`s: an `Err` item stands
//! for a transport failure and aborts the call. Streaming outputs are
//! bounded channels fed by a spawned producer. When the caller drops
//! the output stream the producer notices on its next send (or, for the
//! chat relay, while waiting for input) and stops.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::algorithms::route::RouteAggregator;
use crate::error::Result;
use crate::store::feature_store::FeatureStore;
use crate::store::note_registry::NoteRegistry;
use crate::types::feature::Feature;
use crate::types::note::RouteNote;
use crate::types::point::{Point, Rectangle};
use crate::types::summary::RouteSummary;
use crate::utils::config::Config;

/// Output of [`RouteGuide::list_features`].
pub type FeatureStream = ReceiverStream<Feature>;

/// Output of [`RouteGuide::route_chat`].
pub type NoteStream = ReceiverStream<Result<RouteNote>>;

/// Handler for the route guide calls.
///
/// Cloning is cheap; clones share the same store and registry.
#[derive(Debug, Clone)]
pub struct RouteGuide {
    features: Arc<FeatureStore>,
    notes: Arc<NoteRegistry>,
    config: Config,
}

impl RouteGuide {
    /// Creates a handler over an existing store and registry.
    pub fn new(features: Arc<FeatureStore>, notes: Arc<NoteRegistry>, config: Config) -> Self {
        RouteGuide {
            features,
            notes,
            config,
        }
    }

    /// Loads the dataset named by `config` and starts with an empty
    /// note registry.
    pub fn from_config(config: Config) -> Self {
        let features = Arc::new(FeatureStore::from_file(&config.json_file));
        RouteGuide::new(features, Arc::new(NoteRegistry::new()), config)
    }

    /// The feature dataset.
    pub fn features(&self) -> &FeatureStore {
        &self.features
    }

    /// The note registry shared by every chat call.
    pub fn notes(&self) -> &NoteRegistry {
        &self.notes
    }

    /// Returns the feature at `point`, or an unnamed feature at `point`
    /// if there is none.
    pub async fn get_feature(&self, point: Point) -> Feature {
        debug!("get_feature: {:?}", point);
        self.features.get_feature(&point)
    }

    /// Streams every feature inside `rect`, edges included, in storage
    /// order.
    pub async fn list_features(&self, rect: Rectangle) -> FeatureStream {
        info!("list_features: {:?}", rect);
        let (tx, rx) = mpsc::channel(self.config.list_buffer.max(1));
        let features = Arc::clone(&self.features);
        tokio::spawn(async move {
            let mut sent = 0usize;
            for feature in features.list_features(&rect) {
                if tx.send(feature.clone()).await.is_err() {
                    debug!("list_features: receiver dropped after {} features", sent);
                    return;
                }
                sent += 1;
            }
            info!("list_features: sent {} features", sent);
        });
        ReceiverStream::new(rx)
    }

    /// Consumes a route and returns its summary once the input ends.
    ///
    /// A failed input item aborts the call and no summary is produced.
    pub async fn record_route<S>(&self, points: S) -> Result<RouteSummary>
    where
        S: Stream<Item = Result<Point>>,
    {
        info!("record_route: started");
        futures::pin_mut!(points);
        let mut aggregator = RouteAggregator::new(&self.features);
        while let Some(point) = points.next().await {
            let point = point.map_err(|e| {
                error!(
                    "record_route: aborted after {} points: {}",
                    aggregator.point_count(),
                    e
                );
                e
            })?;
            debug!("record_route: point {:?}", point);
            aggregator.push(point);
        }
        let summary = aggregator.finish();
        info!("record_route: finished {:?}", summary);
        Ok(summary)
    }

    /// Relays notes: every incoming note is stored under its location
    /// and answered with all notes stored there so far, oldest first.
    ///
    /// The output ends when the input ends. A failed input item is
    /// forwarded as the last output item.
    pub async fn route_chat<S>(&self, notes: S) -> NoteStream
    where
        S: Stream<Item = Result<RouteNote>> + Send + 'static,
    {
        info!("route_chat: opened");
        let (tx, rx) = mpsc::channel(self.config.chat_buffer.max(1));
        tokio::spawn(relay_notes(Arc::clone(&self.notes), notes, tx));
        ReceiverStream::new(rx)
    }
}

//---------------------------------------------------------------
// Private functions
//---------------------------------------------------------------

/// See [`RouteGuide::route_chat`].
///
/// The registry guard is released inside [`NoteRegistry::append`], so
/// a slow consumer only ever stalls its own relay.
async fn relay_notes<S>(
    registry: Arc<NoteRegistry>,
    notes: S,
    tx: mpsc::Sender<Result<RouteNote>>,
) where
    S: Stream<Item = Result<RouteNote>> + Send + 'static,
{
    futures::pin_mut!(notes);
    let mut received = 0usize;
    loop {
        let next = tokio::select! {
            _ = tx.closed() => {
                debug!("route_chat: receiver dropped after {} notes", received);
                return;
            }
            next = notes.next() => next,
        };
        let note = match next {
            None => {
                info!("route_chat: closed after {} notes", received);
                return;
            }
            Some(Err(e)) => {
                error!("route_chat: aborted after {} notes: {}", received, e);
                let _ = tx.send(Err(e)).await;
                return;
            }
            Some(Ok(note)) => note,
        };
        received += 1;
        debug!("route_chat: note {:?}", note);
        for stored in registry.append(note) {
            if tx.send(Ok(stored)).await.is_err() {
                debug!("route_chat: receiver dropped after {} notes", received);
                return;
            }
        }
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod route_guide_tests {
    use super::*;
    use crate::error::RouteGuideError;
    use crate::store::feature_store::feature_store_tests::sample_store;
    use futures::stream;
    use rand::Rng;
    use std::time::Duration;

    fn guide() -> RouteGuide {
        RouteGuide::new(
            Arc::new(sample_store()),
            Arc::new(NoteRegistry::new()),
            Config::default(),
        )
    }

    fn guide_with_buffers(buffer: usize) -> RouteGuide {
        RouteGuide::new(
            Arc::new(sample_store()),
            Arc::new(NoteRegistry::new()),
            Config {
                list_buffer: buffer,
                chat_buffer: buffer,
                ..Config::default()
            },
        )
    }

    fn route_input(points: Vec<Point>) -> impl Stream<Item = Result<Point>> {
        stream::iter(points.into_iter().map(Ok))
    }

    fn chat_input(notes: Vec<RouteNote>) -> impl Stream<Item = Result<RouteNote>> + Send + 'static {
        stream::iter(notes.into_iter().map(Ok))
    }

    fn messages(notes: &[Result<RouteNote>]) -> Vec<String> {
        notes
            .iter()
            .map(|n| n.as_ref().unwrap().message.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_get_feature() {
        let guide = guide();
        let hit = guide.get_feature(Point::new(409146138, -746188906)).await;
        assert_eq!(
            hit.name,
            "Berkshire Valley Management Area Trail, Jefferson, NJ, USA"
        );

        let miss = guide.get_feature(Point::new(0, 0)).await;
        assert_eq!(miss, Feature::unnamed(Point::new(0, 0)));
        assert_eq!(miss, guide.get_feature(Point::new(0, 0)).await);
    }

    #[tokio::test]
    async fn test_list_features_stream() {
        let guide = guide_with_buffers(1);
        let rect = Rectangle::new(Point::new(400000000, -750000000), Point::new(420000000, -730000000));
        let streamed: Vec<Feature> = guide.list_features(rect.clone()).await.collect().await;
        let expected: Vec<Feature> = guide.features().list_features(&rect).cloned().collect();
        assert_eq!(streamed.len(), 4);
        assert_eq!(streamed, expected);
    }

    #[tokio::test]
    async fn test_list_features_random_corner_swaps() {
        let guide = guide();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let a = Point::new(
                rng.gen_range(400000000..420000000),
                rng.gen_range(-750000000..-740000000),
            );
            let b = Point::new(
                rng.gen_range(400000000..420000000),
                rng.gen_range(-750000000..-740000000),
            );
            let forward: Vec<Feature> = guide.list_features(Rectangle::new(a, b)).await.collect().await;
            let backward: Vec<Feature> = guide.list_features(Rectangle::new(b, a)).await.collect().await;
            assert_eq!(forward, backward);
            for feature in &forward {
                let p = feature.point();
                assert!(p.latitude >= a.latitude.min(b.latitude));
                assert!(p.latitude <= a.latitude.max(b.latitude));
                assert!(p.longitude >= a.longitude.min(b.longitude));
                assert!(p.longitude <= a.longitude.max(b.longitude));
            }
        }
    }

    #[tokio::test]
    async fn test_list_features_early_drop() {
        let guide = guide_with_buffers(1);
        let rect = Rectangle::new(Point::new(400000000, -750000000), Point::new(420000000, -730000000));
        let first: Vec<Feature> = guide.list_features(rect).await.take(1).collect().await;
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].point(), Point::new(409146138, -746188906));
    }

    #[tokio::test]
    async fn test_record_route() {
        let guide = guide();
        let points = vec![
            Point::new(409146138, -746188906),
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(1, 0),
            Point::new(1, 1),
        ];
        let summary = guide
            .record_route(route_input(points))
            .await
            .unwrap();
        assert_eq!(summary.point_count, 5);
        assert_eq!(summary.feature_count, 1);
        assert!(summary.distance > 3);
        assert_eq!(summary.elapsed_time, 0);
    }

    #[tokio::test]
    async fn test_record_empty_route() {
        let guide = guide();
        let summary = guide.record_route(route_input(Vec::new())).await.unwrap();
        assert_eq!(summary, RouteSummary::default());
    }

    #[tokio::test]
    async fn test_record_route_transport_failure() {
        let guide = guide();
        let input = stream::iter(vec![
            Ok::<Point, RouteGuideError>(Point::new(0, 0)),
            Err(RouteGuideError::Transport("connection reset".to_string())),
            Ok(Point::new(0, 1)),
        ]);
        let err = guide.record_route(input).await.unwrap_err();
        assert!(matches!(err, RouteGuideError::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_route_elapsed_time() {
        let guide = guide();
        let input = stream::iter(vec![Point::new(0, 0), Point::new(0, 1)]).then(|p| async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            Ok::<Point, RouteGuideError>(p)
        });
        let summary = guide.record_route(input).await.unwrap();
        assert_eq!(summary.elapsed_time, 3);
        assert_eq!(summary.distance, 1);
    }

    #[tokio::test]
    async fn test_route_chat_replays_history() {
        let guide = guide();
        let p = Point::new(409146138, -746188906);
        let (in_tx, in_rx) = mpsc::channel::<Result<RouteNote>>(4);
        let mut out = guide.route_chat(ReceiverStream::new(in_rx)).await;

        in_tx.send(Ok(RouteNote::new(p, "First message"))).await.unwrap();
        let reply = vec![out.next().await.unwrap()];
        assert_eq!(messages(&reply), vec!["First message"]);

        in_tx.send(Ok(RouteNote::new(p, "Second message"))).await.unwrap();
        let reply = vec![out.next().await.unwrap(), out.next().await.unwrap()];
        assert_eq!(messages(&reply), vec!["First message", "Second message"]);

        in_tx.send(Ok(RouteNote::new(Point::new(0, 1), "Third message"))).await.unwrap();
        let reply = vec![out.next().await.unwrap()];
        assert_eq!(messages(&reply), vec!["Third message"]);

        drop(in_tx);
        assert!(out.next().await.is_none());
    }

    #[tokio::test]
    async fn test_route_chat_across_sessions() {
        let guide = guide();
        let p = Point::new(0, 0);

        let first: Vec<Result<RouteNote>> = guide
            .route_chat(chat_input(vec![RouteNote::new(p, "from a")]))
            .await
            .collect()
            .await;
        assert_eq!(messages(&first), vec!["from a"]);

        let other = guide.clone();
        let second: Vec<Result<RouteNote>> = other
            .route_chat(chat_input(vec![RouteNote::new(p, "from b")]))
            .await
            .collect()
            .await;
        assert_eq!(messages(&second), vec!["from a", "from b"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_route_chat_concurrent_sessions() {
        let guide = guide();
        let p = Point::new(42, 42);
        let sessions = 16;

        let handles: Vec<_> = (0..sessions)
            .map(|i| {
                let guide = guide.clone();
                tokio::spawn(async move {
                    let input = chat_input(vec![RouteNote::new(p, format!("note {}", i))]);
                    guide.route_chat(input).await.collect::<Vec<_>>().await
                })
            })
            .collect();

        let mut reply_lengths = Vec::new();
        for handle in handles {
            let replies = handle.await.unwrap();
            assert!(replies.iter().all(|r| r.is_ok()));
            reply_lengths.push(replies.len());
        }

        assert_eq!(guide.notes().notes_at(&p).len(), sessions);
        // Each append observed a distinct, complete history length.
        reply_lengths.sort_unstable();
        assert_eq!(reply_lengths, (1..=sessions).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_route_chat_transport_failure() {
        let guide = guide();
        let input = stream::iter(vec![
            Ok::<RouteNote, RouteGuideError>(RouteNote::new(Point::new(3, 3), "before")),
            Err(RouteGuideError::Transport("stream reset".to_string())),
            Ok(RouteNote::new(Point::new(3, 3), "after")),
        ]);
        let out: Vec<Result<RouteNote>> = guide.route_chat(input).await.collect().await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].as_ref().unwrap().message, "before");
        assert!(matches!(out[1], Err(RouteGuideError::Transport(_))));
        assert_eq!(guide.notes().notes_at(&Point::new(3, 3)).len(), 1);
    }

    #[tokio::test]
    async fn test_route_chat_unwinds_when_caller_leaves() {
        let guide = guide();
        let (in_tx, in_rx) = mpsc::channel::<Result<RouteNote>>(1);
        let out = guide.route_chat(ReceiverStream::new(in_rx)).await;

        // The relay is parked waiting for input; dropping the output
        // must still release the input side.
        drop(out);
        tokio::time::timeout(Duration::from_secs(5), in_tx.closed())
            .await
            .expect("relay did not stop after the caller left");
    }
}
