//! Runs a scripted session against an in-process route guide: two
//! lookups, a range query, a recorded route and a short chat.
//!
//! The dataset path and channel sizes come from `ROUTE_GUIDE_*`
//! environment variables; log output is filtered with `RUST_LOG`.

#[macro_use]
extern crate log;

use futures::{stream, StreamExt};
use route_guide::{Config, Point, Rectangle, RouteGuide, RouteGuideError, RouteNote};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let guide = RouteGuide::from_config(Config::from_env());

    for point in [Point::new(409146138, -746188906), Point::new(0, 0)] {
        let feature = guide.get_feature(point).await;
        if feature.is_named() {
            info!("Feature: {:?}", feature);
        } else {
            info!("No feature at {:?}", point);
        }
    }

    let rect = Rectangle::new(
        Point::new(400000000, -750000000),
        Point::new(420000000, -730000000),
    );
    let mut features = guide.list_features(rect).await;
    while let Some(feature) = features.next().await {
        let at = feature.point();
        info!(
            "Feature: {} with Location: {}, {}",
            feature.name,
            at.latitude_degrees(),
            at.longitude_degrees()
        );
    }

    let route = vec![
        Point::new(409146138, -746188906),
        Point::new(0, 0),
        Point::new(0, 1),
        Point::new(1, 0),
        Point::new(1, 1),
    ];
    let route = stream::iter(route.into_iter().map(Ok::<Point, RouteGuideError>));
    match guide.record_route(route).await {
        Ok(summary) => info!("Route summary: {:?}", summary),
        Err(e) => error!("record_route failed: {}", e),
    }

    let notes = vec![
        RouteNote::new(Point::new(409146138, -746188906), "First message"),
        RouteNote::new(Point::new(0, 0), "Second message"),
        RouteNote::new(Point::new(0, 1), "Third message"),
        RouteNote::new(Point::new(0, 0), "Fourth message"),
    ];
    let notes = stream::iter(notes.into_iter().map(Ok::<RouteNote, RouteGuideError>));
    let mut replies = guide.route_chat(notes).await;
    while let Some(reply) = replies.next().await {
        match reply {
            Ok(note) => info!("Got message: {:?}", note),
            Err(e) => {
                error!("route_chat failed: {}", e);
                break;
            }
        }
    }
}
