//! Unit tests for nav-route.
//!
//! Remote routers are in-process mocks; nothing touches the network.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use nav_core::Coordinate;
    use nav_spatial::fixture::landmark;
    use nav_spatial::{TopologyGraph, default_topology};

    use crate::{RemoteError, RemoteRouter, RouteRequest};

    pub fn town() -> Arc<TopologyGraph> {
        Arc::new(default_topology().unwrap())
    }

    pub fn at(name: &str) -> Coordinate {
        landmark(name).unwrap()
    }

    /// North gate (slightly off the junction) to the boatyard via the harbour.
    pub fn town_request() -> RouteRequest {
        let start = at("north_gate").destination(12.0, 200.0);
        let end = at("boatyard").destination(9.0, 45.0);
        RouteRequest::new(start, end).with_waypoints(vec![at("harbour")])
    }

    pub fn no_consecutive_duplicates(points: &[Coordinate]) -> bool {
        points.windows(2).all(|w| w[0] != w[1])
    }

    /// Always fails with the given error.
    pub struct FailingRemote(pub RemoteError);

    #[async_trait]
    impl RemoteRouter for FailingRemote {
        async fn route(&self, _: &[Coordinate], _: &str) -> Result<Vec<Coordinate>, RemoteError> {
            Err(self.0.clone())
        }
    }

    /// Answers correctly, but only after a long delay.
    pub struct SlowRemote(pub Duration);

    #[async_trait]
    impl RemoteRouter for SlowRemote {
        async fn route(&self, waypoints: &[Coordinate], _: &str) -> Result<Vec<Coordinate>, RemoteError> {
            tokio::time::sleep(self.0).await;
            Ok(waypoints.to_vec())
        }
    }

    /// Returns a fixed geometry and records every call.
    pub struct FixedRemote {
        pub geometry: Vec<Coordinate>,
        pub calls:    Mutex<Vec<(Vec<Coordinate>, String)>>,
    }

    impl FixedRemote {
        pub fn new(geometry: Vec<Coordinate>) -> Self {
            Self { geometry, calls: Mutex::new(Vec::new()) }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RemoteRouter for FixedRemote {
        async fn route(&self, waypoints: &[Coordinate], profile: &str) -> Result<Vec<Coordinate>, RemoteError> {
            self.calls.lock().unwrap().push((waypoints.to_vec(), profile.to_owned()));
            Ok(self.geometry.clone())
        }
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod request {
    use nav_core::{Coordinate, TransportMode};

    use crate::RouteRequest;

    #[test]
    fn chain_orders_waypoints() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.1);
        let c = Coordinate::new(0.0, 0.2);
        let d = Coordinate::new(0.0, 0.3);
        let req = RouteRequest::new(a, d).with_waypoints(vec![b, c]);
        assert_eq!(req.chain(), vec![a, b, c, d]);
    }

    #[test]
    fn missing_mode_defaults() {
        let req = RouteRequest::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        assert_eq!(req.mode(), TransportMode::default());
        assert_eq!(req.with_mode(TransportMode::Walk).mode(), TransportMode::Walk);
    }
}

// ── Fallback behaviour ────────────────────────────────────────────────────────

#[cfg(test)]
mod fallback {
    use std::time::Duration;

    use nav_core::AcquisitionConfig;
    use nav_spatial::{AStarPathfinder, RouteSource};

    use super::helpers::*;
    use crate::{OfflineOnly, RemoteError, RemoteRouter, RouteOrchestrator};

    #[tokio::test]
    async fn every_failure_class_falls_back() {
        let failures = [
            RemoteError::Transport("connection refused".into()),
            RemoteError::Status(503),
            RemoteError::Malformed("expected value".into()),
            RemoteError::EmptyRoute,
            RemoteError::Offline,
        ];
        let req = town_request();
        for failure in failures {
            let orch = RouteOrchestrator::new(
                town(),
                AStarPathfinder,
                FailingRemote(failure.clone()),
                &AcquisitionConfig::default(),
            );
            let route = orch.acquire(&req).await;
            assert_eq!(route.source(), RouteSource::Offline, "{failure}");
            assert_eq!(route.first(), Some(req.start));
            assert_eq!(route.last(), Some(req.end));
            assert!(route.points().contains(&req.waypoints[0]));
            assert!(no_consecutive_duplicates(route.points()), "{failure}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_remote_times_out() {
        let orch = RouteOrchestrator::new(
            town(),
            AStarPathfinder,
            SlowRemote(Duration::from_secs(30)),
            &AcquisitionConfig::default(),
        )
        .with_timeout(Duration::from_millis(50));
        let req = town_request();
        let route = orch.acquire(&req).await;
        assert_eq!(route.source(), RouteSource::Offline);
        assert_eq!(route.first(), Some(req.start));
        assert_eq!(route.last(), Some(req.end));
    }

    #[tokio::test(start_paused = true)]
    async fn remote_within_time_box_is_used() {
        let orch = RouteOrchestrator::new(
            town(),
            AStarPathfinder,
            SlowRemote(Duration::from_millis(20)),
            &AcquisitionConfig::default(),
        )
        .with_timeout(Duration::from_millis(500));
        let route = orch.acquire(&town_request()).await;
        assert_eq!(route.source(), RouteSource::Online);
    }

    #[tokio::test]
    async fn empty_geometry_falls_back() {
        let orch = RouteOrchestrator::new(
            town(),
            AStarPathfinder,
            FixedRemote::new(Vec::new()),
            &AcquisitionConfig::default(),
        );
        let route = orch.acquire(&town_request()).await;
        assert_eq!(route.source(), RouteSource::Offline);
    }

    #[tokio::test]
    async fn offline_flag_skips_remote() {
        let req = town_request();
        let orch = RouteOrchestrator::new(
            town(),
            AStarPathfinder,
            FixedRemote::new(vec![req.start, req.end]),
            &AcquisitionConfig::default(),
        );
        orch.set_online(false);
        let route = orch.acquire(&req).await;
        assert_eq!(route.source(), RouteSource::Offline);
        assert_eq!(orch.remote().call_count(), 0);
    }

    #[tokio::test]
    async fn offline_only_remote_reports_offline() {
        let result = OfflineOnly.route(&[], "driving").await;
        assert_eq!(result, Err(RemoteError::Offline));
    }
}

// ── Online success ────────────────────────────────────────────────────────────

#[cfg(test)]
mod online {
    use nav_core::{AcquisitionConfig, Coordinate, TransportMode};
    use nav_spatial::{AStarPathfinder, RouteSource};

    use super::helpers::*;
    use crate::{OfflineOnly, RemoteRouter, RouteOrchestrator};

    #[tokio::test]
    async fn boxed_router_selected_at_runtime() {
        let req = town_request();
        let pick = |online: bool| -> Box<dyn RemoteRouter> {
            if online {
                Box::new(FixedRemote::new(vec![req.start, at("harbour"), req.end]))
            } else {
                Box::new(OfflineOnly)
            }
        };
        for (online, expected) in [(true, RouteSource::Online), (false, RouteSource::Offline)] {
            let orch = RouteOrchestrator::new(town(), AStarPathfinder, pick(online), &AcquisitionConfig::default());
            assert_eq!(orch.acquire(&req).await.source(), expected);
        }
    }

    #[tokio::test]
    async fn geometry_gets_exact_endpoints() {
        let req = town_request().with_mode(TransportMode::Walk);
        // Service snapped both ends onto its own roads.
        let snapped_start = req.start.destination(4.0, 90.0);
        let mid = at("town_hall");
        let snapped_end = req.end.destination(3.0, 270.0);
        let remote = FixedRemote::new(vec![snapped_start, mid, snapped_end]);
        let orch = RouteOrchestrator::new(town(), AStarPathfinder, remote, &AcquisitionConfig::default());

        let route = orch.acquire(&req).await;
        assert_eq!(route.source(), RouteSource::Online);
        assert_eq!(route.points(), &[req.start, snapped_start, mid, snapped_end, req.end]);

        let calls = orch.remote().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, req.chain());
        assert_eq!(calls[0].1, "walking");
    }

    #[tokio::test]
    async fn geometry_already_on_endpoints_is_untouched() {
        let req = town_request();
        let geometry: Vec<Coordinate> = vec![req.start, at("chapel"), req.end];
        let orch = RouteOrchestrator::new(
            town(),
            AStarPathfinder,
            FixedRemote::new(geometry.clone()),
            &AcquisitionConfig::default(),
        );
        let route = orch.acquire(&req).await;
        assert_eq!(route.points(), geometry.as_slice());
        // No mode given: driving profile.
        assert_eq!(orch.remote().calls.lock().unwrap()[0].1, "driving");
    }
}

// ── Offline planning ──────────────────────────────────────────────────────────

#[cfg(test)]
mod offline {
    use std::sync::Arc;

    use nav_core::Coordinate;
    use nav_spatial::{RouteSource, RoutingPreferences, TopologyGraph};

    use super::helpers::*;
    use crate::{RouteOrchestrator, RouteRequest};

    #[tokio::test]
    async fn acquisition_is_idempotent() {
        let orch = RouteOrchestrator::offline(town());
        let req = town_request().with_prefs(RoutingPreferences { prefer_paved: true, ..Default::default() });
        let first = orch.acquire(&req).await;
        let second = orch.acquire(&req).await;
        assert_eq!(first, second);
    }

    #[test]
    fn junctions_are_not_duplicated() {
        let orch = RouteOrchestrator::offline(town());
        let req = RouteRequest::new(at("north_gate"), at("orchard"))
            .with_waypoints(vec![at("school"), at("town_hall"), at("ridge_top")]);
        let points = orch.plan_offline(&req);

        assert!(no_consecutive_duplicates(&points));
        for wp in req.chain() {
            let hits = points.iter().filter(|&&p| p == wp).count();
            assert_eq!(hits, 1, "{wp} appears {hits} times");
        }
        // Chain order is respected.
        let idx = |c: Coordinate| points.iter().position(|&p| p == c).unwrap();
        assert!(idx(at("school")) < idx(at("town_hall")));
        assert!(idx(at("town_hall")) < idx(at("ridge_top")));
    }

    #[test]
    fn repeated_waypoint_collapses() {
        let a = Coordinate::new(30.69, -88.05);
        let w = Coordinate::new(30.70, -88.05);
        let b = Coordinate::new(30.71, -88.05);
        let req = RouteRequest::new(a, b).with_waypoints(vec![w, w]);

        let direct = RouteOrchestrator::offline(Arc::new(TopologyGraph::empty()));
        assert_eq!(direct.plan_offline(&req), vec![a, w, b]);

        let orch = RouteOrchestrator::offline(town());
        let req = RouteRequest::new(at("north_gate"), at("boatyard"))
            .with_waypoints(vec![at("market_square"), at("market_square")]);
        let points = orch.plan_offline(&req);
        assert!(no_consecutive_duplicates(&points));
        assert_eq!(points.iter().filter(|&&p| p == at("market_square")).count(), 1);
    }

    #[test]
    fn empty_graph_yields_direct_chain() {
        let orch = RouteOrchestrator::offline(Arc::new(TopologyGraph::empty()));
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.01);
        let c = Coordinate::new(0.01, 0.01);
        let req = RouteRequest::new(a, c).with_waypoints(vec![b]);
        assert_eq!(orch.plan_offline(&req), vec![a, b, c]);
    }

    #[tokio::test]
    async fn spawned_acquisition_delivers() {
        let orch = Arc::new(RouteOrchestrator::offline(town()));
        let req = town_request();
        let rx = orch.spawn_acquire(req.clone());
        let route = rx.await.unwrap();
        assert_eq!(route.source(), RouteSource::Offline);
        assert_eq!(route.first(), Some(req.start));
        assert_eq!(route.last(), Some(req.end));
    }
}

// ── OSRM response parsing ─────────────────────────────────────────────────────

#[cfg(all(test, feature = "osrm"))]
mod osrm {
    use nav_core::Coordinate;

    use crate::{OsrmRouter, RemoteError, parse_osrm_body};

    #[test]
    fn parses_geojson_lon_lat() {
        let body = r#"{"code":"Ok","routes":[{"geometry":{"type":"LineString",
            "coordinates":[[-88.05,30.694],[-88.0475,30.692]]},"distance":312.4}]}"#;
        let points = parse_osrm_body(body).unwrap();
        assert_eq!(points, vec![Coordinate::new(30.694, -88.05), Coordinate::new(30.692, -88.0475)]);
    }

    #[test]
    fn no_route_is_empty() {
        assert_eq!(parse_osrm_body(r#"{"code":"NoRoute","routes":[]}"#), Err(RemoteError::EmptyRoute));
        assert_eq!(parse_osrm_body(r#"{"code":"Ok","routes":[]}"#), Err(RemoteError::EmptyRoute));
        assert_eq!(
            parse_osrm_body(r#"{"code":"Ok","routes":[{"geometry":{"coordinates":[]}}]}"#),
            Err(RemoteError::EmptyRoute)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(parse_osrm_body("<html>"), Err(RemoteError::Malformed(_))));
        assert!(matches!(
            parse_osrm_body(r#"{"code":"InvalidQuery"}"#),
            Err(RemoteError::Malformed(_))
        ));
    }

    #[test]
    fn request_url_shape() {
        let router = OsrmRouter::new("http://localhost:5000/").unwrap();
        let url = router.request_url(
            &[Coordinate::new(30.694, -88.05), Coordinate::new(30.69, -88.0425)],
            "cycling",
        );
        assert_eq!(
            url,
            "http://localhost:5000/route/v1/cycling/-88.050000,30.694000;-88.042500,30.690000\
             ?overview=full&geometries=geojson"
        );
    }
}
