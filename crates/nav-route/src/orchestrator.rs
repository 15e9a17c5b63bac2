//! Network-first, offline-fallback route acquisition.
//!
//! # Policy
//!
//! 1. If the orchestrator is flagged offline, go straight to step 3.
//! 2. Otherwise make **one** remote request carrying the whole waypoint chain,
//!    bounded by `tokio::time::timeout`.  Any failure (timeout, transport,
//!    HTTP status, malformed or empty payload) is logged and treated as
//!    "online routing unavailable".
//! 3. Offline: plan each leg (`start→wp1`, `wp1→wp2`, …, `wpN→end`) with the
//!    pathfinder and concatenate, dropping each later leg's first point since
//!    it repeats the previous leg's last point.
//!
//! [`RouteOrchestrator::acquire`] never fails: the worst case is a chain of
//! direct lines through the requested points.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::oneshot;

use nav_core::{AcquisitionConfig, Coordinate};
use nav_spatial::{AStarPathfinder, Pathfinder, Route, RouteSource, RoutingPreferences, TopologyGraph};

use crate::remote::{OfflineOnly, RemoteRouter};
use crate::{RemoteError, RouteRequest};

pub struct RouteOrchestrator<P = AStarPathfinder, R = OfflineOnly> {
    graph:      Arc<TopologyGraph>,
    pathfinder: P,
    remote:     R,
    online:     AtomicBool,
    timeout:    Duration,
}

impl RouteOrchestrator {
    /// Offline-only orchestrator over `graph` with the default A* pathfinder.
    pub fn offline(graph: Arc<TopologyGraph>) -> Self {
        let mut orch = Self::new(graph, AStarPathfinder, OfflineOnly, &AcquisitionConfig::default());
        orch.online = AtomicBool::new(false);
        orch
    }
}

impl<P: Pathfinder, R: RemoteRouter> RouteOrchestrator<P, R> {
    /// Starts in the online state.
    pub fn new(graph: Arc<TopologyGraph>, pathfinder: P, remote: R, config: &AcquisitionConfig) -> Self {
        Self {
            graph,
            pathfinder,
            remote,
            online:  AtomicBool::new(true),
            timeout: Duration::from_millis(config.remote_timeout_ms),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Record whether network connectivity is believed to be available.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Acquire a route for `request`.  Always returns a non-empty route that
    /// starts at `request.start` and ends at `request.end`.
    pub async fn acquire(&self, request: &RouteRequest) -> Route {
        if self.is_online() {
            match self.acquire_online(request).await {
                Ok(points) => {
                    info!("online route: {} points via '{}'", points.len(), request.mode().profile());
                    return Route::new(points, RouteSource::Online);
                }
                Err(e) => warn!("online routing unavailable ({e}); using offline graph"),
            }
        } else {
            debug!("offline; skipping remote routing");
        }
        Route::new(self.plan_offline(request), RouteSource::Offline)
    }

    async fn acquire_online(&self, request: &RouteRequest) -> Result<Vec<Coordinate>, RemoteError> {
        let chain = request.chain();
        let call = self.remote.route(&chain, request.mode().profile());
        let points = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RemoteError::Timeout)??;
        if points.is_empty() {
            return Err(RemoteError::EmptyRoute);
        }
        Ok(pin_endpoints(points, request.start, request.end))
    }

    /// Offline route through the whole waypoint chain.
    pub fn plan_offline(&self, request: &RouteRequest) -> Vec<Coordinate> {
        let chain = request.chain();
        let legs = self.plan_legs(&chain, &request.prefs);
        stitch_legs(legs)
    }

    #[cfg(not(feature = "parallel"))]
    fn plan_legs(&self, chain: &[Coordinate], prefs: &RoutingPreferences) -> Vec<Vec<Coordinate>> {
        chain
            .windows(2)
            .enumerate()
            .map(|(i, pair)| self.plan_leg(i, pair[0], pair[1], prefs))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn plan_legs(&self, chain: &[Coordinate], prefs: &RoutingPreferences) -> Vec<Vec<Coordinate>> {
        use rayon::prelude::*;

        // Indexed collect keeps leg order.
        chain
            .par_windows(2)
            .enumerate()
            .map(|(i, pair)| self.plan_leg(i, pair[0], pair[1], prefs))
            .collect()
    }

    fn plan_leg(&self, i: usize, from: Coordinate, to: Coordinate, prefs: &RoutingPreferences) -> Vec<Coordinate> {
        let leg = self.pathfinder.plan(&self.graph, from, to, prefs);
        debug!("leg {i}: {from} -> {to}, {} points", leg.len());
        leg
    }
}

impl<P, R> RouteOrchestrator<P, R>
where
    P: Pathfinder + 'static,
    R: RemoteRouter + 'static,
{
    /// Run [`acquire`](Self::acquire) on a tokio task.
    ///
    /// The live loop polls the receiver between ticks and keeps following its
    /// previous route until the new one arrives.  Must be called from within
    /// a tokio runtime.
    pub fn spawn_acquire(self: &Arc<Self>, request: RouteRequest) -> oneshot::Receiver<Route> {
        let (tx, rx) = oneshot::channel();
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let route = this.acquire(&request).await;
            if tx.send(route).is_err() {
                debug!("route receiver dropped before delivery");
            }
        });
        rx
    }
}

/// Make an online geometry start at `start` and end at `end`.
///
/// Services snap to their own road network; the live loop measures against
/// the caller's exact request points.
fn pin_endpoints(mut points: Vec<Coordinate>, start: Coordinate, end: Coordinate) -> Vec<Coordinate> {
    if points.first() != Some(&start) {
        points.insert(0, start);
    }
    if points.last() != Some(&end) {
        points.push(end);
    }
    points
}

/// Concatenate legs, dropping every later leg's first point.  A repeated
/// waypoint yields a zero-length leg; its points are never appended twice
/// in a row.
fn stitch_legs(legs: Vec<Vec<Coordinate>>) -> Vec<Coordinate> {
    let mut route: Vec<Coordinate> = Vec::with_capacity(legs.iter().map(Vec::len).sum());
    for (i, leg) in legs.into_iter().enumerate() {
        let skip = usize::from(i > 0);
        for point in leg.into_iter().skip(skip) {
            if route.last() != Some(&point) {
                route.push(point);
            }
        }
    }
    route
}
