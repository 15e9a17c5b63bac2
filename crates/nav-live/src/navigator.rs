//! The `Navigator` and its tick loop.

use log::{debug, info, warn};
use tokio::sync::oneshot::{self, error::TryRecvError};

use nav_core::{Coordinate, NavClock, NavConfig, Tick, TransportMode, signed_angle_delta};
use nav_spatial::Route;

use crate::dead_reckoning::dead_reckon;
use crate::maneuver::next_maneuver;
use crate::sensors::{Calibration, SensorFrame, SensorSource};
use crate::steering::follow_route;
use crate::{Eta, NavObserver, NavigationSnapshot, UpdateStrategy};

/// Owns all per-tick navigation state.
///
/// Nothing outside the navigator mutates its state.  New routes arrive either
/// directly through [`install_route`](Self::install_route) or through a
/// pending receiver registered with [`await_route`](Self::await_route), which
/// [`step`](Self::step) polls without blocking.  Installation replaces the
/// route and resets the waypoint index in one place, between ticks.
pub struct Navigator {
    config:      NavConfig,
    mode:        TransportMode,
    calibration: Calibration,
    route:       Option<Route>,
    pending:     Option<oneshot::Receiver<Route>>,
    /// Bumped on every installation so `run_ticks` can notify observers.
    route_generation: u64,
    navigating:  bool,
    snapshot:    NavigationSnapshot,
}

impl Navigator {
    /// A stationary navigator at `position` with no route.
    pub fn new(config: NavConfig, mode: TransportMode, position: Coordinate) -> Self {
        Self {
            config,
            mode,
            calibration:      Calibration::default(),
            route:            None,
            pending:          None,
            route_generation: 0,
            navigating:       false,
            snapshot:         NavigationSnapshot::at(position),
        }
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Initial accumulated heading.
    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.snapshot.heading_acc_deg = heading_deg;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> &NavigationSnapshot {
        &self.snapshot
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    pub fn has_pending_route(&self) -> bool {
        self.pending.is_some()
    }

    // ── Control ───────────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: TransportMode) {
        self.mode = mode;
    }

    pub fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }

    pub fn start_navigation(&mut self) {
        self.navigating = true;
    }

    pub fn stop_navigation(&mut self) {
        self.navigating = false;
        self.snapshot.maneuver = None;
        self.snapshot.eta = None;
    }

    /// Replace the current route and start navigating it from index 1.
    pub fn install_route(&mut self, route: Route) {
        info!(
            "installing {} route: {} points, {:.0} m",
            route.source().as_str(),
            route.len(),
            route.total_length_m()
        );
        self.route = Some(route);
        self.snapshot.next_waypoint_index = 1;
        self.snapshot.arrived = false;
        self.navigating = true;
        self.route_generation += 1;
    }

    /// Drop the current route.  A pending route is left alone.
    pub fn clear_route(&mut self) {
        self.route = None;
        self.snapshot.next_waypoint_index = 0;
        self.snapshot.arrived = false;
        self.snapshot.maneuver = None;
        self.snapshot.eta = None;
    }

    /// Register a route still being acquired.  Replaces any earlier pending
    /// receiver; the current route stays in use until this one arrives.
    pub fn await_route(&mut self, receiver: oneshot::Receiver<Route>) {
        if self.pending.replace(receiver).is_some() {
            debug!("superseding an unfinished route request");
        }
    }

    /// Install the pending route if it has arrived.  Returns `true` if a
    /// route was installed.
    pub fn poll_pending(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else { return false };
        match rx.try_recv() {
            Ok(route) => {
                self.pending = None;
                self.install_route(route);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                warn!("route request was dropped without a result");
                self.pending = None;
                false
            }
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Strategy for a tick carrying `frame`.
    pub fn select_strategy(&self, frame: &SensorFrame) -> UpdateStrategy {
        if self.route.is_some() && self.navigating && !self.snapshot.arrived {
            UpdateStrategy::FollowRoute
        } else if frame.fix.is_some() {
            UpdateStrategy::Idle
        } else {
            UpdateStrategy::DeadReckon
        }
    }

    /// Advance the estimate by one tick lasting `dt` seconds.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn step(&mut self, dt: f64, now_unix_secs: f64, frame: &SensorFrame) -> &NavigationSnapshot {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        self.poll_pending();

        let strategy = self.select_strategy(frame);
        match strategy {
            UpdateStrategy::FollowRoute => self.follow(dt),
            UpdateStrategy::DeadReckon  => self.dead_reckon(dt, frame),
            UpdateStrategy::Idle        => self.adopt_fix(frame),
        }
        self.snapshot.strategy = strategy;
        self.update_guidance(now_unix_secs);
        &self.snapshot
    }

    /// Run `n` ticks of `dt` seconds, pulling frames from `source` and
    /// reporting to `observer`.
    pub fn run_ticks<S: SensorSource, O: NavObserver>(
        &mut self,
        clock:    &mut NavClock,
        n:        u64,
        dt:       f64,
        source:   &mut S,
        observer: &mut O,
    ) {
        for _ in 0..n {
            let tick: Tick = clock.current_tick;
            let frame = source.next_frame(tick);
            clock.advance(dt);
            let now = clock.now_unix_secs();

            let generation = self.route_generation;
            let was_arrived = self.snapshot.arrived;
            self.step(dt, now, &frame);

            if self.route_generation != generation {
                if let Some(route) = &self.route {
                    observer.on_route_installed(tick, route);
                }
            }
            observer.on_tick(tick, now, &self.snapshot);
            if self.snapshot.arrived && !was_arrived {
                observer.on_arrival(tick, &self.snapshot);
            }
        }
        observer.on_run_end(clock.current_tick);
    }

    // ── Strategies ────────────────────────────────────────────────────────

    fn follow(&mut self, dt: f64) {
        let Some(route) = self.route.as_ref() else { return };
        let nominal = self.mode.nominal_speed_mps();
        follow_route(&self.config.steering, route, &mut self.snapshot, nominal, dt);

        let remaining = route.remaining_m(self.snapshot.position, self.snapshot.next_waypoint_index);
        if remaining < self.config.maneuver.arrival_threshold_m
            || self.snapshot.next_waypoint_index >= route.len()
        {
            self.snapshot.arrived = true;
            self.snapshot.speed_mps = 0.0;
            info!("arrived at {} ({remaining:.1} m short)", self.snapshot.position);
        }
    }

    fn dead_reckon(&mut self, dt: f64, frame: &SensorFrame) {
        let compass = self.calibration.heading(frame.heading_deg);
        let accel = self.calibration.accel(frame.accel);
        dead_reckon(&self.config.dead_reckoning, &mut self.snapshot, compass, accel, dt);
    }

    /// Take position and speed from the fix; heading from the fix, else the
    /// compass, else unchanged.
    fn adopt_fix(&mut self, frame: &SensorFrame) {
        let Some(fix) = frame.fix else { return };
        self.snapshot.position = fix.position;
        self.snapshot.speed_mps = fix.speed_mps.filter(|s| s.is_finite()).unwrap_or(0.0).max(0.0);
        let heading = fix
            .heading_deg
            .filter(|h| h.is_finite())
            .or_else(|| {
                frame
                    .heading_deg
                    .filter(|h| h.is_finite())
                    .map(|h| self.calibration.heading(Some(h)))
            });
        if let Some(h) = heading {
            self.snapshot.heading_acc_deg += signed_angle_delta(self.snapshot.heading_acc_deg, h);
        }
    }

    /// Maneuver and ETA, whenever a route is being navigated.
    fn update_guidance(&mut self, now_unix_secs: f64) {
        let Some(route) = self.route.as_ref().filter(|_| self.navigating) else {
            self.snapshot.maneuver = None;
            self.snapshot.eta = None;
            return;
        };
        let pos = self.snapshot.position;
        let idx = self.snapshot.next_waypoint_index;
        // Arrival implies the remaining distance or index condition that
        // makes this an `Arrive` maneuver.
        self.snapshot.maneuver = Some(next_maneuver(&self.config.maneuver, route, pos, idx));
        self.snapshot.eta = Some(Eta::estimate(
            route.remaining_m(pos, idx),
            self.snapshot.speed_mps,
            self.mode.nominal_speed_mps(),
            self.config.maneuver.stall_speed_mps,
            now_unix_secs,
        ));
    }
}
