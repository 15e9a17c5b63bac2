//! Observer trait for the live loop.

use nav_core::Tick;
use nav_spatial::Route;

use crate::NavigationSnapshot;

/// Callbacks invoked by [`Navigator::run_ticks`][crate::Navigator::run_ticks].
///
/// All methods default to no-ops.
pub trait NavObserver {
    /// Called when a route (direct or pending) was installed during `tick`,
    /// before `on_tick` for the same tick.
    fn on_route_installed(&mut self, _tick: Tick, _route: &Route) {}

    /// Called after every tick with the resulting snapshot.
    fn on_tick(&mut self, _tick: Tick, _now_unix_secs: f64, _snapshot: &NavigationSnapshot) {}

    /// Called once on the tick the destination is reached.
    fn on_arrival(&mut self, _tick: Tick, _snapshot: &NavigationSnapshot) {}

    /// Called once after the last tick of a run.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`NavObserver`] that does nothing.
pub struct NoopObserver;

impl NavObserver for NoopObserver {}
