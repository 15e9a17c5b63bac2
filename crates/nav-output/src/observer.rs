//! `TraceObserver<W>`: bridges `NavObserver` to a `TraceWriter`.

use nav_core::Tick;
use nav_live::{NavObserver, NavigationSnapshot};
use nav_spatial::Route;

use crate::row::{RouteRow, TraceRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`NavObserver`] that records every tick and every installed route.
///
/// Writer errors are stored because observer hooks return nothing; check
/// [`take_error`](Self::take_error) after the run.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    /// Record every `stride`-th tick (1 = every tick).
    stride:     u64,
    next_route: u32,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, stride: 1, next_route: 0, last_error: None }
    }

    pub fn with_stride(mut self, stride: u64) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> NavObserver for TraceObserver<W> {
    fn on_route_installed(&mut self, tick: Tick, route: &Route) {
        let route_id = self.next_route;
        self.next_route += 1;
        let source = route.source().as_str();
        let rows: Vec<RouteRow> = route
            .points()
            .iter()
            .enumerate()
            .map(|(seq, p)| RouteRow {
                route_id,
                tick: tick.0,
                seq: seq as u32,
                lat: p.lat,
                lon: p.lon,
                source,
            })
            .collect();
        let result = self.writer.write_route(&rows);
        self.store_err(result);
    }

    fn on_tick(&mut self, tick: Tick, now_unix_secs: f64, snapshot: &NavigationSnapshot) {
        if !tick.0.is_multiple_of(self.stride) {
            return;
        }
        let row = TraceRow {
            tick:                tick.0,
            unix_time_secs:      now_unix_secs,
            lat:                 snapshot.position.lat,
            lon:                 snapshot.position.lon,
            heading_deg:         snapshot.heading_deg(),
            speed_mps:           snapshot.speed_mps,
            next_waypoint:       snapshot.next_waypoint_index as u64,
            strategy:            snapshot.strategy.as_str(),
            maneuver:            snapshot.maneuver.as_ref().map_or("", |m| m.kind.as_str()),
            maneuver_distance_m: snapshot.maneuver.as_ref().map(|m| m.distance_m),
            eta_secs:            snapshot.eta.map(|e| e.duration_secs),
        };
        let result = self.writer.write_trace(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.flush();
        self.store_err(result);
    }
}
