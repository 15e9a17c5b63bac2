//! CSV trace backend.
//!
//! Creates two files in the output directory:
//! - `trace.csv`: one row per tick
//! - `routes.csv`: one row per point of every installed route

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, RouteRow, TraceRow};

pub const TRACE_HEADER: [&str; 11] = [
    "tick",
    "unix_time_secs",
    "lat",
    "lon",
    "heading_deg",
    "speed_mps",
    "next_waypoint",
    "strategy",
    "maneuver",
    "maneuver_distance_m",
    "eta_secs",
];

pub const ROUTE_HEADER: [&str; 6] = ["route_id", "tick", "seq", "lat", "lon", "source"];

pub struct CsvTraceWriter {
    trace:  Writer<File>,
    routes: Writer<File>,
}

impl CsvTraceWriter {
    /// Create both files in `dir` (which must exist) and write their headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join("trace.csv"))?;
        trace.write_record(TRACE_HEADER)?;

        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record(ROUTE_HEADER)?;

        Ok(Self { trace, routes })
    }
}

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map(|v| format!("{v:.precision$}")).unwrap_or_default()
}

impl TraceWriter for CsvTraceWriter {
    fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()> {
        self.trace.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.unix_time_secs),
            format!("{:.7}", row.lat),
            format!("{:.7}", row.lon),
            format!("{:.2}", row.heading_deg),
            format!("{:.3}", row.speed_mps),
            row.next_waypoint.to_string(),
            row.strategy.to_owned(),
            row.maneuver.to_owned(),
            opt(row.maneuver_distance_m, 1),
            opt(row.eta_secs, 1),
        ])?;
        Ok(())
    }

    fn write_route(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.route_id.to_string(),
                row.tick.to_string(),
                row.seq.to_string(),
                format!("{:.7}", row.lat),
                format!("{:.7}", row.lon),
                row.source.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.trace.flush()?;
        self.routes.flush()?;
        Ok(())
    }
}
