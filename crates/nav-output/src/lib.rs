//! `nav-output` — navigation trace writers.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`row`]      | `TraceRow`, `RouteRow`                                |
//! | [`writer`]   | `TraceWriter` trait                                   |
//! | [`csv`]      | `CsvTraceWriter` (`trace.csv`, `routes.csv`)          |
//! | [`observer`] | `TraceObserver` — a `NavObserver` driving any writer  |
//!
//! # Usage
//!
//! ```rust,ignore
//! let writer = CsvTraceWriter::new(Path::new("./out"))?;
//! let mut obs = TraceObserver::new(writer);
//! navigator.run_ticks(&mut clock, 600, 0.1, &mut sensors, &mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("trace error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{RouteRow, TraceRow};
pub use writer::TraceWriter;
