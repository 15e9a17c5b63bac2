//! `nav-live` — the live navigation loop.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                    |
//! |--------------------|-------------------------------------------------------------|
//! | [`navigator`]      | `Navigator` — strategy selection, route install, tick loop  |
//! | [`state`]          | `NavigationSnapshot`, `UpdateStrategy`, maneuver types      |
//! | [`steering`]       | Dual-lookahead speed and heading control                    |
//! | [`dead_reckoning`] | Accelerometer/compass position estimate                     |
//! | [`maneuver`]       | Next-turn detection and announcement text                   |
//! | [`eta`]            | `Eta`                                                       |
//! | [`sensors`]        | `SensorFrame`, `Calibration`, `SensorSource`                |
//! | [`observer`]       | `NavObserver`, `NoopObserver`                               |
//!
//! # Tick model
//!
//! The loop is single-threaded.  Each tick carries its own measured `dt`;
//! nothing assumes a fixed rate.  Route acquisition runs elsewhere and hands
//! over a whole route through a oneshot channel, polled at the start of
//! every tick.

pub mod dead_reckoning;
pub mod eta;
pub mod maneuver;
pub mod navigator;
pub mod observer;
pub mod sensors;
pub mod state;
pub mod steering;


pub use eta::Eta;
pub use navigator::Navigator;
pub use observer::{NavObserver, NoopObserver};
pub use sensors::{Calibration, NoSensors, PositionFix, SensorFrame, SensorSource};
pub use state::{ManeuverDescriptor, ManeuverKind, NavigationSnapshot, UpdateStrategy};
