//! offline_drive — end-to-end run of the navigation engine.
//!
//! Plans a multi-stop route across the built-in harbour-town topology (or a
//! pair of topology CSVs), drives it with the live loop until arrival, then
//! lets the user walk on with positioning lost so the dead-reckoning path
//! takes over.  Every tick is written to `trace.csv` and each installed
//! route to `routes.csv` in the output directory.
//!
//! ```text
//! cargo run -p offline_drive -- --from north_gate --via market_square,harbour --to orchard
//! cargo run -p offline_drive --features online -- --online --config nav.json
//! ```

mod scenario;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use nav_core::{Coordinate, NavClock, NavConfig, TransportMode};
use nav_live::{Navigator, NoSensors};
use nav_output::{CsvTraceWriter, TraceObserver};
use nav_route::{OfflineOnly, RemoteRouter, RouteOrchestrator, RouteRequest};
use nav_spatial::{AStarPathfinder, RoutingPreferences, TopologyGraph, default_topology, load_topology_csv};

use scenario::Console;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Ticks per `run_ticks` call while driving; arrival is checked in between.
const DRIVE_CHUNK_TICKS: u64 = 50;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a planned route through the navigation engine")]
struct Args {
    /// JSON configuration file.  Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Topology nodes CSV (`name,lat,lon`).
    #[arg(long, requires = "roads")]
    nodes: Option<PathBuf>,

    /// Topology roads CSV (`from,to,surface,hilly`).
    #[arg(long, requires = "nodes")]
    roads: Option<PathBuf>,

    /// Named junction to start from.
    #[arg(long, default_value = "north_gate")]
    from: String,

    /// Named junction to drive to.
    #[arg(long, default_value = "orchard")]
    to: String,

    /// Intermediate junctions, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "market_square,harbour")]
    via: Vec<String>,

    /// walk, bike, or car.
    #[arg(long, default_value = "car")]
    mode: TransportMode,

    #[arg(long)]
    prefer_paved: bool,

    #[arg(long)]
    avoid_hills: bool,

    /// Penalise paved main roads.
    #[arg(long)]
    no_highways: bool,

    /// Ask the remote routing service first (needs the `online` feature).
    #[arg(long)]
    online: bool,

    /// Seconds per tick.
    #[arg(long, default_value_t = 0.1)]
    dt: f64,

    /// Upper bound on ticks spent waiting for the route and driving it.
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,

    /// Ticks of dead reckoning after arrival.
    #[arg(long, default_value_t = 300)]
    walk_ticks: u64,

    /// Write one trace row every N ticks.
    #[arg(long, default_value_t = 1)]
    trace_stride: u64,

    /// Output directory for trace.csv and routes.csv.
    #[arg(long, default_value = "./out")]
    out: PathBuf,
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!("offline_drive — navigation engine demo");
    println!("  mode: {}  dt: {} s  out: {}", args.mode, args.dt, args.out.display());
    println!();

    // 1. Configuration.
    let config = load_config(args.config.as_deref())?;
    config.validate().context("invalid configuration")?;

    // 2. Topology.
    let graph = Arc::new(match (&args.nodes, &args.roads) {
        (Some(nodes), Some(roads)) => load_topology_csv(nodes, roads)
            .with_context(|| format!("loading topology from {} and {}", nodes.display(), roads.display()))?,
        _ => default_topology()?,
    });
    info!("topology: {} junctions, {} roads", graph.node_count(), graph.road_count());

    // 3. Route request.
    let start = junction(&graph, &args.from)?;
    let end = junction(&graph, &args.to)?;
    let via = args
        .via
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| junction(&graph, name.trim()))
        .collect::<Result<Vec<_>>>()?;
    let prefs = RoutingPreferences {
        prefer_paved:   args.prefer_paved,
        avoid_hills:    args.avoid_hills,
        allow_highways: !args.no_highways,
    };
    let first_target = via.first().copied().unwrap_or(end);
    let request = RouteRequest::new(start, end)
        .with_waypoints(via)
        .with_mode(args.mode)
        .with_prefs(prefs);

    // 4. Acquisition runs in the background while the loop ticks.
    let orchestrator = Arc::new(RouteOrchestrator::new(
        Arc::clone(&graph),
        AStarPathfinder,
        remote_router(&args, &config)?,
        &config.acquisition,
    ));
    orchestrator.set_online(args.online && cfg!(feature = "online"));

    let mut navigator = Navigator::new(config, args.mode, start).with_heading(start.bearing_deg(first_target));
    navigator.await_route(orchestrator.spawn_acquire(request));

    // 5. Output.
    std::fs::create_dir_all(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    let writer = CsvTraceWriter::new(&args.out)?;
    let mut console = Console::new(TraceObserver::new(writer).with_stride(args.trace_stride));

    let start_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    let mut clock = NavClock::new(start_unix);
    let wall = Instant::now();

    // 6. Parked at the start until the route lands, ticking in real time.
    let mut ticker = tokio::time::interval(Duration::from_secs_f64(args.dt.max(0.001)));
    let mut parked = scenario::parked(start);
    while navigator.has_pending_route() && clock.current_tick.0 < args.max_ticks {
        ticker.tick().await;
        navigator.run_ticks(&mut clock, 1, args.dt, &mut parked, &mut console);
    }
    if navigator.route().is_none() {
        anyhow::bail!("no route was delivered within {} ticks", args.max_ticks);
    }

    // 7. Drive.
    let mut no_sensors = NoSensors;
    while !navigator.snapshot().arrived && clock.current_tick.0 < args.max_ticks {
        navigator.run_ticks(&mut clock, DRIVE_CHUNK_TICKS, args.dt, &mut no_sensors, &mut console);
    }
    let arrived_at = console.arrived_at;
    let arrival_pos = navigator.snapshot().position;
    if arrived_at.is_none() {
        warn!("stopped after {} ticks without arriving", clock.current_tick.0);
    }

    // 8. Positioning drops; walk on by compass and accelerometer.
    let walk_heading = navigator.snapshot().heading_deg();
    let mut walking = scenario::walking(walk_heading);
    navigator.run_ticks(&mut clock, args.walk_ticks, args.dt, &mut walking, &mut console);
    let walked_m = arrival_pos.distance_m(navigator.snapshot().position);

    if let Some(e) = console.inner.take_error() {
        return Err(e).context("writing trace output");
    }

    // 9. Summary.
    let route = navigator.route();
    println!();
    println!("Run complete in {:.2?} ({} ticks, {:.1} s simulated)", wall.elapsed(), clock.current_tick.0, clock.elapsed_secs);
    if let Some(route) = route {
        println!(
            "  route:    {} geometry, {} points, {:.0} m",
            route.source().as_str(),
            route.len(),
            route.total_length_m(),
        );
    }
    match arrived_at {
        Some(tick) => println!("  arrived:  {tick} at {arrival_pos}"),
        None => println!("  arrived:  no (last position {arrival_pos})"),
    }
    println!("  walked:   {walked_m:.1} m heading {walk_heading:.0}° by dead reckoning");
    println!("  output:   {}", args.out.display());

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<NavConfig> {
    let Some(path) = path else {
        return Ok(NavConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn junction(graph: &TopologyGraph, name: &str) -> Result<Coordinate> {
    graph
        .node_by_name(name)
        .and_then(|node| graph.position(node))
        .with_context(|| format!("unknown junction {name:?}"))
}

#[cfg_attr(not(feature = "online"), allow(unused_variables))]
fn remote_router(args: &Args, config: &NavConfig) -> Result<Box<dyn RemoteRouter>> {
    #[cfg(feature = "online")]
    if args.online {
        let router = nav_route::OsrmRouter::from_config(&config.acquisition)?;
        info!("remote routing via {}", config.acquisition.remote_base_url);
        return Ok(Box::new(router));
    }
    #[cfg(not(feature = "online"))]
    if args.online {
        warn!("built without the `online` feature; planning offline only");
    }
    Ok(Box::new(OfflineOnly))
}
