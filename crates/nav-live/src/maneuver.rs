//! Turn-by-turn maneuver detection.
//!
//! Scans forward from the targeted route point, comparing the bearings of
//! consecutive segments.  The first change above `turn_threshold_deg` is the
//! next maneuver; positive changes are right turns.  Segments shorter than
//! `min_segment_m` carry no usable bearing and are skipped.

use nav_core::{Coordinate, ManeuverConfig, signed_angle_delta};
use nav_spatial::Route;

use crate::{ManeuverDescriptor, ManeuverKind};

/// Next maneuver for a vehicle at `pos` targeting `route[next_index]`.
pub fn next_maneuver(
    cfg:        &ManeuverConfig,
    route:      &Route,
    pos:        Coordinate,
    next_index: usize,
) -> ManeuverDescriptor {
    let points = route.points();
    let remaining = route.remaining_m(pos, next_index);
    if remaining < cfg.arrival_threshold_m || next_index + 1 >= points.len() {
        return arrive(cfg, remaining);
    }

    let first = points[next_index];
    let mut dist = pos.distance_m(first);
    let mut last_bearing = if next_index > 0 && points[next_index - 1].distance_m(first) >= cfg.min_segment_m {
        Some(points[next_index - 1].bearing_deg(first))
    } else if dist >= cfg.min_segment_m {
        Some(pos.bearing_deg(first))
    } else {
        None
    };

    let mut j = next_index;
    let mut scanned = 1;
    while j + 1 < points.len() && scanned < cfg.scan_max_points && dist <= cfg.scan_distance_m {
        let seg = points[j].distance_m(points[j + 1]);
        if seg >= cfg.min_segment_m {
            let out = points[j].bearing_deg(points[j + 1]);
            if let Some(incoming) = last_bearing {
                let delta = signed_angle_delta(incoming, out);
                if delta.abs() > cfg.turn_threshold_deg {
                    return turn(cfg, delta, dist);
                }
            }
            last_bearing = Some(out);
        }
        dist += seg;
        j += 1;
        scanned += 1;
    }

    let distance_m = if j + 1 >= points.len() { remaining } else { dist };
    ManeuverDescriptor {
        kind: ManeuverKind::Straight,
        distance_m,
        text: format!("Continue straight for {}", format_distance(distance_m)),
    }
}

/// Classify a signed bearing change already known to exceed the threshold.
pub fn classify(cfg: &ManeuverConfig, delta_deg: f64) -> ManeuverKind {
    let mag = delta_deg.abs();
    let right = delta_deg > 0.0;
    match (mag <= cfg.slight_max_deg, mag <= cfg.normal_max_deg, right) {
        (true, _, true)      => ManeuverKind::SlightRight,
        (true, _, false)     => ManeuverKind::SlightLeft,
        (false, true, true)  => ManeuverKind::Right,
        (false, true, false) => ManeuverKind::Left,
        (false, false, true) => ManeuverKind::SharpRight,
        (false, false, false)=> ManeuverKind::SharpLeft,
    }
}

fn turn(cfg: &ManeuverConfig, delta_deg: f64, distance_m: f64) -> ManeuverDescriptor {
    let kind = classify(cfg, delta_deg);
    let verb = match kind {
        ManeuverKind::SlightLeft  => "Slight left",
        ManeuverKind::SlightRight => "Slight right",
        ManeuverKind::Left        => "Turn left",
        ManeuverKind::Right       => "Turn right",
        ManeuverKind::SharpLeft   => "Sharp left",
        _                         => "Sharp right",
    };
    ManeuverDescriptor {
        kind,
        distance_m,
        text: format!("{verb} in {}", format_distance(distance_m)),
    }
}

fn arrive(cfg: &ManeuverConfig, remaining_m: f64) -> ManeuverDescriptor {
    let text = if remaining_m < cfg.arrival_threshold_m {
        "Arrive at destination".to_owned()
    } else {
        format!("Arrive at destination in {}", format_distance(remaining_m))
    };
    ManeuverDescriptor { kind: ManeuverKind::Arrive, distance_m: remaining_m, text }
}

/// `"85 m"` below a kilometre, `"1.2 km"` above.
pub fn format_distance(m: f64) -> String {
    if m < 1_000.0 {
        format!("{:.0} m", m.max(0.0))
    } else {
        format!("{:.1} km", m / 1_000.0)
    }
}
