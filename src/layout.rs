//! Sphere surface distribution.
//!
//! Places N items approximately evenly across a sphere's surface area:
//! equal-area inclination sampling plus golden-angle azimuth stepping, the
//! standard pair for visually even point scattering without grid solving.
//! A polar correction and a visual-band remap keep items away from the
//! foreshortened caps, and seeded jitter breaks up the mechanical look.

use crate::math::{jitter01, rad_to_deg, wrap_deg};

/// One item's resting place on the sphere.
///
/// Regenerated only when the item list changes, never per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePoint {
    /// Azimuth in [0°, 360°).
    pub theta_deg: f32,
    /// Inclination from the north pole in [0°, 180°].
    pub phi_deg: f32,
    /// Distance from sphere center.
    pub radius: f32,
}

// ── Distribution constants ──

/// Golden-angle azimuth step: 360° / φ.
const GOLDEN_STEP_DEG: f32 = 360.0 / 1.618_034;

/// Exponent shaping how hard near-pole items are pushed.
const POLE_PUSH_POWER: f32 = 0.6;
/// Maximum polar push in degrees.
const POLE_PUSH_BONUS: f32 = 35.0;
/// Northern inclination floor after the push.
const NORTH_FLOOR_DEG: f32 = 5.0;
/// Southern inclination cap after the push.
const SOUTH_CAP_DEG: f32 = 175.0;

/// Visual band the corrected inclination is remapped into. Keeps the top
/// and bottom rows from foreshortening into slivers under projection.
const BAND_MIN_DEG: f32 = 15.0;
const BAND_MAX_DEG: f32 = 165.0;

/// Jitter amplitudes (±).
const AZIMUTH_JITTER_DEG: f32 = 10.0;
const INCLINATION_JITTER_DEG: f32 = 5.0;

/// Jitter hash lanes, one prime stride per axis.
const LANE_AZIMUTH: u64 = 37;
const LANE_INCLINATION: u64 = 53;

/// Base (un-jittered) placement for item `i` of `n`.
///
/// Returns (theta, phi) in degrees with the polar correction and band remap
/// already applied.
fn base_point(i: usize, n: usize) -> (f32, f32) {
    let t = i as f32 / n as f32;

    // Equal-area sampling: acos(1 − 2t) distributes evenly by surface area,
    // not by angle, so the poles don't cluster.
    let mut phi = rad_to_deg((1.0 - 2.0 * t).clamp(-1.0, 1.0).acos());

    let theta = wrap_deg(i as f32 * GOLDEN_STEP_DEG);

    // Polar correction: the closer to a pole, the harder the push.
    let polar_frac = (phi - 90.0).abs() / 90.0;
    let bonus = polar_frac.powf(POLE_PUSH_POWER) * POLE_PUSH_BONUS;
    if phi < 90.0 {
        phi = (phi - bonus).max(NORTH_FLOOR_DEG);
    } else {
        phi = (phi + bonus).min(SOUTH_CAP_DEG);
    }

    // Remap the 0–180° domain into the visual band.
    phi = BAND_MIN_DEG + (phi / 180.0) * (BAND_MAX_DEG - BAND_MIN_DEG);

    (theta, phi)
}

/// Compute resting positions for `item_count` items on a sphere of
/// `sphere_radius`. Jitter is driven by `seed`, so the same inputs always
/// produce the same layout.
pub fn generate_layout(item_count: usize, sphere_radius: f32, seed: u64) -> Vec<SpherePoint> {
    let mut points = Vec::with_capacity(item_count);

    for i in 0..item_count {
        let (base_theta, base_phi) = base_point(i, item_count);

        let lane = i as u64;
        let theta = wrap_deg(
            base_theta + jitter01(seed, lane * LANE_AZIMUTH) * AZIMUTH_JITTER_DEG,
        );
        let phi = (base_phi + jitter01(seed, lane * LANE_INCLINATION) * INCLINATION_JITTER_DEG)
            .clamp(0.0, 180.0);

        points.push(SpherePoint {
            theta_deg: theta,
            phi_deg: phi,
            radius: sphere_radius,
        });
    }

    log::debug!(
        "generated sphere layout: {} items, radius {}",
        item_count,
        sphere_radius
    );
    points
}
