//! Per-frame projection: sphere coordinates → 2D render attributes.
//!
//! Pipeline per item:
//!   spherical → Cartesian → yaw then pitch rotation → depth fade →
//!   center/depth scale → overlap relaxation → paint order.
//!
//! The rotation is composed as two sequential axis rotations (yaw around Y,
//! then pitch around X), not a quaternion. At extreme pitch the axes
//! interact; that composition is part of the interaction feel and is kept.
//! Outputs are never cached across frames.

use rayon::prelude::*;

use crate::config::GridConfig;
use crate::layout::SpherePoint;
use crate::math::{deg_to_rad, distance_squared, length_squared, lerp};

/// Render attributes for one item, one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderAttr {
    /// Projected position in layout units, origin at sphere center.
    pub x: f32,
    pub y: f32,
    /// Rotated depth; positive is toward the viewer.
    pub z: f32,
    /// Relaxed render scale, absolute floor 0.25.
    pub scale: f32,
    /// Depth-fade opacity in [0, 1].
    pub opacity: f32,
    /// Paint order; larger paints on top.
    pub z_index: i32,
    /// False once the item has rotated past the far fade plane.
    pub visible: bool,
}

// ── Fade planes (layout units, local z) ──

/// Depth at which opacity starts falling off.
const FADE_ZONE_START: f32 = -10.0;
/// Depth past which items are fully hidden.
const FADE_ZONE_END: f32 = -30.0;

// ── Scale model ──

/// Inclination thresholds that count as "polar" for the edge penalty.
const POLAR_PHI_LOW: f32 = 30.0;
const POLAR_PHI_HIGH: f32 = 150.0;
/// Screen-edge scale multiplier for polar items (harsher shrink).
const POLAR_EDGE_FACTOR: f32 = 0.4;
/// Screen-edge scale multiplier for equatorial items.
const EQUATOR_EDGE_FACTOR: f32 = 0.7;
/// Floor on the center-distance penalty alone.
const CENTER_SCALE_FLOOR: f32 = 0.3;
/// Depth scale at the far side of the sphere.
const DEPTH_SCALE_MIN: f32 = 0.5;
/// Depth scale at the near side of the sphere.
const DEPTH_SCALE_MAX: f32 = 1.1;
/// Absolute scale floor after every adjustment.
const SCALE_ABS_FLOOR: f32 = 0.25;

// ── Overlap relaxation ──

/// Extra clearance demanded between projected footprints.
const OVERLAP_MARGIN: f32 = 25.0;
/// Relaxation may not shrink an item below this fraction of its
/// pre-relaxation scale.
const RELAX_RELATIVE_FLOOR: f32 = 0.4;

/// Project every point under the given rotation and run the overlap pass.
///
/// Output order matches input order. Pure: same inputs, same frame.
pub fn project(
    points: &[SpherePoint],
    yaw_deg: f32,
    pitch_deg: f32,
    cfg: &GridConfig,
) -> Vec<RenderAttr> {
    let (sin_yaw, cos_yaw) = deg_to_rad(yaw_deg).sin_cos();
    let (sin_pitch, cos_pitch) = deg_to_rad(pitch_deg).sin_cos();

    let mut attrs: Vec<RenderAttr> = points
        .par_iter()
        .map(|p| project_one(p, sin_yaw, cos_yaw, sin_pitch, cos_pitch))
        .collect();

    relax_overlaps(&mut attrs, cfg);
    attrs
}

fn project_one(
    p: &SpherePoint,
    sin_yaw: f32,
    cos_yaw: f32,
    sin_pitch: f32,
    cos_pitch: f32,
) -> RenderAttr {
    let theta = deg_to_rad(p.theta_deg);
    let phi = deg_to_rad(p.phi_deg);
    let r = p.radius;

    // Spherical → Cartesian (y up, phi measured from the north pole).
    let x0 = r * phi.sin() * theta.cos();
    let y0 = r * phi.cos();
    let z0 = r * phi.sin() * theta.sin();

    // Yaw around Y, then pitch around X.
    let x1 = x0 * cos_yaw + z0 * sin_yaw;
    let z1 = -x0 * sin_yaw + z0 * cos_yaw;
    let y2 = y0 * cos_pitch - z1 * sin_pitch;
    let z2 = y0 * sin_pitch + z1 * cos_pitch;

    let (x, y, z) = (x1, y2, z2);

    let visible = z > FADE_ZONE_END;
    let opacity = if z <= FADE_ZONE_START {
        ((z - FADE_ZONE_END) / (FADE_ZONE_START - FADE_ZONE_END)).clamp(0.0, 1.0)
    } else {
        1.0
    };

    // Center-distance penalty: polar items shrink harder toward the rim.
    let center_dist = length_squared(x, y).sqrt() / r;
    let edge_factor = if p.phi_deg < POLAR_PHI_LOW || p.phi_deg > POLAR_PHI_HIGH {
        POLAR_EDGE_FACTOR
    } else {
        EQUATOR_EDGE_FACTOR
    };
    let center_scale = lerp(1.0, edge_factor, center_dist.min(1.0)).max(CENTER_SCALE_FLOOR);

    // Depth scale: near side grows, far side shrinks.
    let depth_t = ((z + r) / (2.0 * r)).clamp(0.0, 1.0);
    let depth_scale = lerp(DEPTH_SCALE_MIN, DEPTH_SCALE_MAX, depth_t);

    let scale = (center_scale * depth_scale).max(SCALE_ABS_FLOOR);

    RenderAttr {
        x,
        y,
        z,
        scale,
        opacity,
        z_index: (1000.0 + z).round() as i32,
        visible,
    }
}

/// Greedy pairwise overlap relaxation over visible items.
///
/// Best-effort anti-overlap, not a packing solver: each pair shrinks the
/// larger item in index order, so results depend on iteration order. Scales
/// only ever shrink, floored at `RELAX_RELATIVE_FLOOR` of the incoming scale
/// and `SCALE_ABS_FLOOR` absolute.
fn relax_overlaps(attrs: &mut [RenderAttr], cfg: &GridConfig) {
    let n = attrs.len();
    if n < 2 {
        return;
    }

    let pre_relax: Vec<f32> = attrs.iter().map(|a| a.scale).collect();

    for _ in 0..cfg.relax_passes {
        for i in 0..n {
            if !attrs[i].visible {
                continue;
            }
            for j in (i + 1)..n {
                if !attrs[j].visible {
                    continue;
                }

                let half_i = attrs[i].scale * cfg.base_image_scale * 0.5;
                let half_j = attrs[j].scale * cfg.base_image_scale * 0.5;
                let min_dist = half_i + half_j + OVERLAP_MARGIN;

                let d2 = distance_squared(attrs[i].x, attrs[i].y, attrs[j].x, attrs[j].y);
                if d2 >= min_dist * min_dist {
                    continue;
                }

                let dist = d2.sqrt();
                // Coincident footprints have no defined direction; treat as
                // maximum overlap and go straight to the floor.
                let severity = if dist <= f32::EPSILON {
                    1.0
                } else {
                    1.0 - dist / min_dist
                };

                let k = if attrs[i].scale >= attrs[j].scale { i } else { j };
                let shrunk = attrs[k].scale * (1.0 - severity);
                attrs[k].scale = shrunk
                    .max(RELAX_RELATIVE_FLOOR * pre_relax[k])
                    .max(SCALE_ABS_FLOOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(theta: f32, phi: f32, r: f32) -> SpherePoint {
        SpherePoint {
            theta_deg: theta,
            phi_deg: phi,
            radius: r,
        }
    }

    fn cfg() -> GridConfig {
        GridConfig::default()
    }

    #[test]
    fn test_front_center_item() {
        // Equatorial point rotated to face the viewer: z = +r.
        let attrs = project(&[point(90.0, 90.0, 200.0)], 0.0, 0.0, &cfg());
        let a = attrs[0];
        assert!(a.visible);
        assert!((a.z - 200.0).abs() < 1e-3, "z = {}", a.z);
        assert!((a.opacity - 1.0).abs() < 1e-6);
        // Center distance 0, depth scale at max: 1.0 × 1.1.
        assert!((a.scale - 1.1).abs() < 1e-3, "scale = {}", a.scale);
        assert_eq!(a.z_index, 1200);
    }

    #[test]
    fn test_back_item_hidden() {
        let attrs = project(&[point(270.0, 90.0, 200.0)], 0.0, 0.0, &cfg());
        let a = attrs[0];
        assert!(!a.visible, "z = {} should be past the fade plane", a.z);
        assert!((a.opacity - 0.0).abs() < 1e-5);
        // Depth scale bottoms out at the far side.
        assert!((a.scale - 0.5).abs() < 1e-3, "scale = {}", a.scale);
    }

    #[test]
    fn test_fade_zone_midpoint() {
        // Pick theta so that z = r·sin(theta) = −20, the fade midpoint.
        let theta = 180.0 + (20.0f32 / 200.0).asin().to_degrees();
        let attrs = project(&[point(theta, 90.0, 200.0)], 0.0, 0.0, &cfg());
        let a = attrs[0];
        assert!(a.visible, "−20 is inside the visible range");
        assert!(
            (a.opacity - 0.5).abs() < 0.02,
            "expected half-faded, got {}",
            a.opacity
        );
    }

    #[test]
    fn test_scale_bounds() {
        let points = crate::layout::generate_layout(60, 200.0, 11);
        for yaw in [0.0f32, 30.0, 123.0, -77.0] {
            for pitch in [0.0f32, 45.0, -60.0] {
                for a in project(&points, yaw, pitch, &cfg()) {
                    assert!(
                        a.scale >= SCALE_ABS_FLOOR - 1e-6,
                        "scale {} under absolute floor",
                        a.scale
                    );
                    assert!(a.scale <= DEPTH_SCALE_MAX + 1e-6, "scale {} too large", a.scale);
                    assert!((0.0..=1.0).contains(&a.opacity));
                }
            }
        }
    }

    #[test]
    fn test_yaw_moves_items_sideways() {
        // A 90° yaw carries the front item to the +x rim.
        let attrs = project(&[point(90.0, 90.0, 200.0)], 90.0, 0.0, &cfg());
        let a = attrs[0];
        assert!((a.x - 200.0).abs() < 1e-3, "x = {}", a.x);
        assert!(a.z.abs() < 1e-3, "z = {}", a.z);
    }

    #[test]
    fn test_relaxation_monotonic() {
        let mut attrs = vec![
            RenderAttr {
                x: 0.0,
                y: 0.0,
                z: 50.0,
                scale: 1.0,
                opacity: 1.0,
                z_index: 1050,
                visible: true,
            },
            RenderAttr {
                x: 10.0,
                y: 0.0,
                z: 40.0,
                scale: 0.9,
                opacity: 1.0,
                z_index: 1040,
                visible: true,
            },
        ];
        let before: Vec<f32> = attrs.iter().map(|a| a.scale).collect();
        relax_overlaps(&mut attrs, &cfg());
        for (a, b) in attrs.iter().zip(before.iter()) {
            assert!(
                a.scale <= *b + 1e-6,
                "relaxation grew a scale: {} -> {}",
                b,
                a.scale
            );
        }
        // The pair is well inside the margin, so the larger one did shrink.
        assert!(attrs[0].scale < before[0]);
    }

    #[test]
    fn test_relaxation_zero_distance() {
        let template = RenderAttr {
            x: 5.0,
            y: -3.0,
            z: 10.0,
            scale: 1.0,
            opacity: 1.0,
            z_index: 1010,
            visible: true,
        };
        let mut attrs = vec![template, template];
        relax_overlaps(&mut attrs, &cfg());
        // Maximum overlap: the shrunk item lands exactly on its floor.
        assert!(
            (attrs[0].scale - RELAX_RELATIVE_FLOOR).abs() < 1e-6,
            "coincident pair should floor at {}, got {}",
            RELAX_RELATIVE_FLOOR,
            attrs[0].scale
        );
        assert!(attrs[0].scale >= SCALE_ABS_FLOOR);
    }

    #[test]
    fn test_relaxation_skips_hidden_items() {
        let mut attrs = vec![
            RenderAttr {
                x: 0.0,
                y: 0.0,
                z: -100.0,
                scale: 0.5,
                opacity: 0.0,
                z_index: 900,
                visible: false,
            },
            RenderAttr {
                x: 1.0,
                y: 0.0,
                z: 20.0,
                scale: 1.0,
                opacity: 1.0,
                z_index: 1020,
                visible: true,
            },
        ];
        relax_overlaps(&mut attrs, &cfg());
        assert!((attrs[1].scale - 1.0).abs() < 1e-6, "no visible pair, no shrink");
    }

    #[test]
    fn test_distant_items_untouched() {
        let mut attrs = vec![
            RenderAttr {
                x: -300.0,
                y: 0.0,
                z: 10.0,
                scale: 1.0,
                opacity: 1.0,
                z_index: 1010,
                visible: true,
            },
            RenderAttr {
                x: 300.0,
                y: 0.0,
                z: 10.0,
                scale: 1.0,
                opacity: 1.0,
                z_index: 1010,
                visible: true,
            },
        ];
        relax_overlaps(&mut attrs, &cfg());
        assert!((attrs[0].scale - 1.0).abs() < 1e-6);
        assert!((attrs[1].scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_multi_pass_converges() {
        // Extra passes shrink further but never below the floors.
        let crowded: Vec<SpherePoint> = (0..20)
            .map(|i| point(90.0 + i as f32 * 0.5, 90.0, 200.0))
            .collect();
        let single = project(&crowded, 0.0, 0.0, &cfg());
        let multi_cfg = GridConfig {
            relax_passes: 4,
            ..GridConfig::default()
        };
        let multi = project(&crowded, 0.0, 0.0, &multi_cfg);
        for (s, m) in single.iter().zip(multi.iter()) {
            assert!(m.scale <= s.scale + 1e-6);
            assert!(m.scale >= SCALE_ABS_FLOOR - 1e-6);
        }
    }
}
