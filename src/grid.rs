//! The mounted sphere grid: rotation state, momentum physics, and selection.
//!
//! One `SphereGrid` owns everything for one mount: item snapshot, cached
//! sphere layout, rotation/velocity state, the in-flight pointer gesture,
//! and the last projected frame. There are no globals, so independent grids
//! can coexist. All entry points take `&mut self`; input handlers and the
//! frame tick are serialized by construction.
//!
//! Flow per frame: pointer handlers mutate rotation/velocity → `tick`
//! advances momentum (or ambient spin) and reprojects → the caller paints
//! the returned attributes and feeds the next frame's pointer events back.

use crate::config::{ConfigError, GridConfig};
use crate::gesture::{GestureEnd, PointerTracker};
use crate::item::GridItem;
use crate::layout::{generate_layout, SpherePoint};
use crate::math::{distance_squared, normalize_deg};
use crate::project::{project, RenderAttr};

/// Momentum below this magnitude (degrees/tick) snaps to zero.
const VELOCITY_EPSILON: f32 = 0.01;
/// Slack multiplier on an item's footprint when hit-testing. Generous for
/// usability on small scales.
const HIT_RADIUS_SLACK: f32 = 1.25;

/// Orientation of the sphere, degrees, normalized to (−180°, 180°].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    /// Pitch, driven by vertical drag.
    pub x: f32,
    /// Yaw, driven by horizontal drag and ambient spin.
    pub y: f32,
    /// Roll. Reserved, never driven.
    pub z: f32,
}

impl Rotation {
    fn normalize(&mut self) {
        self.x = normalize_deg(self.x);
        self.y = normalize_deg(self.y);
        self.z = normalize_deg(self.z);
    }
}

/// Angular velocity in degrees per tick, clamped on every update path.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// Pitch component.
    pub x: f32,
    /// Yaw component.
    pub y: f32,
}

impl Velocity {
    fn clamp_to(&mut self, max: f32) {
        self.x = self.x.clamp(-max, max);
        self.y = self.y.clamp(-max, max);
    }

    fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Spherical layout + interaction engine for one mounted item grid.
pub struct SphereGrid {
    cfg: GridConfig,
    items: Vec<GridItem>,
    points: Vec<SpherePoint>,
    rotation: Rotation,
    velocity: Velocity,
    tracker: Option<PointerTracker>,
    /// Frame clock in seconds, advanced by `tick`. Pointer events are
    /// stamped with it, so gesture classification needs no wall clock.
    time: f32,
    viewport: (f32, f32),
    frame: Vec<RenderAttr>,
    selected: Option<u64>,
    hovered: Option<u64>,
}

impl SphereGrid {
    /// Build an engine from a validated configuration.
    pub fn new(cfg: GridConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        log::info!(
            "sphere grid mounted: radius {}, sensitivity {}, decay {}",
            cfg.sphere_radius,
            cfg.drag_sensitivity,
            cfg.momentum_decay
        );
        Ok(Self {
            cfg,
            items: Vec::new(),
            points: Vec::new(),
            rotation: Rotation::default(),
            velocity: Velocity::default(),
            tracker: None,
            time: 0.0,
            viewport: (0.0, 0.0),
            frame: Vec::new(),
            selected: None,
            hovered: None,
        })
    }

    /// Replace the item snapshot. The layout is regenerated only when the
    /// list's length or identity changed; rotation state is untouched.
    pub fn set_items(&mut self, items: Vec<GridItem>) {
        let changed = items.len() != self.items.len()
            || items.iter().zip(&self.items).any(|(a, b)| a.id != b.id);
        self.items = items;
        if changed {
            self.points = generate_layout(
                self.items.len(),
                self.cfg.sphere_radius,
                self.cfg.jitter_seed,
            );
            self.frame.clear();
            log::debug!("item list changed, layout regenerated: {}", self.items.len());
        }
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn config(&self) -> &GridConfig {
        &self.cfg
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, pitch_deg: f32, yaw_deg: f32) {
        self.rotation.x = pitch_deg;
        self.rotation.y = yaw_deg;
        self.rotation.normalize();
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Toggle ambient spin at runtime.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.cfg.auto_rotate = enabled;
    }

    /// Viewport size in pixels; screen-space mapping for `pick`/`to_screen`.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Advance one frame: momentum or ambient spin, then reprojection.
    ///
    /// `dt` is seconds since the previous frame and drives the gesture
    /// clock; momentum decay is per tick by design, matching the
    /// degrees-per-tick units of the velocity state.
    pub fn tick(&mut self, dt: f32) -> &[RenderAttr] {
        self.time += dt.max(0.0);

        if self.tracker.is_none() {
            if !self.velocity.is_zero() {
                self.rotation.x += self.velocity.x;
                self.rotation.y += self.velocity.y;
                self.rotation.normalize();

                self.velocity.x *= self.cfg.momentum_decay;
                self.velocity.y *= self.cfg.momentum_decay;
                self.velocity.clamp_to(self.cfg.max_rotation_speed);

                if self.velocity.x.abs() < VELOCITY_EPSILON
                    && self.velocity.y.abs() < VELOCITY_EPSILON
                {
                    self.velocity = Velocity::default();
                }
            } else if self.cfg.auto_rotate {
                // Ambient spin resumes only once momentum has fully decayed.
                self.rotation.y += self.cfg.auto_rotate_speed;
                self.rotation.normalize();
            }
        }

        self.frame = project(&self.points, self.rotation.y, self.rotation.x, &self.cfg);
        &self.frame
    }

    /// The most recently projected frame, in item order.
    pub fn frame(&self) -> &[RenderAttr] {
        &self.frame
    }

    // ── Pointer input ──

    /// Pointer press at viewport coordinates.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.tracker = Some(PointerTracker::begin(x, y, self.time));
        self.velocity = Velocity::default();
    }

    /// Pointer move while pressed. Ignored when no press is active.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        let (dx, dy) = tracker.advance(x, y);

        let max = self.cfg.max_rotation_speed;
        let yaw_delta = (dx * self.cfg.drag_sensitivity).clamp(-max, max);
        let pitch_delta = (dy * self.cfg.drag_sensitivity).clamp(-max, max);

        self.rotation.y += yaw_delta;
        self.rotation.x += pitch_delta;
        self.rotation.normalize();

        // The clamped delta is the instantaneous velocity; it carries into
        // momentum if this turns out to be a drag release.
        self.velocity = Velocity {
            x: pitch_delta,
            y: yaw_delta,
        };
    }

    /// Pointer release. A tap resolves a selection; a drag lets the captured
    /// velocity carry into momentum.
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        let Some(tracker) = self.tracker.take() else {
            return;
        };
        match tracker.finish(x, y, self.time) {
            GestureEnd::Tap { x, y } => {
                self.velocity = Velocity::default();
                if let Some(id) = self.pick(x, y) {
                    self.select_by_id(id);
                }
            }
            GestureEnd::Drag => {}
        }
    }

    // ── Selection ──

    /// Hit-test a viewport coordinate against the last projected frame.
    /// Front-most footprint wins.
    pub fn pick(&self, screen_x: f32, screen_y: f32) -> Option<u64> {
        let lx = screen_x - self.viewport.0 * 0.5;
        let ly = self.viewport.1 * 0.5 - screen_y;

        let mut best: Option<(f32, u64)> = None;
        for (attr, item) in self.frame.iter().zip(&self.items) {
            if !attr.visible {
                continue;
            }
            let hit_radius = attr.scale * self.cfg.base_image_scale * 0.5 * HIT_RADIUS_SLACK;
            if distance_squared(lx, ly, attr.x, attr.y) > hit_radius * hit_radius {
                continue;
            }
            match best {
                Some((z, _)) if z >= attr.z => {}
                _ => best = Some((attr.z, item.id)),
            }
        }
        best.map(|(_, id)| id)
    }

    /// Pre-resolved selection path for callers doing their own picking.
    /// Returns false if the id is not in the current snapshot.
    pub fn select_by_id(&mut self, id: u64) -> bool {
        if self.items.iter().any(|it| it.id == id) {
            log::debug!("item selected: {}", id);
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Drain the pending selection, if any. Called once per frame by the
    /// presentation layer.
    pub fn take_selected(&mut self) -> Option<GridItem> {
        let id = self.selected.take()?;
        self.items.iter().find(|it| it.id == id).cloned()
    }

    /// Update the hovered item from a viewport coordinate.
    pub fn hover(&mut self, screen_x: f32, screen_y: f32) {
        self.hovered = self.pick(screen_x, screen_y);
    }

    pub fn hovered(&self) -> Option<u64> {
        self.hovered
    }

    /// Map a projected attribute to viewport coordinates (x right, y down,
    /// origin at the viewport's top-left).
    pub fn to_screen(&self, attr: &RenderAttr) -> (f32, f32) {
        (
            self.viewport.0 * 0.5 + attr.x,
            self.viewport.1 * 0.5 - attr.y,
        )
    }
}
