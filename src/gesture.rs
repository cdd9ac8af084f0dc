//! Pointer gesture tracking.
//!
//! Distinguishes taps from rotation drags for a single pointer sequence:
//! - Tap: short press with little cumulative movement → item selection
//! - Drag: everything else → rotation input, velocity carry-over on release
//!
//! Movement is accumulated move-by-move, not start-to-end, so a slow jittery
//! near-stationary touch still classifies as a tap while a back-and-forth
//! scrub does not. Timestamps are caller-supplied seconds from the engine's
//! frame clock; the tracker never reads a wall clock.

/// Maximum press duration for a tap, in seconds.
const TAP_MAX_SECONDS: f32 = 0.3;
/// Maximum cumulative pointer travel for a tap, in pixels.
const TAP_MAX_TRAVEL_PX: f32 = 10.0;

/// Outcome of a completed pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// Quick, nearly stationary press; resolve a selection at (x, y).
    Tap { x: f32, y: f32 },
    /// Rotation gesture; release velocity carries into momentum.
    Drag,
}

/// State for one pointer sequence, from press to release.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    start_time: f32,
    last_x: f32,
    last_y: f32,
    /// Cumulative travel across all moves.
    travel: f32,
}

impl PointerTracker {
    /// Begin tracking at the press position.
    pub fn begin(x: f32, y: f32, time: f32) -> Self {
        Self {
            start_time: time,
            last_x: x,
            last_y: y,
            travel: 0.0,
        }
    }

    /// Record a move. Returns the (dx, dy) delta since the previous event.
    pub fn advance(&mut self, x: f32, y: f32) -> (f32, f32) {
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.travel += (dx * dx + dy * dy).sqrt();
        self.last_x = x;
        self.last_y = y;
        (dx, dy)
    }

    /// Cumulative distance travelled so far.
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Finish the sequence at the release position and classify it.
    pub fn finish(mut self, x: f32, y: f32, time: f32) -> GestureEnd {
        self.advance(x, y);
        let duration = time - self.start_time;
        if duration < TAP_MAX_SECONDS && self.travel < TAP_MAX_TRAVEL_PX {
            GestureEnd::Tap { x, y }
        } else {
            GestureEnd::Drag
        }
    }
}
