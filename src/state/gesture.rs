use crate::state::transform::{MAX_SCALE, MIN_SCALE, ViewTransform};

/// Maximum gap between two zero-contact touch-ends that still counts as a
/// double-tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// Reference frame captured the moment a second touch contact lands.
///
/// All pinch deltas are computed against this snapshot until the gesture
/// ends, so a pinch that returns to its starting spread also returns the
/// view to its starting transform instead of accumulating per-frame error.
#[derive(Clone, Copy, Debug)]
pub struct PinchSession {
    initial_distance: f64,
    initial: ViewTransform,
    mid_x: f64,
    mid_y: f64,
}

impl PinchSession {
    /// Snapshots the finger distance, the gesture midpoint (relative to the
    /// container center), and the live transform.
    pub fn begin(initial_distance: f64, mid_x: f64, mid_y: f64, current: ViewTransform) -> Self {
        Self {
            initial_distance,
            initial: current,
            mid_x,
            mid_y,
        }
    }

    /// Applies the pinch for the current finger distance.
    ///
    /// The new scale is the session scale times the distance ratio, clamped
    /// to `[MIN_SCALE, MAX_SCALE]`; translation is re-anchored at the session
    /// midpoint in the session's reference frame. A session that began with
    /// zero finger distance stays inert rather than producing a non-finite
    /// scale. Returns whether the view changed.
    pub fn apply(&self, current_distance: f64, view: &mut ViewTransform) -> bool {
        if self.initial_distance <= 0.0 {
            return false;
        }
        let new_scale = (self.initial.scale * (current_distance / self.initial_distance))
            .clamp(MIN_SCALE, MAX_SCALE);
        if !new_scale.is_finite() || new_scale == view.scale {
            return false;
        }
        let ratio = new_scale / self.initial.scale;
        view.translate_x = self.mid_x - (self.mid_x - self.initial.translate_x) * ratio;
        view.translate_y = self.mid_y - (self.mid_y - self.initial.translate_y) * ratio;
        view.scale = new_scale;
        true
    }
}

/// Double-tap detection across touch-end events that leave no contacts.
///
/// Owned by the controller instance, so independent controllers would keep
/// independent tap histories.
#[derive(Clone, Copy, Debug)]
pub struct TapTracker {
    last_tap_ms: f64,
}

impl Default for TapTracker {
    fn default() -> Self {
        // Negative infinity so the first tap never qualifies, whatever the
        // host clock's epoch.
        Self {
            last_tap_ms: f64::NEG_INFINITY,
        }
    }
}

impl TapTracker {
    /// Records a qualifying tap and reports whether it completed a
    /// double-tap. Every tap becomes the reference for the next one,
    /// including taps that triggered a reset.
    pub fn register(&mut self, now_ms: f64) -> bool {
        let double = now_ms - self.last_tap_ms < DOUBLE_TAP_WINDOW_MS;
        self.last_tap_ms = now_ms;
        double
    }
}
