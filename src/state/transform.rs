/// Scale bounds enforced on every zoom update.
pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 5.0;

/// Per-notch wheel factors: scrolling down shrinks, scrolling up grows.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Scale and translation applied to the target element.
///
/// Translation is in pixels relative to the container center and is applied
/// before the uniform scale, which acts around the element's own center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ViewTransform {
    /// Rescales around a focal point given relative to the container center,
    /// keeping that point visually fixed: with the scale going `s -> s'`,
    /// `t' = f - (f - t) * (s' / s)` on each axis.
    ///
    /// The requested scale is clamped to `[MIN_SCALE, MAX_SCALE]` first.
    /// Returns `false` and leaves the state untouched when the clamped scale
    /// is not finite or equals the current one.
    pub fn rescale_about(&mut self, new_scale: f64, focal_x: f64, focal_y: f64) -> bool {
        let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
        if !new_scale.is_finite() || new_scale == self.scale {
            return false;
        }
        let ratio = new_scale / self.scale;
        self.translate_x = focal_x - (focal_x - self.translate_x) * ratio;
        self.translate_y = focal_y - (focal_y - self.translate_y) * ratio;
        self.scale = new_scale;
        true
    }

    /// One wheel notch at the given focal point. Positive `delta_y` zooms
    /// out, anything else zooms in.
    pub fn wheel_step(&mut self, delta_y: f64, focal_x: f64, focal_y: f64) -> bool {
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.rescale_about(self.scale * factor, focal_x, focal_y)
    }

    /// Back to scale 1 at the container center.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// CSS transform value. Translation comes first, in pre-scale pixels,
    /// then the uniform scale; the order must not change or focal-point
    /// anchoring breaks.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}
