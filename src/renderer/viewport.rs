//! Plot window fitted around the displayed value, and the plot ↔ pixel mapping.

use crate::complex::ComplexValue;

/// Upper bound on grid lines or graduations along one axis.
pub const MAX_TICKS: usize = 256;

/// Plot rectangle mapped onto a `width × height` pixel area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Fit a window holding both the origin and `value`, padded by `margin`
    /// (a fraction of the larger data span), with the same plot units per
    /// pixel on both axes so the phase angle is not distorted.
    pub fn fit(value: ComplexValue, width: usize, height: usize, margin: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        // f64 so values near f32::MAX still give a finite window.
        let (re, im) = (value.real as f64, value.imag as f64);
        let (lo_x, hi_x) = (re.min(0.0), re.max(0.0));
        let (lo_y, hi_y) = (im.min(0.0), im.max(0.0));
        let span = (hi_x - lo_x).max(hi_y - lo_y).max(f32::MIN_POSITIVE as f64);
        let pad = span * margin.max(0.0) as f64;

        let data_w = hi_x - lo_x + 2.0 * pad;
        let data_h = hi_y - lo_y + 2.0 * pad;
        let units_per_px = (data_w / width as f64).max(data_h / height as f64);

        let half_w = units_per_px * width as f64 / 2.0;
        let half_h = units_per_px * height as f64 / 2.0;
        let cx = (lo_x + hi_x) / 2.0;
        let cy = (lo_y + hi_y) / 2.0;

        Self {
            x_min: to_finite_f32(cx - half_w),
            x_max: to_finite_f32(cx + half_w),
            y_min: to_finite_f32(cy - half_h),
            y_max: to_finite_f32(cy + half_h),
            width,
            height,
        }
    }

    /// Smaller of the two plot spans, saturated to `f32::MAX`.
    pub fn min_span(&self) -> f32 {
        let w = self.x_max as f64 - self.x_min as f64;
        let h = self.y_max as f64 - self.y_min as f64;
        to_finite_f32(w.min(h))
    }

    /// Pixel position of a plot point. Pixel y grows downward.
    #[inline]
    pub fn to_pixel(&self, x: f32, y: f32) -> (f32, f32) {
        let (x_min, x_max) = (self.x_min as f64, self.x_max as f64);
        let (y_min, y_max) = (self.y_min as f64, self.y_max as f64);
        let px = (x as f64 - x_min) / (x_max - x_min) * self.width as f64;
        let py = (y_max - y as f64) / (y_max - y_min) * self.height as f64;
        (px as f32, py as f32)
    }

    /// Rounded pixel position, suitable for rasterizing.
    #[inline]
    pub fn to_pixel_i(&self, x: f32, y: f32) -> (isize, isize) {
        let (px, py) = self.to_pixel(x, y);
        (px.round() as isize, py.round() as isize)
    }

    /// Multiples of `step` inside `[min, max]` along one axis. Empty when
    /// the range is not finite or would hold more than [`MAX_TICKS`].
    pub fn ticks(min: f32, max: f32, step: f32) -> Vec<f32> {
        if step <= 0.0 || !step.is_finite() || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let step = step as f64;
        let first = (min as f64 / step).ceil();
        let last = (max as f64 / step).floor();
        if last < first || last - first >= MAX_TICKS as f64 {
            return Vec::new();
        }
        let count = (last - first) as usize + 1;
        (0..count)
            .map(|i| ((first + i as f64) * step) as f32)
            .collect()
    }
}

fn to_finite_f32(v: f64) -> f32 {
    v.clamp(f32::MIN as f64, f32::MAX as f64) as f32
}

/// A "nice" tick step (1, 2 or 5 × 10ⁿ) giving roughly `target_ticks`
/// intervals over `span`.
pub fn nice_step(span: f32, target_ticks: usize) -> f32 {
    if span <= 0.0 || !span.is_finite() || target_ticks == 0 {
        return 1.0;
    }

    let rough_step = span / target_ticks as f32;
    let magnitude = 10.0_f32.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    let nice = if residual <= 1.5 {
        1.0
    } else if residual <= 3.0 {
        2.0
    } else if residual <= 7.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Tick label text with just enough decimals for `step`.
pub fn format_graduation(value: f32, step: f32) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil().max(0.0) as usize
    };
    let text = format!("{:.*}", decimals, value);
    // "-0" reads badly next to the origin.
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}
