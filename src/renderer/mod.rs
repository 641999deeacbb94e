//! Pixel renderer for the complex graph.
//!
//! The view draws through the [`RenderingSurface`] trait. [`CanvasSurface`]
//! implements it over an owned RGBA pixel buffer (`Canvas`); output backends
//! (terminal half-block, ANSI print) convert the canvas at submission time.

pub mod surface;
pub mod text;
pub mod viewport;

pub use surface::{CanvasSurface, SurfaceOptions};
pub use viewport::Viewport;

use crate::geometry::LabelPlacement;

/// Owned RGBA pixel buffer, 4 bytes per pixel.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
        }
    }

    /// Resize the canvas, reallocating only when the buffer is too small.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let needed = width * height * 4;
        if self.data.len() < needed {
            self.data.resize(needed, 0);
        }
    }

    /// Whole-canvas region.
    pub fn region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Write an opaque pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, (r, g, b): (u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        self.data[idx] = r;
        self.data[idx + 1] = g;
        self.data[idx + 2] = b;
        self.data[idx + 3] = 255;
    }

    /// Read the RGB values at (x, y); black outside the canvas.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8) {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        let idx = (y * self.width + x) * 4;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Colors of the two pixels shown by the terminal cell at (`col`, `row`):
    /// the upper one as foreground of `▀`, the lower one as background.
    pub fn half_block(&self, col: usize, row: usize) -> ((u8, u8, u8), (u8, u8, u8)) {
        (self.get_pixel(col, row * 2), self.get_pixel(col, row * 2 + 1))
    }
}

/// Pixel rectangle that drawing is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        x >= self.x as isize
            && y >= self.y as isize
            && x < (self.x + self.width) as isize
            && y < (self.y + self.height) as isize
    }
}

/// Named color roles. A `ThemeColors` turns them into RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleToken {
    Background,
    Grid,
    Axis,
    Graduation,
    NeutralDark,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Dash pattern for segments, lengths in pixels. A zero gap draws a solid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashPattern {
    pub dash: usize,
    pub gap: usize,
}

impl DashPattern {
    pub const SOLID: DashPattern = DashPattern { dash: 1, gap: 0 };

    pub const fn new(dash: usize, gap: usize) -> Self {
        Self { dash, gap }
    }

    /// Whether the `i`-th pixel along the segment is inked.
    #[inline]
    pub fn is_ink(&self, i: usize) -> bool {
        self.gap == 0 || i % (self.dash + self.gap) < self.dash
    }
}

/// Parameter interval and step for curve sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    pub t_min: f32,
    pub t_max: f32,
    pub t_step: f32,
}

impl SampleRange {
    pub const fn new(t_min: f32, t_max: f32, t_step: f32) -> Self {
        Self { t_min, t_max, t_step }
    }

    /// Sample parameters from `t_min` to `t_max` inclusive. Computed by index so
    /// the last sample does not drift with accumulated rounding.
    pub fn samples(&self) -> impl Iterator<Item = f32> {
        let range = *self;
        let count = if range.t_step > 0.0 && range.t_max > range.t_min {
            ((range.t_max - range.t_min) / range.t_step).round() as usize
        } else {
            0
        };
        (0..=count).map(move |i| {
            if i == count {
                range.t_max
            } else {
                range.t_min + i as f32 * range.t_step
            }
        })
    }
}

/// Drawing primitives the complex graph view needs from its host.
///
/// Coordinates passed to the primitives are plot coordinates; the surface
/// owns the mapping to pixels. Every call is clipped to `clip`.
pub trait RenderingSurface {
    fn fill_background(&mut self, clip: Region, style: StyleToken);

    fn draw_grid(&mut self, clip: Region);

    fn draw_axes(&mut self, clip: Region);

    /// Tick marks and their numeric labels along one axis.
    fn draw_labels_and_graduations(&mut self, clip: Region, axis: Axis);

    /// Sample `curve` over `range` and join consecutive samples.
    fn draw_curve(
        &mut self,
        clip: Region,
        range: SampleRange,
        curve: &dyn Fn(f32) -> (f32, f32),
        dashed: bool,
        style: StyleToken,
    );

    /// Segment parallel to `axis`: for `Axis::Vertical` it runs at
    /// `x = position` from `y = from` to `y = to`, and the other way round
    /// for `Axis::Horizontal`.
    #[allow(clippy::too_many_arguments)]
    fn draw_segment(
        &mut self,
        clip: Region,
        axis: Axis,
        position: f32,
        from: f32,
        to: f32,
        style: StyleToken,
        dash: DashPattern,
    );

    fn draw_dot(&mut self, clip: Region, x: f32, y: f32, style: StyleToken, filled: bool);

    fn draw_label(
        &mut self,
        clip: Region,
        x: f32,
        y: f32,
        text: &str,
        style: StyleToken,
        placement: LabelPlacement,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_cover_both_ends() {
        let range = SampleRange::new(0.0, 1.0, 0.01);
        let samples: Vec<f32> = range.samples().collect();
        assert_eq!(samples.len(), 101);
        assert_eq!(samples[0], 0.0);
        assert_eq!(*samples.last().unwrap(), 1.0);
        assert!((samples[50] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_range_yields_single_sample() {
        let samples: Vec<f32> = SampleRange::new(1.0, 1.0, 0.1).samples().collect();
        assert_eq!(samples, vec![1.0]);
    }

    #[test]
    fn dash_pattern_alternates() {
        let dash = DashPattern::new(1, 3);
        let ink: Vec<bool> = (0..8).map(|i| dash.is_ink(i)).collect();
        assert_eq!(ink, vec![true, false, false, false, true, false, false, false]);
        assert!((0..8).all(|i| DashPattern::SOLID.is_ink(i)));
    }

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_pixel(5, 0, (255, 0, 0));
        canvas.put_pixel(1, 1, (1, 2, 3));
        assert_eq!(canvas.get_pixel(1, 1), (1, 2, 3));
        assert_eq!(canvas.data.iter().filter(|&&b| b == 255).count(), 1);
    }

    #[test]
    fn half_block_pairs_rows() {
        let mut canvas = Canvas::new(1, 4);
        canvas.put_pixel(0, 2, (10, 10, 10));
        canvas.put_pixel(0, 3, (20, 20, 20));
        assert_eq!(canvas.half_block(0, 1), ((10, 10, 10), (20, 20, 20)));
    }

    #[test]
    fn region_contains_is_half_open() {
        let region = Region::new(1, 1, 2, 2);
        assert!(region.contains(1, 1));
        assert!(region.contains(2, 2));
        assert!(!region.contains(3, 1));
        assert!(!region.contains(0, 1));
    }
}
