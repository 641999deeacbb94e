//! [`RenderingSurface`] over a [`Canvas`].

use super::text::{draw_text, text_size};
use super::viewport::{format_graduation, nice_step};
use super::{Axis, Canvas, DashPattern, Region, RenderingSurface, SampleRange, StyleToken, Viewport};
use crate::color::ThemeColors;
use crate::geometry::{LabelPlacement, RelativePosition};

/// Pixel sizes and counts for the canvas primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    pub graduation_ticks: usize,
    pub tick_length: usize,
    pub dot_radius: usize,
    pub label_scale: usize,
    pub label_margin: usize,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            graduation_ticks: 8,
            tick_length: 2,
            dot_radius: 2,
            label_scale: 1,
            label_margin: 2,
        }
    }
}

pub struct CanvasSurface<'a> {
    canvas: &'a mut Canvas,
    viewport: Viewport,
    colors: ThemeColors,
    options: SurfaceOptions,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(
        canvas: &'a mut Canvas,
        viewport: Viewport,
        colors: ThemeColors,
        options: SurfaceOptions,
    ) -> Self {
        Self {
            canvas,
            viewport,
            colors,
            options,
        }
    }

    /// Tick step shared by the grid and the graduations so they line up.
    fn tick_step(&self) -> f32 {
        nice_step(self.viewport.min_span(), self.options.graduation_ticks)
    }

    #[inline]
    fn plot(&mut self, clip: Region, x: isize, y: isize, color: (u8, u8, u8)) {
        if clip.contains(x, y) {
            self.canvas.put_pixel(x as usize, y as usize, color);
        }
    }

    fn line(&mut self, clip: Region, from: (isize, isize), to: (isize, isize), color: (u8, u8, u8)) {
        self.dashed_line(clip, from, to, color, DashPattern::SOLID);
    }

    fn dashed_line(
        &mut self,
        clip: Region,
        (x0, y0): (isize, isize),
        (x1, y1): (isize, isize),
        color: (u8, u8, u8),
        dash: DashPattern,
    ) {
        let mut points = Vec::new();
        bresenham_line(x0, y0, x1, y1, |x, y| points.push((x, y)));
        for (i, (x, y)) in points.into_iter().enumerate() {
            if dash.is_ink(i) {
                self.plot(clip, x, y, color);
            }
        }
    }

    fn label_origin(
        &self,
        (ax, ay): (isize, isize),
        (w, h): (usize, usize),
        placement: LabelPlacement,
    ) -> (isize, isize) {
        let margin = self.options.label_margin as isize;
        let (w, h) = (w as isize, h as isize);

        let x = match placement.horizontal {
            RelativePosition::Before => ax - w - margin,
            RelativePosition::After => ax + margin,
            RelativePosition::None => ax - w / 2,
        };
        // Pixel rows grow downward: "after" along the plot's y axis is up.
        let y = match placement.vertical {
            RelativePosition::After => ay - h - margin,
            RelativePosition::Before => ay + margin,
            RelativePosition::None => ay - h / 2,
        };
        (x, y)
    }
}

impl RenderingSurface for CanvasSurface<'_> {
    fn fill_background(&mut self, clip: Region, style: StyleToken) {
        let color = self.colors.resolve(style);
        for y in clip.y..(clip.y + clip.height).min(self.canvas.height) {
            for x in clip.x..(clip.x + clip.width).min(self.canvas.width) {
                self.canvas.put_pixel(x, y, color);
            }
        }
    }

    fn draw_grid(&mut self, clip: Region) {
        let step = self.tick_step();
        let color = self.colors.resolve(StyleToken::Grid);
        let vp = self.viewport;
        let (w, h) = (vp.width as isize, vp.height as isize);

        for x in Viewport::ticks(vp.x_min, vp.x_max, step) {
            let (px, _) = vp.to_pixel_i(x, 0.0);
            self.line(clip, (px, 0), (px, h - 1), color);
        }
        for y in Viewport::ticks(vp.y_min, vp.y_max, step) {
            let (_, py) = vp.to_pixel_i(0.0, y);
            self.line(clip, (0, py), (w - 1, py), color);
        }
    }

    fn draw_axes(&mut self, clip: Region) {
        let color = self.colors.resolve(StyleToken::Axis);
        let vp = self.viewport;
        let (ox, oy) = vp.to_pixel_i(0.0, 0.0);
        self.line(clip, (0, oy), (vp.width as isize - 1, oy), color);
        self.line(clip, (ox, 0), (ox, vp.height as isize - 1), color);
    }

    fn draw_labels_and_graduations(&mut self, clip: Region, axis: Axis) {
        let step = self.tick_step();
        let tick_color = self.colors.resolve(StyleToken::Axis);
        let text_color = self.colors.resolve(StyleToken::Graduation);
        let tick = self.options.tick_length as isize;
        let scale = self.options.label_scale;
        let vp = self.viewport;

        let values = match axis {
            Axis::Horizontal => Viewport::ticks(vp.x_min, vp.x_max, step),
            Axis::Vertical => Viewport::ticks(vp.y_min, vp.y_max, step),
        };

        for value in values {
            // The origin is labelled by the axes crossing.
            if value == 0.0 {
                continue;
            }
            let text = format_graduation(value, step);
            let (tw, th) = text_size(&text, scale);
            let (tw, th) = (tw as isize, th as isize);

            match axis {
                Axis::Horizontal => {
                    let (px, py) = vp.to_pixel_i(value, 0.0);
                    self.line(clip, (px, py - tick), (px, py + tick), tick_color);
                    draw_text(self.canvas, clip, px - tw / 2, py + tick + 1, &text, text_color, scale);
                }
                Axis::Vertical => {
                    let (px, py) = vp.to_pixel_i(0.0, value);
                    self.line(clip, (px - tick, py), (px + tick, py), tick_color);
                    draw_text(self.canvas, clip, px - tick - 1 - tw, py - th / 2, &text, text_color, scale);
                }
            }
        }
    }

    fn draw_curve(
        &mut self,
        clip: Region,
        range: SampleRange,
        curve: &dyn Fn(f32) -> (f32, f32),
        dashed: bool,
        style: StyleToken,
    ) {
        let color = self.colors.resolve(style);
        let vp = self.viewport;
        let mut previous: Option<(isize, isize)> = None;

        for (i, t) in range.samples().enumerate() {
            let (x, y) = curve(t);
            let point = vp.to_pixel_i(x, y);
            if let Some(prev) = previous {
                // Dashed curves skip every other sample interval.
                if !dashed || i % 2 == 1 {
                    self.line(clip, prev, point, color);
                }
            } else {
                self.plot(clip, point.0, point.1, color);
            }
            previous = Some(point);
        }
    }

    fn draw_segment(
        &mut self,
        clip: Region,
        axis: Axis,
        position: f32,
        from: f32,
        to: f32,
        style: StyleToken,
        dash: DashPattern,
    ) {
        let color = self.colors.resolve(style);
        let vp = self.viewport;
        let (start, end) = match axis {
            Axis::Vertical => (vp.to_pixel_i(position, from), vp.to_pixel_i(position, to)),
            Axis::Horizontal => (vp.to_pixel_i(from, position), vp.to_pixel_i(to, position)),
        };
        self.dashed_line(clip, start, end, color, dash);
    }

    fn draw_dot(&mut self, clip: Region, x: f32, y: f32, style: StyleToken, filled: bool) {
        let color = self.colors.resolve(style);
        let (cx, cy) = self.viewport.to_pixel_i(x, y);
        let r = self.options.dot_radius as isize;
        let outer = r * r;
        let inner = (r - 1).max(0).pow(2);

        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 <= outer && (filled || d2 >= inner) {
                    self.plot(clip, cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_label(
        &mut self,
        clip: Region,
        x: f32,
        y: f32,
        text: &str,
        style: StyleToken,
        placement: LabelPlacement,
    ) {
        let color = self.colors.resolve(style);
        let scale = self.options.label_scale;
        let anchor = self.viewport.to_pixel_i(x, y);
        let (lx, ly) = self.label_origin(anchor, text_size(text, scale), placement);
        draw_text(self.canvas, clip, lx, ly, text, color, scale);
    }
}

/// Walk the pixels of a line with Bresenham's algorithm, endpoints included.
pub fn bresenham_line(
    x0: isize,
    y0: isize,
    x1: isize,
    y1: isize,
    mut visit: impl FnMut(isize, isize),
) {
    let (mut x, mut y) = (x0, y0);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: isize = if x0 < x1 { 1 } else { -1 };
    let sy: isize = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        visit(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
