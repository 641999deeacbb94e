//! The complex graph view: one render pass over a [`RenderingSurface`].

use tracing::debug;

use crate::complex::ComplexValueSource;
use crate::config::LabelConfig;
use crate::geometry::{GraphGeometry, LabelKind};
use crate::renderer::{Axis, DashPattern, Region, RenderingSurface, SampleRange, StyleToken};

/// Sampling of the radius segment and the phase arc.
pub const CURVE_SAMPLES: SampleRange = SampleRange::new(0.0, 1.0, 0.01);

/// Dash pattern of the projection guides onto the axes.
pub const PROJECTION_DASH: DashPattern = DashPattern::new(1, 3);

pub struct ComplexGraphView<'a, S: ComplexValueSource> {
    source: &'a S,
    labels: &'a LabelConfig,
}

impl<'a, S: ComplexValueSource> ComplexGraphView<'a, S> {
    pub fn new(source: &'a S, labels: &'a LabelConfig) -> Self {
        Self { source, labels }
    }

    fn label_text(&self, kind: LabelKind) -> &str {
        match kind {
            LabelKind::RealPart => &self.labels.real,
            LabelKind::ImaginaryPart => &self.labels.imaginary,
            LabelKind::Magnitude => &self.labels.magnitude,
            LabelKind::Phase => &self.labels.phase,
        }
    }

    /// Draw the whole graph into `clip`.
    ///
    /// The source is read once; every primitive below works from that
    /// snapshot. Panics if the snapshot is purely real.
    pub fn render<R: RenderingSurface>(&self, surface: &mut R, clip: Region) {
        let value = self.source.snapshot();
        let geometry = GraphGeometry::compile(value);
        debug!(
            "Complex graph for {}: arc a={} b={} th={}",
            value,
            geometry.arc.semi_axis_a,
            geometry.arc.semi_axis_b,
            geometry.arc.angular_span
        );

        surface.fill_background(clip, StyleToken::Background);

        surface.draw_grid(clip);
        surface.draw_axes(clip);
        surface.draw_labels_and_graduations(clip, Axis::Vertical);
        surface.draw_labels_and_graduations(clip, Axis::Horizontal);

        let radius = geometry.radius_segment();
        surface.draw_curve(clip, CURVE_SAMPLES, &radius, false, StyleToken::NeutralDark);

        let arc = geometry.arc.curve();
        surface.draw_curve(clip, CURVE_SAMPLES, &arc, false, StyleToken::NeutralDark);

        surface.draw_segment(
            clip,
            Axis::Vertical,
            value.real,
            0.0,
            value.imag,
            StyleToken::Accent,
            PROJECTION_DASH,
        );
        surface.draw_segment(
            clip,
            Axis::Horizontal,
            value.imag,
            0.0,
            value.real,
            StyleToken::Accent,
            PROJECTION_DASH,
        );

        surface.draw_dot(clip, value.real, value.imag, StyleToken::Accent, true);

        for label in geometry.labels {
            let (x, y) = label.anchor;
            surface.draw_label(
                clip,
                x,
                y,
                self.label_text(label.kind),
                StyleToken::Accent,
                label.placement,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Theme;
    use crate::complex::ComplexValue;
    use crate::geometry::{LabelPlacement, RelativePosition};
    use crate::renderer::{Canvas, CanvasSurface, SurfaceOptions, Viewport};
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Background(StyleToken),
        Grid,
        Axes,
        Graduations(Axis),
        Curve {
            start: (f32, f32),
            end: (f32, f32),
            samples: usize,
            dashed: bool,
            style: StyleToken,
        },
        Segment(Axis, f32, f32, f32, StyleToken, DashPattern),
        Dot(f32, f32, StyleToken, bool),
        Label(f32, f32, String, StyleToken, LabelPlacement),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl RenderingSurface for Recorder {
        fn fill_background(&mut self, _clip: Region, style: StyleToken) {
            self.ops.push(Op::Background(style));
        }

        fn draw_grid(&mut self, _clip: Region) {
            self.ops.push(Op::Grid);
        }

        fn draw_axes(&mut self, _clip: Region) {
            self.ops.push(Op::Axes);
        }

        fn draw_labels_and_graduations(&mut self, _clip: Region, axis: Axis) {
            self.ops.push(Op::Graduations(axis));
        }

        fn draw_curve(
            &mut self,
            _clip: Region,
            range: SampleRange,
            curve: &dyn Fn(f32) -> (f32, f32),
            dashed: bool,
            style: StyleToken,
        ) {
            self.ops.push(Op::Curve {
                start: curve(range.t_min),
                end: curve(range.t_max),
                samples: range.samples().count(),
                dashed,
                style,
            });
        }

        fn draw_segment(
            &mut self,
            _clip: Region,
            axis: Axis,
            position: f32,
            from: f32,
            to: f32,
            style: StyleToken,
            dash: DashPattern,
        ) {
            self.ops.push(Op::Segment(axis, position, from, to, style, dash));
        }

        fn draw_dot(&mut self, _clip: Region, x: f32, y: f32, style: StyleToken, filled: bool) {
            self.ops.push(Op::Dot(x, y, style, filled));
        }

        fn draw_label(
            &mut self,
            _clip: Region,
            x: f32,
            y: f32,
            text: &str,
            style: StyleToken,
            placement: LabelPlacement,
        ) {
            self.ops.push(Op::Label(x, y, text.to_string(), style, placement));
        }
    }

    /// Source that counts how often it is read.
    struct CountingSource {
        value: ComplexValue,
        reads: Cell<usize>,
    }

    impl ComplexValueSource for CountingSource {
        fn real(&self) -> f32 {
            self.reads.set(self.reads.get() + 1);
            self.value.real
        }

        fn imag(&self) -> f32 {
            self.reads.set(self.reads.get() + 1);
            self.value.imag
        }
    }

    fn record(value: ComplexValue) -> Vec<Op> {
        let labels = LabelConfig::default();
        let view = ComplexGraphView::new(&value, &labels);
        let mut recorder = Recorder::default();
        view.render(&mut recorder, Region::new(0, 0, 100, 100));
        recorder.ops
    }

    #[test]
    fn render_sequence_is_fixed() {
        let ops = record(ComplexValue::new(3.0, 4.0));
        assert_eq!(ops.len(), 14);
        assert_eq!(ops[0], Op::Background(StyleToken::Background));
        assert_eq!(ops[1], Op::Grid);
        assert_eq!(ops[2], Op::Axes);
        assert_eq!(ops[3], Op::Graduations(Axis::Vertical));
        assert_eq!(ops[4], Op::Graduations(Axis::Horizontal));
        assert!(matches!(ops[5], Op::Curve { .. }));
        assert!(matches!(ops[6], Op::Curve { .. }));
        assert!(matches!(ops[7], Op::Segment(Axis::Vertical, ..)));
        assert!(matches!(ops[8], Op::Segment(Axis::Horizontal, ..)));
        assert!(matches!(ops[9], Op::Dot(..)));
        assert_eq!(ops[10..].len(), 4);
        assert!(ops[10..].iter().all(|op| matches!(op, Op::Label(..))));
    }

    #[test]
    fn curves_span_radius_and_arc() {
        let ops = record(ComplexValue::new(3.0, 4.0));
        let Op::Curve { start, end, samples, dashed, style } = ops[5].clone() else {
            panic!("expected radius curve, got {:?}", ops[5]);
        };
        assert_eq!((start, end), ((0.0, 0.0), (3.0, 4.0)));
        assert_eq!(samples, 101);
        assert!(!dashed);
        assert_eq!(style, StyleToken::NeutralDark);

        let Op::Curve { start, end, style, .. } = ops[6].clone() else {
            panic!("expected arc curve, got {:?}", ops[6]);
        };
        assert!((start.0 - 0.6).abs() < 1e-6 && start.1 == 0.0);
        // Arc ends on the ray toward 3+4i.
        assert!((end.1.atan2(end.0) - 4.0_f32.atan2(3.0)).abs() < 1e-4);
        assert_eq!(style, StyleToken::NeutralDark);
    }

    #[test]
    fn projections_dot_and_labels_use_accent() {
        let ops = record(ComplexValue::new(-2.0, 3.0));
        assert_eq!(
            ops[7],
            Op::Segment(Axis::Vertical, -2.0, 0.0, 3.0, StyleToken::Accent, PROJECTION_DASH)
        );
        assert_eq!(
            ops[8],
            Op::Segment(Axis::Horizontal, 3.0, 0.0, -2.0, StyleToken::Accent, PROJECTION_DASH)
        );
        assert_eq!(ops[9], Op::Dot(-2.0, 3.0, StyleToken::Accent, true));

        let texts: Vec<String> = ops[10..]
            .iter()
            .map(|op| match op {
                Op::Label(_, _, text, style, _) => {
                    assert_eq!(*style, StyleToken::Accent);
                    text.clone()
                }
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(texts, vec!["re(z)", "im(z)", "|z|", "arg(z)"]);

        assert_eq!(
            ops[12],
            Op::Label(
                -1.0,
                1.5,
                "|z|".to_string(),
                StyleToken::Accent,
                LabelPlacement::new(RelativePosition::None, RelativePosition::Before)
            )
        );
    }

    #[test]
    fn render_is_repeatable() {
        let value = ComplexValue::new(-0.75, -1.5);
        assert_eq!(record(value), record(value));
    }

    #[test]
    fn source_is_read_once_per_pass() {
        let source = CountingSource {
            value: ComplexValue::new(1.0, 2.0),
            reads: Cell::new(0),
        };
        let labels = LabelConfig::default();
        let view = ComplexGraphView::new(&source, &labels);
        let mut recorder = Recorder::default();
        view.render(&mut recorder, Region::new(0, 0, 10, 10));
        // One snapshot: real and imag fetched once each.
        assert_eq!(source.reads.get(), 2);
    }

    #[test]
    #[should_panic(expected = "non-zero imaginary part")]
    fn purely_real_source_aborts_the_pass() {
        record(ComplexValue::new(4.0, 0.0));
    }

    #[test]
    fn renders_marker_onto_canvas() {
        let value = ComplexValue::new(3.0, 4.0);
        let theme = Theme::Light.colors();
        let vp = Viewport::fit(value, 160, 120, 0.25);
        let mut canvas = Canvas::new(160, 120);
        let clip = canvas.region();
        let labels = LabelConfig::default();
        {
            let mut surface = CanvasSurface::new(&mut canvas, vp, theme, SurfaceOptions::default());
            ComplexGraphView::new(&value, &labels).render(&mut surface, clip);
        }

        let (px, py) = vp.to_pixel_i(3.0, 4.0);
        assert_eq!(canvas.get_pixel(px as usize, py as usize), theme.accent);
        // Midway along the radius, away from the labels and the arc.
        let (mx, my) = vp.to_pixel_i(2.25, 3.0);
        assert_eq!(canvas.get_pixel(mx as usize, my as usize), theme.neutral_dark);
    }
}
