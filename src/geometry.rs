//! Geometry of the complex graph.
//!
//! Turns one [`ComplexValue`] into everything the view draws: the radius
//! segment, the partial ellipse marking the phase angle, and where each of the
//! four labels sits relative to its anchor. Pure functions only; nothing here
//! touches a surface.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::complex::ComplexValue;

/// Divides the value's components to get the ellipse semi-axes, keeping the
/// arc inside the radius segment.
pub const ARC_SHRINK_FACTOR: f32 = 5.0;

/// Offset of a label from its anchor along one axis.
///
/// `Before` points toward the negative direction of the axis in plot
/// coordinates (left, or below), `After` toward the positive one (right, or
/// above). `None` centers the label on the anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelativePosition {
    #[default]
    None,
    Before,
    After,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelPlacement {
    pub horizontal: RelativePosition,
    pub vertical: RelativePosition,
}

impl LabelPlacement {
    pub const fn new(horizontal: RelativePosition, vertical: RelativePosition) -> Self {
        Self { horizontal, vertical }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    RealPart,
    ImaginaryPart,
    Magnitude,
    Phase,
}

/// A label anchored at a plot coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    pub kind: LabelKind,
    pub anchor: (f32, f32),
    pub placement: LabelPlacement,
}

/// Partial ellipse `(a·cos(t·th), b·sin(t·th))` for `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParameters {
    pub semi_axis_a: f32,
    pub semi_axis_b: f32,
    pub angular_span: f32,
}

impl ArcParameters {
    #[inline]
    pub fn point_at(&self, t: f32) -> (f32, f32) {
        let angle = t * self.angular_span;
        (self.semi_axis_a * angle.cos(), self.semi_axis_b * angle.sin())
    }

    /// The arc as a curve closure, parameters captured by value.
    pub fn curve(self) -> impl Fn(f32) -> (f32, f32) {
        move |t| self.point_at(t)
    }
}

/// Segment from the origin to the value: `(t·real, t·imag)`.
pub fn radius_segment(value: ComplexValue) -> impl Fn(f32) -> (f32, f32) {
    move |t| (t * value.real, t * value.imag)
}

/// Compute the ellipse semi-axes and the angular span of the phase arc.
///
/// The span is where the ellipse `(a·cos t, b·sin t)` meets the ray of the
/// value's phase: `atan((a/b)·tan(phase))`, moved by ±π for the left
/// half-plane since `atan` only reaches (-π/2, π/2). On the imaginary axis the
/// ellipse would be flat, so the arc becomes a quarter turn of width 1/5.
///
/// # Panics
///
/// Panics when `value.imag == 0`. Purely real values have no arc and must be
/// routed to another view before reaching this one.
pub fn compute_arc(value: ComplexValue) -> ArcParameters {
    assert!(
        value.imag != 0.0,
        "complex graph requires a non-zero imaginary part, got {}",
        value
    );

    let semi_axis_b = value.imag.abs() / ARC_SHRINK_FACTOR;

    // Exact comparison: values merely close to the axis still get a real ellipse.
    if value.real == 0.0 {
        return ArcParameters {
            semi_axis_a: 1.0 / ARC_SHRINK_FACTOR,
            semi_axis_b,
            angular_span: if value.imag > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 },
        };
    }

    let semi_axis_a = value.real.abs() / ARC_SHRINK_FACTOR;
    let mut angular_span = ((value.real / value.imag).abs() * value.phase().tan()).atan();
    if value.real < 0.0 {
        angular_span += if value.imag < 0.0 { -PI } else { PI };
    }

    ArcParameters {
        semi_axis_a,
        semi_axis_b,
        angular_span,
    }
}

/// Place the real, imaginary, magnitude and phase labels, in that order.
pub fn compute_label_placements(value: ComplexValue, arc: &ArcParameters) -> [PlacedLabel; 4] {
    use RelativePosition::{After, Before, None};

    let real = value.real;
    let imag = value.imag;

    let real_part = PlacedLabel {
        kind: LabelKind::RealPart,
        anchor: (real, 0.0),
        placement: LabelPlacement::new(None, if imag >= 0.0 { Before } else { After }),
    };

    let imaginary_part = PlacedLabel {
        kind: LabelKind::ImaginaryPart,
        anchor: (0.0, imag),
        placement: LabelPlacement::new(if real >= 0.0 { Before } else { After }, None),
    };

    let magnitude_vertical = if real == 0.0 {
        None
    } else if real * imag < 0.0 {
        Before
    } else {
        After
    };
    let magnitude = PlacedLabel {
        kind: LabelKind::Magnitude,
        anchor: (real / 2.0, imag / 2.0),
        placement: LabelPlacement::new(None, magnitude_vertical),
    };

    // Right half-plane: next to the real axis. Left half-plane: halfway along
    // the arc, clear of its far end.
    let angle_ratio = if real >= 0.0 { 0.0 } else { 0.5 };
    let phase = PlacedLabel {
        kind: LabelKind::Phase,
        anchor: arc.point_at(angle_ratio),
        placement: LabelPlacement::new(
            if real >= 0.0 { After } else { None },
            if imag >= 0.0 { After } else { Before },
        ),
    };

    [real_part, imaginary_part, magnitude, phase]
}

/// Everything one render pass needs, derived from a single snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphGeometry {
    pub value: ComplexValue,
    pub arc: ArcParameters,
    pub labels: [PlacedLabel; 4],
}

impl GraphGeometry {
    pub fn compile(value: ComplexValue) -> Self {
        let arc = compute_arc(value);
        let labels = compute_label_placements(value, &arc);
        Self { value, arc, labels }
    }

    pub fn radius_segment(&self) -> impl Fn(f32) -> (f32, f32) {
        radius_segment(self.value)
    }
}
