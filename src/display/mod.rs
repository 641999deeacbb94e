pub mod print;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::complex::{ComplexValue, ComplexValueSource};
use crate::config::Config;
use crate::renderer::{Canvas, CanvasSurface, Viewport};
use crate::view::ComplexGraphView;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Terminal,
    Print,
}

/// Render the graph of `value` over the whole canvas.
pub fn render_graph(canvas: &mut Canvas, value: ComplexValue, config: &Config) {
    let clip = canvas.region();
    let viewport = Viewport::fit(value, canvas.width, canvas.height, config.graph.margin);
    let mut surface = CanvasSurface::new(
        canvas,
        viewport,
        config.colors.resolve(),
        config.graph.surface_options(),
    );
    ComplexGraphView::new(&value, &config.labels).render(&mut surface, clip);
}

/// One-line numeric summary of the value.
pub fn describe(source: &impl ComplexValueSource) -> String {
    let value = source.snapshot();
    let phase = source.phase();
    format!(
        "z = {}  |z| = {:.4}  arg(z) = {:.4} rad ({:.2}°)",
        value,
        value.magnitude(),
        phase,
        phase.to_degrees()
    )
}
