//! The drawing surface the core hands visuals to.

use crate::entities::{HealthBand, Transform, Visual};
use crate::geometry::{Rect, Vector2};

pub trait VisualSink {
    /// Draw `visual` centered at the transform's position.
    fn draw(&mut self, visual: &Visual, transform: &Transform);

    /// A bar filled to `fraction` of `area`.
    fn draw_bar(&mut self, area: Rect, fraction: f64, band: HealthBand);

    /// A line of text whose left edge starts at `at`.
    fn draw_label(&mut self, text: &str, at: Vector2);
}
