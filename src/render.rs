//! The boundary with the presentation layer.
//!
//! A renderer receives an immutable [`Frame`] once per step and maps the
//! positions it contains to the screen with `display_scale` and its own
//! viewport offset. The physics core holds no display resources.

use ultraviolet::DVec2;

use crate::body::{Body, Color};
use crate::trail::Trail;

/// What a renderer needs to draw one body.
#[derive(Clone, Copy, Debug)]
pub struct BodyView<'a> {
    pub name: &'a str,
    pub position: DVec2,
    pub radius: f64,
    pub color: Color,
    pub primary: bool,
    pub distance_to_primary: f64,
    pub trail: &'a Trail,
}

impl BodyView<'_> {
    /// Caption shown next to orbiting bodies: the name and the distance to the
    /// primary in whole kilometers. The primary itself gets no label.
    pub fn label(&self) -> Option<String> {
        (!self.primary).then(|| {
            format!("{} {}km", self.name, (self.distance_to_primary / 1000.0).round())
        })
    }
}

impl<'a> From<&'a Body> for BodyView<'a> {
    fn from(body: &'a Body) -> Self {
        Self {
            name: body.name(),
            position: body.position(),
            radius: body.radius(),
            color: body.color(),
            primary: body.is_primary(),
            distance_to_primary: body.distance_to_primary(),
            trail: body.trail(),
        }
    }
}

/// Snapshot of the whole simulation after a step.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub step: u64,
    /// Simulated seconds.
    pub elapsed: f64,
    /// Display units per simulation meter.
    pub display_scale: f64,
    pub bodies: Vec<BodyView<'a>>,
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_has_no_label() {
        let sun = Body::new("sun", DVec2::zero(), DVec2::zero(), 1.0)
            .unwrap()
            .with_primary(true);
        assert_eq!(BodyView::from(&sun).label(), None);
    }

    #[test]
    fn label_rounds_to_kilometers() {
        let mut earth = Body::new("Earth", DVec2::zero(), DVec2::zero(), 1.0).unwrap();
        earth.distance_to_primary = 149_600_499.0;
        assert_eq!(
            BodyView::from(&earth).label().as_deref(),
            Some("Earth 149600km")
        );
    }
}
