//! Pan / zoom state and the screen <-> buffer mapping.
//!
//! The stroke buffers sit on an inner layer that is scaled and then
//! translated inside the untransformed container, with the transform origin
//! at the container's top-left corner:
//!
//! ```text
//! screen = buffer * scale + offset
//! buffer = (screen - offset) / scale
//! ```
//!
//! Screen points are always measured relative to the untransformed layer
//! box (the picture-shaped rectangle inside the container), never relative
//! to the transformed layer. [`crate::MaskSurface`] shifts window positions
//! by the layer origin before they get here.

use crate::types::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    scale: f32,
    offset: Point,
    min_scale: f32,
    max_scale: f32,
}

impl Viewport {
    /// Bounds must already be validated (`SurfaceConfig::validate`).
    pub(crate) fn new(min_scale: f32, max_scale: f32) -> Self {
        Self { scale: 1.0f32.clamp(min_scale, max_scale), offset: Point::ORIGIN, min_scale, max_scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn can_zoom_in(&self) -> bool {
        self.scale < self.max_scale
    }

    pub fn can_zoom_out(&self) -> bool {
        self.scale > self.min_scale
    }

    pub fn screen_to_buffer(&self, screen: Point) -> Point {
        Point::new((screen.x - self.offset.x) / self.scale, (screen.y - self.offset.y) / self.scale)
    }

    pub fn buffer_to_screen(&self, buffer: Point) -> Point {
        Point::new(buffer.x * self.scale + self.offset.x, buffer.y * self.scale + self.offset.y)
    }

    /// Unclamped: content may be dragged fully off-screen.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx;
        self.offset.y += dy;
    }

    /// Move to `requested` scale (clamped) keeping `anchor` visually fixed.
    pub fn zoom_to(&mut self, requested: f32, anchor: Point) {
        if !requested.is_finite() {
            return;
        }
        let new_scale = requested.clamp(self.min_scale, self.max_scale);
        let ratio = new_scale / self.scale;
        self.offset.x = anchor.x - (anchor.x - self.offset.x) * ratio;
        self.offset.y = anchor.y - (anchor.y - self.offset.y) * ratio;
        self.scale = new_scale;
    }

    /// Additive zoom (wheel policy).
    pub fn zoom_at_point(&mut self, delta_scale: f32, anchor: Point) {
        self.zoom_to(self.scale + delta_scale, anchor);
    }

    /// Multiplicative zoom around the centre of `area` (button policy).
    pub fn zoom_step(&mut self, direction: ZoomDirection, factor: f32, area: Size) {
        let requested = match direction {
            ZoomDirection::In => self.scale * factor,
            ZoomDirection::Out => self.scale / factor,
        };
        self.zoom_to(requested, area.center());
    }

    pub fn reset(&mut self) {
        self.scale = 1.0f32.clamp(self.min_scale, self.max_scale);
        self.offset = Point::ORIGIN;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::config::MIN_SCALE, crate::config::MAX_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_SCALE, MIN_SCALE};
    use proptest::prelude::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() <= 1e-2 * (1.0 + a.x.abs()) && (a.y - b.y).abs() <= 1e-2 * (1.0 + a.y.abs())
    }

    #[test]
    fn identity_mapping_at_rest() {
        let vp = Viewport::default();
        assert_eq!(vp.screen_to_buffer(Point::new(12.0, 34.0)), Point::new(12.0, 34.0));
    }

    #[test]
    fn mapping_accounts_for_offset_and_scale() {
        let mut vp = Viewport::default();
        vp.zoom_to(2.0, Point::ORIGIN);
        vp.pan_by(10.0, -20.0);
        assert_eq!(vp.screen_to_buffer(Point::new(30.0, 20.0)), Point::new(10.0, 20.0));
        assert_eq!(vp.buffer_to_screen(Point::new(10.0, 20.0)), Point::new(30.0, 20.0));
    }

    #[test]
    fn pan_is_unclamped() {
        let mut vp = Viewport::default();
        vp.pan_by(-5000.0, 9000.0);
        vp.pan_by(1.0, 1.0);
        assert_eq!(vp.offset(), Point::new(-4999.0, 9001.0));
    }

    #[test]
    fn zoom_to_center_keeps_center_fixed() {
        // 400x300 container, scale 1 -> 2 anchored at (200, 150).
        let mut vp = Viewport::default();
        let center = Size::new(400, 300).center();
        let before = vp.screen_to_buffer(center);
        vp.zoom_to(2.0, center);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.offset(), Point::new(-200.0, -150.0));
        assert_eq!(vp.buffer_to_screen(before), center);
    }

    #[test]
    fn button_zoom_uses_factor_and_center() {
        let mut vp = Viewport::default();
        vp.zoom_step(ZoomDirection::In, 1.2, Size::new(400, 300));
        assert!((vp.scale() - 1.2).abs() < 1e-6);
        vp.zoom_step(ZoomDirection::Out, 1.2, Size::new(400, 300));
        assert!((vp.scale() - 1.0).abs() < 1e-6);
        assert!(close(vp.offset(), Point::ORIGIN));
    }

    #[test]
    fn zoom_is_clamped_not_rejected() {
        let mut vp = Viewport::default();
        let anchor = Point::new(50.0, 60.0);
        let before = vp.screen_to_buffer(anchor);
        vp.zoom_at_point(100.0, anchor);
        assert_eq!(vp.scale(), MAX_SCALE);
        assert!(!vp.can_zoom_in());
        assert!(close(vp.screen_to_buffer(anchor), before));

        vp.zoom_at_point(-100.0, anchor);
        assert_eq!(vp.scale(), MIN_SCALE);
        assert!(!vp.can_zoom_out());
    }

    #[test]
    fn zoom_at_bound_leaves_offset_alone() {
        let mut vp = Viewport::default();
        vp.zoom_to(MAX_SCALE, Point::ORIGIN);
        vp.pan_by(3.0, 4.0);
        vp.zoom_at_point(1.0, Point::new(100.0, 100.0));
        assert_eq!(vp.offset(), Point::new(3.0, 4.0));
    }

    #[test]
    fn reset_restores_identity() {
        let mut vp = Viewport::default();
        vp.zoom_at_point(3.0, Point::new(7.0, 7.0));
        vp.pan_by(40.0, 40.0);
        vp.reset();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), Point::ORIGIN);
    }

    proptest! {
        #[test]
        fn scale_stays_in_bounds(start in MIN_SCALE..=MAX_SCALE, delta in -50.0f32..50.0, ax in -500.0f32..500.0, ay in -500.0f32..500.0) {
            let mut vp = Viewport::default();
            vp.zoom_to(start, Point::ORIGIN);
            vp.zoom_at_point(delta, Point::new(ax, ay));
            prop_assert!(vp.scale() >= MIN_SCALE && vp.scale() <= MAX_SCALE);
        }

        #[test]
        fn anchor_is_invariant(start in MIN_SCALE..=MAX_SCALE, delta in -20.0f32..20.0, ox in -300.0f32..300.0, oy in -300.0f32..300.0, ax in 0.0f32..800.0, ay in 0.0f32..600.0) {
            let mut vp = Viewport::default();
            vp.zoom_to(start, Point::ORIGIN);
            vp.pan_by(ox, oy);
            let anchor = Point::new(ax, ay);
            let before = vp.screen_to_buffer(anchor);
            vp.zoom_at_point(delta, anchor);
            let after = vp.screen_to_buffer(anchor);
            prop_assert!(close(before, after), "before {:?} after {:?}", before, after);
        }
    }
}
