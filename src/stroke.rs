// Dual stroke buffers.
// • `visible`: what the user sees over the picture (white core + blue glow).
// • `mask`:    raw white-on-transparent stroke; the only input of the finalizer.
// Both always have the same size and receive the same segments, through
// `draw_segment` and nothing else.

use image::{Rgba, RgbaImage};
use log::debug;

use crate::composite::source_over;
use crate::types::{Point, Size};

/// Peak opacity of the halo right at the core's edge.
/// Visual: higher = the blue rim reads as a solid outline instead of a haze.
const GLOW_PEAK: f32 = 0.6;
/// How far the halo reaches past the core, in multiples of the blur radius.
const GLOW_REACH: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeStyle {
    /// Solid colour, anti-aliased edge. Used for the mask.
    Plain { color: Rgba<u8> },
    /// Solid core painted over a gaussian halo. Cosmetic only.
    Glow { core: Rgba<u8>, glow: Rgba<u8>, blur: f32 },
}

impl StrokeStyle {
    pub const MASK: StrokeStyle = StrokeStyle::Plain { color: Rgba([255, 255, 255, 255]) };

    /// Distance past the core edge that this style can still touch.
    fn reach(&self) -> f32 {
        match *self {
            StrokeStyle::Plain { .. } => 0.5,
            StrokeStyle::Glow { blur, .. } => (blur * GLOW_REACH).max(0.5),
        }
    }
}

pub struct StrokeBuffers {
    visible: RgbaImage,
    mask: RgbaImage,
    visible_style: StrokeStyle,
}

impl StrokeBuffers {
    pub fn new(visible_style: StrokeStyle) -> Self {
        Self { visible: RgbaImage::new(0, 0), mask: RgbaImage::new(0, 0), visible_style }
    }

    pub fn size(&self) -> Size {
        Size::new(self.mask.width(), self.mask.height())
    }

    pub fn visible(&self) -> &RgbaImage {
        &self.visible
    }

    pub fn mask(&self) -> &RgbaImage {
        &self.mask
    }

    /// Reallocate both buffers. Always clears them, even for the same size.
    pub fn resize(&mut self, size: Size) {
        debug!("stroke buffers -> {}x{}", size.width, size.height);
        self.visible = RgbaImage::new(size.width, size.height);
        self.mask = RgbaImage::new(size.width, size.height);
    }

    /// Visual: every stroke vanishes at once; the picture shows through again.
    pub fn clear(&mut self) {
        for px in self.visible.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
        for px in self.mask.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    /// Straight segment `from -> to` (buffer space) of half-width `radius`
    /// into both buffers. Round caps, so consecutive segments join round.
    /// Visual: a white line with a soft blue halo; only the white part reaches the mask.
    pub fn draw_segment(&mut self, from: Point, to: Point, radius: f32) {
        if self.size().is_degenerate() {
            return;
        }
        paint_capsule(&mut self.mask, from, to, radius, StrokeStyle::MASK);
        paint_capsule(&mut self.visible, from, to, radius, self.visible_style);
    }
}

/// Distance from `p` to the segment `a-b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + abx * t, a.y + aby * t))
}

#[inline]
fn with_alpha(color: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let a = (color[3] as f32 * coverage).round().clamp(0.0, 255.0) as u8;
    Rgba([color[0], color[1], color[2], a])
}

fn paint_capsule(img: &mut RgbaImage, a: Point, b: Point, radius: f32, style: StrokeStyle) {
    if ![a.x, a.y, b.x, b.y, radius].iter().all(|v| v.is_finite()) {
        return;
    }
    let (w, h) = (img.width() as i64, img.height() as i64);
    let reach = radius + style.reach();

    // Bounding box of the capsule, clipped to the image.
    let x0 = ((a.x.min(b.x) - reach).floor() as i64).max(0);
    let y0 = ((a.y.min(b.y) - reach).floor() as i64).max(0);
    let x1 = ((a.x.max(b.x) + reach).ceil() as i64).min(w - 1);
    let y1 = ((a.y.max(b.y) + reach).ceil() as i64).min(h - 1);
    if x0 > x1 || y0 > y1 {
        return; // entirely off the buffer
    }

    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let d = distance_to_segment(center, a, b);
            if d > reach {
                continue;
            }
            // One pixel of anti-aliasing straddling the edge.
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            let px = img.get_pixel_mut(x as u32, y as u32);

            match style {
                StrokeStyle::Plain { color } => {
                    let src = with_alpha(color, coverage);
                    if src[3] > 0 {
                        *px = source_over(*px, src);
                    }
                }
                StrokeStyle::Glow { core, glow, blur } => {
                    let halo = if blur <= 0.0 {
                        0.0
                    } else if d <= radius {
                        GLOW_PEAK
                    } else {
                        let sigma = blur / 2.0;
                        let e = d - radius;
                        GLOW_PEAK * (-(e * e) / (2.0 * sigma * sigma)).exp()
                    };
                    let under = with_alpha(glow, halo);
                    if under[3] > 0 {
                        *px = source_over(*px, under);
                    }
                    let top = with_alpha(core, coverage);
                    if top[3] > 0 {
                        *px = source_over(*px, top);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BRUSH_CORE_COLOR, BRUSH_GLOW_BLUR, BRUSH_GLOW_COLOR};

    fn glow() -> StrokeStyle {
        StrokeStyle::Glow { core: BRUSH_CORE_COLOR, glow: BRUSH_GLOW_COLOR, blur: BRUSH_GLOW_BLUR }
    }

    fn buffers(w: u32, h: u32) -> StrokeBuffers {
        let mut b = StrokeBuffers::new(glow());
        b.resize(Size::new(w, h));
        b
    }

    #[test]
    fn segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Point::new(1.0, 1.0), a, a), 2f32.sqrt());
    }

    #[test]
    fn mask_gets_plain_white_core() {
        let mut b = buffers(100, 50);
        b.draw_segment(Point::new(10.0, 25.0), Point::new(90.0, 25.0), 5.0);
        assert_eq!(*b.mask().get_pixel(50, 24), Rgba([255, 255, 255, 255]));
        assert_eq!(*b.mask().get_pixel(50, 5), Rgba([0, 0, 0, 0]));
        // Round cap reaches slightly past the end point but not far.
        assert_eq!(b.mask().get_pixel(93, 24)[3], 255);
        assert_eq!(b.mask().get_pixel(97, 24)[3], 0);
    }

    #[test]
    fn visible_glow_never_leaks_into_mask() {
        let mut b = buffers(100, 50);
        b.draw_segment(Point::new(10.0, 25.0), Point::new(90.0, 25.0), 3.0);
        // 6px off the line: halo on screen, nothing in the mask.
        assert!(b.visible().get_pixel(50, 31)[3] > 0);
        assert_eq!(b.mask().get_pixel(50, 31)[3], 0);
        // Same core in both.
        assert_eq!(*b.visible().get_pixel(50, 25), Rgba([255, 255, 255, 255]));
        assert_eq!(*b.mask().get_pixel(50, 25), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn buffers_share_dimensions() {
        let mut b = buffers(10, 20);
        assert_eq!(b.visible().dimensions(), b.mask().dimensions());
        b.resize(Size::new(33, 7));
        assert_eq!(b.visible().dimensions(), (33, 7));
        assert_eq!(b.mask().dimensions(), (33, 7));
    }

    #[test]
    fn resize_and_clear_wipe_content() {
        let mut b = buffers(40, 40);
        b.draw_segment(Point::new(5.0, 5.0), Point::new(35.0, 35.0), 4.0);
        b.clear();
        assert!(b.mask().pixels().all(|p| p.0 == [0, 0, 0, 0]));
        assert!(b.visible().pixels().all(|p| p.0 == [0, 0, 0, 0]));

        b.draw_segment(Point::new(5.0, 5.0), Point::new(35.0, 35.0), 4.0);
        b.resize(Size::new(40, 40));
        assert!(b.mask().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn off_buffer_and_degenerate_draws_are_noops() {
        let mut b = buffers(20, 20);
        b.draw_segment(Point::new(-500.0, -500.0), Point::new(-400.0, -450.0), 5.0);
        assert!(b.mask().pixels().all(|p| p[3] == 0));

        let mut empty = StrokeBuffers::new(glow());
        empty.draw_segment(Point::new(0.0, 0.0), Point::new(5.0, 5.0), 5.0);
        assert_eq!(empty.size(), Size::new(0, 0));
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let mut b = buffers(20, 20);
        b.draw_segment(Point::new(f32::NAN, 1.0), Point::new(5.0, 5.0), 2.0);
        assert!(b.mask().pixels().all(|p| p[3] == 0));
    }
}
