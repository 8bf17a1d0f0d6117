//! Porter-Duff compositing on straight-alpha RGBA8 pixels.
//!
//! Only the three operators the painter needs:
//!
//! - `SourceOver`:      D' = S + D.(1 - Sa)
//! - `DestinationOut`:  D' = D.(1 - Sa)
//! - `DestinationOver`: D' = D + S.(1 - Da)
//!
//! Integer math with round-to-nearest so that the finalizer's output is
//! exact for fully covered and untouched pixels.

use image::{Rgba, RgbaImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompOp {
    SourceOver,
    DestinationOut,
    DestinationOver,
}

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[inline]
fn div_round(num: u32, den: u32) -> u8 {
    ((num + den / 2) / den).min(255) as u8
}

/// `top` over `bottom`.
#[inline]
pub fn source_over(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let ta = top[3] as u32;
    let ba = bottom[3] as u32;
    // Resulting alpha scaled by 255, kept unrounded for the colour division.
    let out_a255 = ta * 255 + ba * (255 - ta);
    if out_a255 == 0 {
        return TRANSPARENT;
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = top[c] as u32 * ta * 255 + bottom[c] as u32 * ba * (255 - ta);
        out[c] = div_round(num, out_a255);
    }
    out[3] = div_round(out_a255, 255);
    Rgba(out)
}

#[inline]
pub fn destination_out(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = div_round(dst[3] as u32 * (255 - src[3] as u32), 255);
    if a == 0 {
        return TRANSPARENT;
    }
    Rgba([dst[0], dst[1], dst[2], a])
}

#[inline]
pub fn destination_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    source_over(src, dst)
}

#[inline]
pub fn blend(op: CompOp, dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match op {
        CompOp::SourceOver => source_over(dst, src),
        CompOp::DestinationOut => destination_out(dst, src),
        CompOp::DestinationOver => destination_over(dst, src),
    }
}

/// Composite a solid colour over the whole image with `op`.
pub fn fill(dst: &mut RgbaImage, color: Rgba<u8>, op: CompOp) {
    for px in dst.pixels_mut() {
        *px = blend(op, *px, color);
    }
}

/// Composite `src` onto `dst` at the origin. Both must share dimensions.
pub fn composite_image(dst: &mut RgbaImage, src: &RgbaImage, op: CompOp) {
    debug_assert_eq!(dst.dimensions(), src.dimensions());
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        *d = blend(op, *d, *s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn source_over_opaque_replaces() {
        assert_eq!(source_over(BLACK, WHITE), WHITE);
        assert_eq!(source_over(WHITE, TRANSPARENT), WHITE);
        assert_eq!(source_over(TRANSPARENT, TRANSPARENT), TRANSPARENT);
    }

    #[test]
    fn source_over_accumulates_alpha() {
        let half_white = Rgba([255, 255, 255, 128]);
        let twice = source_over(half_white, half_white);
        assert_eq!(twice[0], 255);
        assert_eq!(twice[3], 192);
    }

    #[test]
    fn destination_out_punches_by_source_alpha() {
        assert_eq!(destination_out(BLACK, WHITE), TRANSPARENT);
        assert_eq!(destination_out(BLACK, TRANSPARENT), BLACK);
        assert_eq!(destination_out(BLACK, Rgba([255, 255, 255, 100])), Rgba([0, 0, 0, 155]));
    }

    #[test]
    fn destination_over_fills_underneath() {
        assert_eq!(destination_over(TRANSPARENT, WHITE), WHITE);
        assert_eq!(destination_over(BLACK, WHITE), BLACK);
        // Partially punched black over white gives the punched amount as grey.
        assert_eq!(destination_over(Rgba([0, 0, 0, 155]), WHITE), Rgba([100, 100, 100, 255]));
    }

    #[test]
    fn whole_image_passes() {
        let mut img = RgbaImage::new(2, 1);
        fill(&mut img, BLACK, CompOp::SourceOver);
        let mut hole = RgbaImage::new(2, 1);
        hole.put_pixel(1, 0, WHITE);
        composite_image(&mut img, &hole, CompOp::DestinationOut);
        fill(&mut img, WHITE, CompOp::DestinationOver);
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(1, 0), WHITE);
    }
}
