// Builds the frame you SEE: picture + visible stroke layer, viewed through
// the current pan/zoom. Every screen pixel is mapped back into buffer space.
// Visual: the layer sits at `origin` inside the window; around it, and
// wherever pan/zoom uncovers the window, you see the background colour.

use image::RgbaImage;

use crate::gamma::GammaLut;
use crate::source::FittedImage;
use crate::types::{FrameBuffer, Point};
use crate::viewport::Viewport;

#[inline]
fn pack(px: image::Rgba<u8>) -> u32 {
    ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32
}

/// Map each screen column (or row) centre to a buffer index, `None` when outside.
fn axis_lookup(screen_len: usize, buffer_len: u32, offset: f32, scale: f32) -> Vec<Option<u32>> {
    (0..screen_len)
        .map(|s| {
            let b = ((s as f32 + 0.5) - offset) / scale;
            if b >= 0.0 && b < buffer_len as f32 { Some(b as u32) } else { None }
        })
        .collect()
}

/// `origin` is the layer's top-left corner in window pixels.
pub fn compose_view(
    frame: &mut FrameBuffer,
    origin: Point,
    viewport: &Viewport,
    picture: Option<&FittedImage>,
    visible: &RgbaImage,
    background: u32,
    lut: &GammaLut,
) {
    let Point { x: ox, y: oy } = viewport.offset();
    let cols = axis_lookup(frame.width, visible.width(), origin.x + ox, viewport.scale());
    let rows = axis_lookup(frame.height, visible.height(), origin.y + oy, viewport.scale());

    for (sy, by) in rows.iter().enumerate() {
        let line = &mut frame.pixels[sy * frame.width..(sy + 1) * frame.width];
        let Some(by) = *by else {
            line.fill(background);
            continue;
        };
        for (out, bx) in line.iter_mut().zip(&cols) {
            *out = match *bx {
                None => background,
                Some(bx) => {
                    let base = picture.and_then(|p| p.sample(bx, by)).map(pack).unwrap_or(background);
                    lut.blend_over(base, *visible.get_pixel(bx, by))
                }
            };
        }
    }
}
