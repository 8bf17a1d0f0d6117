// Turns the raw mask buffer into the black/white artifact.
// Stroked → white, untouched → black, anti-aliased edges → grey.
// Reads only the mask buffer, never the styled one.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::composite::{self, CompOp};
use crate::error::Result;
use crate::types::MaskArtifact;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// True when every channel of every pixel is zero (nothing was ever drawn).
pub fn is_blank(mask: &RgbaImage) -> bool {
    mask.as_raw().iter().all(|&c| c == 0)
}

/// Fill black, punch the stroke out, put white underneath.
/// `None` for a blank or zero-sized buffer.
pub fn build_mask(mask: &RgbaImage) -> Option<RgbaImage> {
    let (w, h) = mask.dimensions();
    if w == 0 || h == 0 || is_blank(mask) {
        return None;
    }
    let mut out = RgbaImage::from_pixel(w, h, BLACK);
    composite::composite_image(&mut out, mask, CompOp::DestinationOut);
    composite::fill(&mut out, WHITE, CompOp::DestinationOver);
    Some(out)
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Full pass: emptiness scan, composite, PNG encode.
pub fn finalize(mask: &RgbaImage) -> Result<Option<MaskArtifact>> {
    let Some(img) = build_mask(mask) else {
        return Ok(None);
    };
    let png = encode_png(&img)?;
    Ok(Some(MaskArtifact { width: img.width(), height: img.height(), png }))
}
