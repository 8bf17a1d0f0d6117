// Gamma-correct blending of the visible stroke layer over the picture.
// Table lookups instead of powf per pixel: the whole window is recomposed every frame.

use image::Rgba;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Straight-alpha `over` on top of an opaque 0x00RRGGBB pixel, in linear light.
    #[inline]
    pub fn blend_over(&self, base: u32, over: Rgba<u8>) -> u32 {
        let a = over[3];
        if a == 0 {
            return base;
        }
        if a == 255 {
            return ((over[0] as u32) << 16) | ((over[1] as u32) << 8) | over[2] as u32;
        }
        let a = a as f32 / 255.0;
        let inv = 1.0 - a;
        let mut out = 0u32;
        for (i, shift) in [16u32, 8, 0].into_iter().enumerate() {
            let b = ((base >> shift) & 0xFF) as u8;
            let lin = a * self.srgb_u8_to_linear(over[i]) + inv * self.srgb_u8_to_linear(b);
            out |= (self.linear_to_srgb_u8(lin) as u32) << shift;
        }
        out
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
