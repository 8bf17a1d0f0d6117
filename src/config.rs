//! Tunables for the mask surface.
//!
//! Everything that the interaction policy depends on lives in
//! [`SurfaceConfig`] so tests can shrink or stretch the limits.

use image::Rgba;

use crate::error::{Error, Result};

pub const MIN_SCALE: f32 = 0.2;
pub const MAX_SCALE: f32 = 10.0;
/// Wheel delta units to scale delta.
pub const ZOOM_SENSITIVITY: f32 = 0.001;
/// Zoom buttons multiply or divide the scale by this.
pub const ZOOM_STEP: f32 = 1.2;

pub const MIN_BRUSH_SIZE: u32 = 2;
pub const MAX_BRUSH_SIZE: u32 = 50;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;
/// Brush +/- buttons change the size by this.
pub const BRUSH_STEP: u32 = 5;

pub const BRUSH_CORE_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// DeepSkyBlue
pub const BRUSH_GLOW_COLOR: Rgba<u8> = Rgba([0, 191, 255, 255]);
pub const BRUSH_GLOW_BLUR: f32 = 15.0;

#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_sensitivity: f32,
    pub zoom_step: f32,
    pub min_brush_size: u32,
    pub max_brush_size: u32,
    pub default_brush_size: u32,
    pub brush_step: u32,
    /// Visible stroke core.
    pub core_color: Rgba<u8>,
    /// Visible stroke halo. Never reaches the mask buffer.
    pub glow_color: Rgba<u8>,
    pub glow_blur: f32,
    /// 0x00RRGGBB painted wherever neither image nor layer covers the screen.
    pub background: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_sensitivity: ZOOM_SENSITIVITY,
            zoom_step: ZOOM_STEP,
            min_brush_size: MIN_BRUSH_SIZE,
            max_brush_size: MAX_BRUSH_SIZE,
            default_brush_size: DEFAULT_BRUSH_SIZE,
            brush_step: BRUSH_STEP,
            core_color: BRUSH_CORE_COLOR,
            glow_color: BRUSH_GLOW_COLOR,
            glow_blur: BRUSH_GLOW_BLUR,
            background: 0x00_11_18_27,
        }
    }
}

impl SurfaceConfig {
    pub fn validate(&self) -> Result<()> {
        // NaN fails every comparison, so each check names it explicitly.
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            return Err(Error::Config(format!("min_scale must be positive, got {}", self.min_scale)));
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            return Err(Error::Config(format!(
                "scale range [{}, {}] is empty",
                self.min_scale, self.max_scale
            )));
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 1.0 {
            return Err(Error::Config(format!("zoom_step must exceed 1, got {}", self.zoom_step)));
        }
        if self.min_brush_size == 0 || self.min_brush_size > self.max_brush_size {
            return Err(Error::Config(format!(
                "brush range [{}, {}] is invalid",
                self.min_brush_size, self.max_brush_size
            )));
        }
        if !(self.min_brush_size..=self.max_brush_size).contains(&self.default_brush_size) {
            return Err(Error::Config(format!(
                "default brush {} outside [{}, {}]",
                self.default_brush_size, self.min_brush_size, self.max_brush_size
            )));
        }
        if self.glow_blur.is_nan() || self.glow_blur < 0.0 {
            return Err(Error::Config(format!("glow_blur must not be negative, got {}", self.glow_blur)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SurfaceConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_inverted_scale_range() {
        let cfg = SurfaceConfig { min_scale: 5.0, max_scale: 1.0, ..SurfaceConfig::default() };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_nan_limits() {
        for cfg in [
            SurfaceConfig { min_scale: f32::NAN, ..SurfaceConfig::default() },
            SurfaceConfig { max_scale: f32::NAN, ..SurfaceConfig::default() },
            SurfaceConfig { zoom_step: f32::NAN, ..SurfaceConfig::default() },
            SurfaceConfig { glow_blur: f32::NAN, ..SurfaceConfig::default() },
        ] {
            assert!(matches!(cfg.validate(), Err(Error::Config(_))), "{cfg:?}");
        }
    }

    #[test]
    fn rejects_zoom_step_that_does_not_zoom() {
        let cfg = SurfaceConfig { zoom_step: 1.0, ..SurfaceConfig::default() };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn surface_refuses_config_that_would_break_clamping() {
        let cfg = SurfaceConfig { min_brush_size: 40, max_brush_size: 10, default_brush_size: 20, ..SurfaceConfig::default() };
        assert!(matches!(crate::MaskSurface::new(cfg, Box::new(|_| {})), Err(Error::Config(_))));
        let cfg = SurfaceConfig { min_scale: f32::NAN, ..SurfaceConfig::default() };
        assert!(matches!(crate::MaskSurface::new(cfg, Box::new(|_| {})), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_default_brush_out_of_range() {
        let cfg = SurfaceConfig { default_brush_size: 80, ..SurfaceConfig::default() };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_zero_brush() {
        let cfg = SurfaceConfig { min_brush_size: 0, ..SurfaceConfig::default() };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }
}
