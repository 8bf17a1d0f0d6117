// The picture the user paints over.
// The drawing layer takes the picture's shape: contain-fit into the container,
// so the mask covers the picture and nothing else.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use log::info;

use crate::error::{Error, Result};
use crate::types::Size;

pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?;
        info!("loaded {} ({}x{})", path.display(), img.width(), img.height());
        Ok(Self::from_image(img))
    }

    pub fn from_image(img: DynamicImage) -> Self {
        Self { pixels: img.into_rgba8() }
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    /// Largest rectangle with the picture's aspect ratio that fits `container`.
    /// 0x0 if either side is empty.
    pub fn layer_size(&self, container: Size) -> Size {
        let natural = self.natural_size();
        if container.is_degenerate() || natural.is_degenerate() {
            return Size::default();
        }
        let k = (container.width as f32 / natural.width as f32).min(container.height as f32 / natural.height as f32);
        let w = ((natural.width as f32 * k).round() as u32).clamp(1, container.width);
        let h = ((natural.height as f32 * k).round() as u32).clamp(1, container.height);
        Size::new(w, h)
    }

    /// Resample to exactly `layer` (which already has the picture's shape).
    pub fn fit(&self, layer: Size) -> Option<FittedImage> {
        if layer.is_degenerate() || self.natural_size().is_degenerate() {
            return None;
        }
        let pixels = imageops::resize(&self.pixels, layer.width, layer.height, FilterType::Triangle);
        Some(FittedImage { pixels })
    }
}

/// Source image resampled to the layer, one pixel per buffer pixel.
pub struct FittedImage {
    pixels: RgbaImage,
}

impl FittedImage {
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }
}
