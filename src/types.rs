// Core types shared by the viewport, the stroke buffers and the window.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A 2D point. Used for both screen space (relative to the container) and
/// buffer space (pixels of the stroke buffers); the function names say which.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Size of the on-screen container (and of the stroke buffers after setup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero in either direction means "not measurable yet".
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn center(self) -> Point {
        Point::new(self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Reallocate when the window changed size; contents are garbage afterwards.
    pub fn ensure_size(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }
}

/// Finished black/white mask, PNG encoded. White = selected.
/// Owned by whoever receives it; the surface keeps no copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskArtifact {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl MaskArtifact {
    /// `data:image/png;base64,...`, the form web-style consumers expect.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}
