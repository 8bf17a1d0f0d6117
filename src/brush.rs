// Brush size in *buffer* pixels. Zooming changes how wide the stroke looks,
// never how wide it is in the mask.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    size: u32,
    min: u32,
    max: u32,
    step: u32,
}

impl Brush {
    /// `min <= max` must hold; `SurfaceConfig::validate` checks it.
    pub(crate) fn new(size: u32, min: u32, max: u32, step: u32) -> Self {
        Self { size: size.clamp(min, max), min, max, step }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Half the line width, which is what the rasterizer works with.
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }

    /// Out-of-range requests are clamped, never rejected.
    pub fn set_size(&mut self, requested: i64) -> u32 {
        self.size = requested.clamp(self.min as i64, self.max as i64) as u32;
        self.size
    }

    pub fn grow(&mut self) -> u32 {
        self.set_size(self.size as i64 + self.step as i64)
    }

    pub fn shrink(&mut self) -> u32 {
        self.set_size(self.size as i64 - self.step as i64)
    }

    pub fn can_grow(&self) -> bool {
        self.size < self.max
    }

    pub fn can_shrink(&self) -> bool {
        self.size > self.min
    }
}

impl Default for Brush {
    fn default() -> Self {
        use crate::config::{BRUSH_STEP, DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
        Self::new(DEFAULT_BRUSH_SIZE, MIN_BRUSH_SIZE, MAX_BRUSH_SIZE, BRUSH_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
    use proptest::prelude::*;

    #[test]
    fn default_size() {
        assert_eq!(Brush::default().size(), DEFAULT_BRUSH_SIZE);
    }

    #[test]
    fn requests_are_clamped() {
        let mut b = Brush::default();
        assert_eq!(b.set_size(MAX_BRUSH_SIZE as i64 + 5), MAX_BRUSH_SIZE);
        assert_eq!(b.set_size(MIN_BRUSH_SIZE as i64 - 5), MIN_BRUSH_SIZE);
    }

    #[test]
    fn steps_stop_at_bounds() {
        let mut b = Brush::default();
        assert_eq!(b.shrink(), MIN_BRUSH_SIZE);
        assert!(!b.can_shrink());
        for _ in 0..20 {
            b.grow();
        }
        assert_eq!(b.size(), MAX_BRUSH_SIZE);
        assert!(!b.can_grow());
        assert_eq!(b.shrink(), MAX_BRUSH_SIZE - 5);
    }

    proptest! {
        #[test]
        fn size_always_in_range(req in -1000i64..1000) {
            let mut b = Brush::default();
            let got = b.set_size(req);
            prop_assert!((MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&got));
        }
    }
}
