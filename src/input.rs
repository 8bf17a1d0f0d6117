// Device-neutral input events. Mouse and touch arrive in the same shape;
// the surface only cares which source owns the current gesture.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch { id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the container; ends a gesture just like `Up`.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub source: PointerSource,
    /// Client coordinates relative to the untransformed container.
    pub position: Point,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, source: PointerSource::Mouse, position: Point::new(x, y) }
    }

    pub fn touch(phase: PointerPhase, id: u64, x: f32, y: f32) -> Self {
        Self { phase, source: PointerSource::Touch { id }, position: Point::new(x, y) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Positive `delta_y` scrolls down, which zooms out.
    Wheel { delta_y: f32, position: Point },
}

impl From<PointerEvent> for InputEvent {
    fn from(ev: PointerEvent) -> Self {
        InputEvent::Pointer(ev)
    }
}
