// Window + software HUD for the desktop shell.
// • A resizable window that shows the composed view.
// • Mouse button / position / wheel turned into device-neutral `InputEvent`s.
// • Crosshair + brush outline at the cursor, and a tiny 5x7 bitmap font for the HUD.

use mask_painter::{Error, FrameBuffer, InputEvent, Point, PointerEvent, PointerPhase, Result};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// minifb reports wheel notches; DOM-style deltas are ~100 per notch.
const WHEEL_NOTCH: f32 = 100.0;

/// Turns per-frame mouse snapshots into pointer events.
/// minifb only reports state, so edges and motion are found by diffing.
/// Visual: a fast flick that is released mid-frame still paints to the end.
#[derive(Debug, Default)]
pub struct MouseTracker {
    was_down: bool,
    last_pos: Option<(f32, f32)>,
}

impl MouseTracker {
    /// `pos` is `None` while the cursor is outside the window.
    pub fn update(&mut self, pos: Option<(f32, f32)>, down: bool, wheel_dy: Option<f32>) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match pos {
            None => {
                if let Some((x, y)) = self.last_pos.take() {
                    events.push(PointerEvent::mouse(PointerPhase::Leave, x, y).into());
                }
            }
            Some((x, y)) => {
                let moved = self.last_pos != Some((x, y));
                if down && !self.was_down {
                    events.push(PointerEvent::mouse(PointerPhase::Down, x, y).into());
                } else if !down && self.was_down {
                    // Moved and released within one frame: finish the segment first.
                    if moved {
                        events.push(PointerEvent::mouse(PointerPhase::Move, x, y).into());
                    }
                    events.push(PointerEvent::mouse(PointerPhase::Up, x, y).into());
                } else if moved {
                    events.push(PointerEvent::mouse(PointerPhase::Move, x, y).into());
                }
                if let Some(dy) = wheel_dy.filter(|dy| *dy != 0.0) {
                    events.push(InputEvent::Wheel { delta_y: -dy * WHEEL_NOTCH, position: Point::new(x, y) });
                }
                self.last_pos = Some((x, y));
            }
        }
        self.was_down = down;
        events
    }
}

pub struct Drawer {
    window: Window,
    mouse: MouseTracker,
}

impl Drawer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window =
            Window::new(title, width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, mouse: MouseTracker::default() })
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<()> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Pump window events without presenting a frame.
    /// Visual: the window stays responsive while minimized.
    pub fn idle(&mut self) {
        self.window.update();
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client area in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    pub fn key_pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Mouse position in window pixels, `None` while outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    /// This frame's pointer and wheel events.
    pub fn poll_input(&mut self) -> Vec<InputEvent> {
        let pos = self.mouse_pos();
        let down = self.window.get_mouse_down(MouseButton::Left);
        let wheel = self.window.get_scroll_wheel().map(|(_, dy)| dy);
        self.mouse.update(pos, down, wheel)
    }
}

/* ---------- Software drawing: pixels, crosshair, brush ring, tiny bitmap font ---------- */

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Bresenham.
/// Visual: 1-pixel hard line, no anti-aliasing.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Small "+" with a gap in the middle.
/// Visual: the exact pixel under the cursor stays visible.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/// Midpoint circle outline.
/// Visual: shows the on-screen brush footprint; grows as you zoom in.
pub fn draw_ring(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius <= 0 {
        return;
    }
    let (mut x, mut y, mut err) = (radius, 0, 1 - radius);
    while x >= y {
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + px, cy + py, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/* ---------- 5x7 bitmap font (just what the HUD prints) ---------- */

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00001,0b00001,0b00010,0b00100,0b01000,0b10000,0b10000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// One glyph with a 1-pixel black shadow for contrast.
/// Visual: text stays readable over both white strokes and dark pictures.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (shadow, c) in [(1, 0x00000000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + shadow, y + ry as i32 + shadow, c);
                }
            }
        }
    }
}

pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch.to_ascii_uppercase(), color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_strings_only_use_known_glyphs() {
        for s in ["DRAW | BRUSH 50 | ZOOM 1000%", "PAN", "D/P MODE  +/- BRUSH  Z/X ZOOM  R RESET  C CLEAR  ESC QUIT"] {
            for ch in s.chars() {
                assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
            }
        }
    }

    fn phases(events: &[InputEvent]) -> Vec<PointerPhase> {
        events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Pointer(p) => Some(p.phase),
                InputEvent::Wheel { .. } => None,
            })
            .collect()
    }

    #[test]
    fn press_drag_release_in_separate_frames() {
        let mut m = MouseTracker::default();
        assert_eq!(phases(&m.update(Some((10.0, 10.0)), false, None)), [PointerPhase::Move]);
        assert_eq!(phases(&m.update(Some((10.0, 10.0)), true, None)), [PointerPhase::Down]);
        assert_eq!(phases(&m.update(Some((30.0, 10.0)), true, None)), [PointerPhase::Move]);
        assert!(m.update(Some((30.0, 10.0)), true, None).is_empty());
        assert_eq!(phases(&m.update(Some((30.0, 10.0)), false, None)), [PointerPhase::Up]);
    }

    #[test]
    fn release_after_motion_in_one_frame_moves_first() {
        let mut m = MouseTracker::default();
        m.update(Some((10.0, 10.0)), true, None);
        let events = m.update(Some((50.0, 20.0)), false, None);
        assert_eq!(phases(&events), [PointerPhase::Move, PointerPhase::Up]);
        let InputEvent::Pointer(mv) = events[0] else { panic!("expected a pointer event") };
        assert_eq!(mv.position, Point::new(50.0, 20.0));
    }

    #[test]
    fn leaving_the_window_reports_last_position() {
        let mut m = MouseTracker::default();
        m.update(Some((5.0, 6.0)), true, None);
        let events = m.update(None, true, None);
        assert_eq!(phases(&events), [PointerPhase::Leave]);
        assert!(m.update(None, false, None).is_empty());
    }

    #[test]
    fn wheel_notches_become_dom_deltas() {
        let mut m = MouseTracker::default();
        let events = m.update(Some((1.0, 2.0)), false, Some(1.0));
        assert!(events.contains(&InputEvent::Wheel { delta_y: -100.0, position: Point::new(1.0, 2.0) }));
        assert!(!m.update(Some((1.0, 2.0)), false, Some(0.0)).iter().any(|e| matches!(e, InputEvent::Wheel { .. })));
    }

    #[test]
    fn drawing_is_clipped_to_the_frame() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_crosshair(&mut fb, 0, 0, 12, 0xFF);
        draw_ring(&mut fb, 5, 5, 40, 0xFF);
        assert_eq!(fb.pixels[0], 0xFF);
    }
}
