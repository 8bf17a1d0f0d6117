//! The mask-authoring surface.
//!
//! Owns everything one editing session needs: the view transform, the two
//! stroke buffers, the brush, the interaction mode and the in-flight
//! gesture. Pointer events go in, finished masks come out through the
//! callback handed to [`MaskSurface::new`]:
//!
//! ```text
//! pointer → layer origin → Viewport (screen → buffer) → StrokeBuffers (both) → on release → finalize → callback
//! ```
//!
//! The layer takes the picture's aspect ratio and is centred in the
//! container, so masks always cover exactly the picture. Pointer positions
//! come in container coordinates.
//!
//! All of it runs synchronously inside the event call; there is no
//! background work.

use log::{debug, info, warn};

use crate::brush::Brush;
use crate::compose::compose_view;
use crate::config::SurfaceConfig;
use crate::error::{Error, Result};
use crate::finalize;
use crate::gamma::GammaLut;
use crate::input::{InputEvent, PointerEvent, PointerPhase, PointerSource};
use crate::resize::{ResizeHub, ResizeSubscription};
use crate::source::{FittedImage, SourceImage};
use crate::stroke::{StrokeBuffers, StrokeStyle};
use crate::types::{FrameBuffer, MaskArtifact, Point, Size};
use crate::viewport::{Viewport, ZoomDirection};

/// Receives `Some(mask)` after a stroke, `None` when there is nothing selected.
pub type MaskCallback = Box<dyn FnMut(Option<MaskArtifact>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Draw,
    Pan,
}

/// What the current pointer gesture is doing. Each active variant remembers
/// the source that started it; other sources are ignored until it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// `last` is in buffer space.
    Drawing { source: PointerSource, last: Point },
    /// `anchor` is in screen space.
    Panning { source: PointerSource, anchor: Point },
}

impl Gesture {
    fn owner(&self) -> Option<PointerSource> {
        match *self {
            Gesture::Idle => None,
            Gesture::Drawing { source, .. } | Gesture::Panning { source, .. } => Some(source),
        }
    }
}

pub struct MaskSurface {
    config: SurfaceConfig,
    viewport: Viewport,
    brush: Brush,
    mode: InteractionMode,
    gesture: Gesture,
    buffers: StrokeBuffers,
    container: Size,
    /// Top-left of the picture-shaped layer inside the container.
    layer_origin: Point,
    source: Option<SourceImage>,
    fitted: Option<FittedImage>,
    on_mask: MaskCallback,
    resize_sub: Option<ResizeSubscription>,
    lut: GammaLut,
}

impl MaskSurface {
    pub fn new(config: SurfaceConfig, on_mask: MaskCallback) -> Result<Self> {
        config.validate()?;
        let style = StrokeStyle::Glow { core: config.core_color, glow: config.glow_color, blur: config.glow_blur };
        Ok(Self {
            viewport: Viewport::new(config.min_scale, config.max_scale),
            brush: Brush::new(
                config.default_brush_size,
                config.min_brush_size,
                config.max_brush_size,
                config.brush_step,
            ),
            mode: InteractionMode::Draw,
            gesture: Gesture::Idle,
            buffers: StrokeBuffers::new(style),
            container: Size::default(),
            layer_origin: Point::ORIGIN,
            source: None,
            fitted: None,
            on_mask,
            resize_sub: None,
            lut: GammaLut::new(),
            config,
        })
    }

    pub fn with_defaults(on_mask: MaskCallback) -> Result<Self> {
        Self::new(SurfaceConfig::default(), on_mask)
    }

    /* ---------------- accessors ---------------- */

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn buffers(&self) -> &StrokeBuffers {
        &self.buffers
    }

    /// Largest picture-shaped rectangle inside `container`; 0x0 without a picture.
    pub fn layer_size(&self, container: Size) -> Size {
        self.source.as_ref().map_or(Size::default(), |s| s.layer_size(container))
    }

    /// Where the layer sits in the container, and how big it is.
    pub fn layer_rect(&self) -> (Point, Size) {
        (self.layer_origin, self.buffers.size())
    }

    /* ---------------- setup ---------------- */

    /// New picture: view goes back to identity, buffers are rebuilt empty.
    pub fn load_image(&mut self, source: SourceImage) {
        let natural = source.natural_size();
        info!("surface: new image {}x{}", natural.width, natural.height);
        self.source = Some(source);
        self.viewport.reset();
        self.gesture = Gesture::Idle;
        self.setup_buffers();
    }

    /// Container changed size. Buffers are rebuilt and thereby cleared; a
    /// stroke in progress is dropped, not remapped.
    pub fn resize(&mut self, size: Size) {
        self.container = size;
        if self.gesture != Gesture::Idle {
            debug!("surface: resize during {:?}, gesture dropped", self.gesture);
            self.gesture = Gesture::Idle;
        }
        self.setup_buffers();
    }

    fn setup_buffers(&mut self) {
        // Without a picture there is nothing to measure against.
        let layer = self.layer_size(self.container);
        self.layer_origin = Point::new(
            (self.container.width.saturating_sub(layer.width) / 2) as f32,
            (self.container.height.saturating_sub(layer.height) / 2) as f32,
        );
        self.buffers.resize(layer);
        self.fitted = self.source.as_ref().and_then(|s| s.fit(layer));
        debug!("surface: layer {}x{} at {:?}", layer.width, layer.height, self.layer_origin);
    }

    /// Container position to the untransformed layer's own coordinates.
    fn to_layer(&self, p: Point) -> Point {
        Point::new(p.x - self.layer_origin.x, p.y - self.layer_origin.y)
    }

    /// Start following container sizes published on `hub`.
    pub fn mount(&mut self, hub: &ResizeHub) {
        self.resize_sub = Some(hub.subscribe());
        if let Some(size) = hub.current() {
            self.resize(size);
        }
    }

    /// Stop following resizes. Also happens when the surface is dropped.
    pub fn unmount(&mut self) {
        self.resize_sub = None;
    }

    /// Apply a pending container size, if one was published since last call.
    pub fn sync_container(&mut self) {
        if let Some(size) = self.resize_sub.as_ref().and_then(ResizeSubscription::take) {
            self.resize(size);
        }
    }

    /* ---------------- input ---------------- */

    pub fn handle(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Pointer(ev) => match ev.phase {
                PointerPhase::Down => {
                    self.pointer_down(ev);
                    Ok(())
                }
                PointerPhase::Move => {
                    self.pointer_move(ev);
                    Ok(())
                }
                PointerPhase::Up | PointerPhase::Leave => self.pointer_up(ev),
            },
            InputEvent::Wheel { delta_y, position } => {
                self.wheel(delta_y, position);
                Ok(())
            }
        }
    }

    pub fn pointer_down(&mut self, ev: PointerEvent) {
        if self.gesture != Gesture::Idle {
            return; // another pointer already owns the gesture
        }
        self.gesture = match self.mode {
            InteractionMode::Draw => {
                let last = self.viewport.screen_to_buffer(self.to_layer(ev.position));
                debug!("surface: stroke starts at {:?}", last);
                Gesture::Drawing { source: ev.source, last }
            }
            InteractionMode::Pan => Gesture::Panning { source: ev.source, anchor: ev.position },
        };
    }

    pub fn pointer_move(&mut self, ev: PointerEvent) {
        if self.gesture.owner() != Some(ev.source) {
            return;
        }
        match self.gesture {
            Gesture::Drawing { source, last } => {
                let current = self.viewport.screen_to_buffer(self.to_layer(ev.position));
                // Radius is read per segment: a size change mid-stroke shows from here on.
                self.buffers.draw_segment(last, current, self.brush.radius());
                self.gesture = Gesture::Drawing { source, last: current };
            }
            Gesture::Panning { source, anchor } => {
                self.viewport.pan_by(ev.position.x - anchor.x, ev.position.y - anchor.y);
                self.gesture = Gesture::Panning { source, anchor: ev.position };
            }
            Gesture::Idle => {}
        }
    }

    /// Ends the gesture. A finished stroke is finalized and reported.
    pub fn pointer_up(&mut self, ev: PointerEvent) -> Result<()> {
        if self.gesture.owner() != Some(ev.source) {
            return Ok(());
        }
        let was_drawing = matches!(self.gesture, Gesture::Drawing { .. });
        self.gesture = Gesture::Idle;
        if was_drawing {
            self.finish_stroke()?;
        }
        Ok(())
    }

    pub fn wheel(&mut self, delta_y: f32, position: Point) {
        let anchor = self.to_layer(position);
        self.viewport.zoom_at_point(-delta_y * self.config.zoom_sensitivity, anchor);
    }

    /* ---------------- view controls ---------------- */

    pub fn zoom_in(&mut self) {
        if self.viewport.can_zoom_in() {
            self.viewport.zoom_step(ZoomDirection::In, self.config.zoom_step, self.buffers.size());
        }
    }

    pub fn zoom_out(&mut self) {
        if self.viewport.can_zoom_out() {
            self.viewport.zoom_step(ZoomDirection::Out, self.config.zoom_step, self.buffers.size());
        }
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Only allowed between gestures.
    pub fn set_mode(&mut self, mode: InteractionMode) -> Result<()> {
        if self.gesture != Gesture::Idle {
            warn!("surface: mode switch to {:?} refused mid-gesture", mode);
            return Err(Error::GestureActive);
        }
        self.mode = mode;
        Ok(())
    }

    /* ---------------- brush ---------------- */

    pub fn set_brush_size(&mut self, requested: i64) -> u32 {
        self.brush.set_size(requested)
    }

    pub fn grow_brush(&mut self) -> u32 {
        self.brush.grow()
    }

    pub fn shrink_brush(&mut self) -> u32 {
        self.brush.shrink()
    }

    /* ---------------- mask ---------------- */

    /// Wipe both buffers and report "no mask".
    pub fn clear(&mut self) {
        self.buffers.clear();
        self.emit(None);
    }

    fn finish_stroke(&mut self) -> Result<()> {
        if self.buffers.size().is_degenerate() {
            debug!("surface: buffers not measured yet, finalization skipped");
            return Ok(());
        }
        let artifact = finalize::finalize(self.buffers.mask())?;
        self.emit(artifact);
        Ok(())
    }

    fn emit(&mut self, artifact: Option<MaskArtifact>) {
        match &artifact {
            Some(a) => info!("surface: mask ready {}x{} ({} bytes)", a.width, a.height, a.png.len()),
            None => info!("surface: no mask"),
        }
        (self.on_mask)(artifact);
    }

    /* ---------------- display ---------------- */

    /// Draw the current view into a window-sized frame.
    /// Visual: picture with the glowing strokes on top, panned and zoomed.
    pub fn render(&self, frame: &mut FrameBuffer) {
        compose_view(
            frame,
            self.layer_origin,
            &self.viewport,
            self.fitted.as_ref(),
            self.buffers.visible(),
            self.config.background,
            &self.lut,
        );
    }
}
