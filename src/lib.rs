//! Freehand mask painting over a pannable, zoomable picture.
//!
//! [`MaskSurface`] is the whole component: feed it pointer events, get a
//! black/white PNG mask (white = selected) or `None` back through its
//! callback. The window shell in `main.rs` is just one possible host.

pub mod brush;
pub mod compose;
pub mod composite;
pub mod config;
pub mod error;
pub mod finalize;
pub mod gamma;
pub mod input;
pub mod resize;
pub mod source;
pub mod stroke;
pub mod surface;
pub mod types;
pub mod viewport;

pub use config::SurfaceConfig;
pub use error::{Error, Result};
pub use input::{InputEvent, PointerEvent, PointerPhase, PointerSource};
pub use resize::{ResizeHub, ResizeSubscription};
pub use source::SourceImage;
pub use surface::{Gesture, InteractionMode, MaskCallback, MaskSurface};
pub use types::{FrameBuffer, MaskArtifact, Point, Size};
pub use viewport::{Viewport, ZoomDirection};
