// What you SEE:
// • Your picture, fitted into the window (centred; bands of background
//   where the window's shape differs from the picture's).
// • Hold Left Mouse (draw mode): paint a glowing stroke; on release the
//   black/white mask is written to --out (white = what you painted).
// • D / P switch between draw and pan mode. Wheel zooms at the cursor,
//   Z / X zoom at the centre, R resets the view.
// • + / - change the brush. C clears the mask. ESC quits.

mod draw;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Parser;
use draw::{draw_crosshair, draw_ring, draw_text_5x7, Drawer};
use log::{error, info};
use mask_painter::{
    Error, FrameBuffer, InteractionMode, MaskArtifact, MaskSurface, ResizeHub, Result, Size, SourceImage,
    SurfaceConfig,
};
use minifb::Key;

#[derive(Parser, Debug)]
#[command(name = "mask-painter", about = "Paint a selection mask over an image")]
struct Args {
    /// Picture to paint over.
    image: PathBuf,
    /// Where each finished mask is written (PNG).
    #[arg(short, long, default_value = "mask.png")]
    out: PathBuf,
    /// Initial window width.
    #[arg(long, default_value_t = 800)]
    width: usize,
    /// Initial window height.
    #[arg(long, default_value_t = 600)]
    height: usize,
    /// Starting brush size in mask pixels.
    #[arg(long)]
    brush: Option<u32>,
}

/// The consumer side of the surface: persist or remove the mask file.
fn store_mask(out: &Path, mask: Option<MaskArtifact>) -> Result<()> {
    match mask {
        Some(mask) => {
            fs::write(out, &mask.png)?;
            info!("wrote {} ({}x{})", out.display(), mask.width, mask.height);
        }
        None => match fs::remove_file(out) {
            Ok(()) => info!("removed {}", out.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::Io(e)),
        },
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = SurfaceConfig::default();
    if let Some(b) = args.brush {
        config.default_brush_size = b.clamp(config.min_brush_size, config.max_brush_size);
    }
    let background = config.background;

    /* --- Window + picture ---
       Visual: window opens; nothing is drawn until the first frame. */
    let source = SourceImage::open(&args.image)?;
    let mut drawer = Drawer::new("Mask Painter", args.width, args.height)?;

    /* --- Surface; masks land in a mailbox and are written after each event ---
       Visual: none; the file on disk changes when you release a stroke. */
    let mailbox: Rc<RefCell<Vec<Option<MaskArtifact>>>> = Rc::default();
    let sink = Rc::clone(&mailbox);
    let mut surface = MaskSurface::new(config, Box::new(move |mask| sink.borrow_mut().push(mask)))?;

    /* --- Window size feed ---
       Visual: the picture snaps to the window's new shape on resize. */
    let hub = ResizeHub::new();
    let (w, h) = drawer.size();
    hub.publish(Size::new(w as u32, h as u32));
    surface.mount(&hub);
    surface.load_image(source);

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(w, h);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Window size → surface
              Visual: resizing wipes the painted strokes (the mask file stays). */
        let (w, h) = drawer.size();
        hub.publish(Size::new(w as u32, h as u32));
        surface.sync_container();
        if w == 0 || h == 0 {
            drawer.idle(); // minimized: keep pumping events, nothing to draw
            continue;
        }
        screen.ensure_size(w, h);

        /* 2) Keys. Mode keys are ignored while a gesture is running.
              Visual: HUD mode / brush / zoom numbers change immediately. */
        if !surface.is_gesture_active() {
            if drawer.key_pressed_once(Key::D) {
                surface.set_mode(InteractionMode::Draw)?;
            }
            if drawer.key_pressed_once(Key::P) {
                surface.set_mode(InteractionMode::Pan)?;
            }
        }
        if drawer.key_pressed_once(Key::Equal) || drawer.key_pressed_once(Key::NumPadPlus) {
            surface.grow_brush();
        }
        if drawer.key_pressed_once(Key::Minus) || drawer.key_pressed_once(Key::NumPadMinus) {
            surface.shrink_brush();
        }
        if drawer.key_pressed_once(Key::Z) {
            surface.zoom_in();
        }
        if drawer.key_pressed_once(Key::X) {
            surface.zoom_out();
        }
        if drawer.key_pressed_once(Key::R) {
            surface.reset_view();
        }
        if drawer.key_pressed_once(Key::C) {
            surface.clear();
        }

        /* 3) Pointer + wheel
              Visual: glowing stroke under the cursor, or the picture follows the drag. */
        for event in drawer.poll_input() {
            surface.handle(event)?;
        }

        /* 4) Hand finished masks to the "caller"
              Visual: none on screen; --out is rewritten or removed. */
        for mask in mailbox.borrow_mut().drain(..) {
            if let Err(e) = store_mask(&args.out, mask) {
                error!("could not store mask: {e}");
            }
        }

        /* 5) Picture + strokes through the view transform, then HUD on top
              Visual: ring = real brush footprint at the current zoom. */
        surface.render(&mut screen);

        if let Some((mx, my)) = drawer.mouse_pos() {
            let (mx, my) = (mx as i32, my as i32);
            match surface.mode() {
                InteractionMode::Draw => {
                    let r = surface.brush().radius() * surface.viewport().scale(); // brush is in mask pixels
                    draw_ring(&mut screen, mx, my, r.round() as i32, 0x00_00_BF_FF);
                    draw_crosshair(&mut screen, mx, my, 6, 0x00_FF_FF_FF);
                }
                InteractionMode::Pan => draw_crosshair(&mut screen, mx, my, 12, 0x00_FF_CC_33),
            }
        }

        let mode = match surface.mode() {
            InteractionMode::Draw => "DRAW",
            InteractionMode::Pan => "PAN",
        };
        let hud = format!(
            "{mode} | BRUSH {} | ZOOM {}%",
            surface.brush().size(),
            (surface.viewport().scale() * 100.0).round() as u32
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);
        draw_text_5x7(
            &mut screen,
            8,
            h as i32 - 16,
            "D/P MODE  +/- BRUSH  Z/X ZOOM  R RESET  C CLEAR  ESC QUIT",
            background ^ 0x00_FF_FF_FF,
        );

        drawer.present(&screen)?;
    }

    surface.unmount();
    Ok(())
}
