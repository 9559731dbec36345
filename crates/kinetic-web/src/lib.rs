#![cfg(target_arch = "wasm32")]
use instant::Instant;
use kinetic_core::{Scene, SessionConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod bridge;
mod dom;
mod events;
mod frame;
mod input;
mod render;

pub use bridge::*;

const CANVAS_ID: &str = "app-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kinetic-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;

    dom::sync_canvas_backing_size(&canvas);
    events::wire_resize(canvas.clone());

    let config = SessionConfig::from_lookup(dom::query_lookup()).unwrap_or_else(|e| {
        log::error!("[config] {e}; using defaults");
        SessionConfig::default()
    });

    let scene = Rc::new(RefCell::new(Scene::new(
        &config,
        bridge::mailbox(),
        canvas.width(),
        canvas.height(),
        &mut rand::thread_rng(),
    )));
    bridge::install_scene(scene.clone());
    events::wire_global_keydown(scene.clone());
    events::wire_orbit_controls(&canvas, scene.clone());

    let capacity = scene.borrow().system().len();
    let gpu = frame::init_gpu(&canvas, capacity).await;
    if gpu.is_none() {
        anyhow::bail!("WebGPU unavailable");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        canvas,
        document,
        gpu,
        started: Instant::now(),
        last_status: String::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
