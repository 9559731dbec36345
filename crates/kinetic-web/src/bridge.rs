// ============================================================================
// JS BRIDGE
//
// The page runs the camera + hand classifier in JS and forwards each result
// here. Gestures go straight into the mailbox and are picked up by the next
// animation frame; shape and color are plain writes on the scene.
// ============================================================================

use kinetic_core::{ColorState, GestureMailbox, Scene, ShapeKind};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

thread_local! {
    static MAILBOX: Arc<GestureMailbox> = Arc::new(GestureMailbox::new());
    static SCENE: RefCell<Option<Rc<RefCell<Scene>>>> = const { RefCell::new(None) };
}

pub fn mailbox() -> Arc<GestureMailbox> {
    MAILBOX.with(Arc::clone)
}

pub fn install_scene(scene: Rc<RefCell<Scene>>) {
    SCENE.with(|s| *s.borrow_mut() = Some(scene));
}

fn with_scene<T>(f: impl FnOnce(&mut Scene) -> T) -> Option<T> {
    let scene = SCENE.with(|s| s.borrow().clone());
    match scene {
        Some(scene) => Some(f(&mut scene.borrow_mut())),
        None => {
            log::warn!("[bridge] scene not ready yet");
            None
        }
    }
}

/// Latest classifier verdict as a bare token (`OPEN`, `pinch`, ...).
/// Returns false for anything that is not a known state.
#[wasm_bindgen]
pub fn push_gesture(state: &str) -> bool {
    MAILBOX.with(|m| {
        let accepted = m.offer(state).and_then(|u| u.state).is_some();
        if accepted {
            m.set_tracking(true);
        }
        accepted
    })
}

/// An `updateGesture` function call as JSON. Returns the acknowledgement to
/// send back to the classifier session, or `undefined` if the message is not
/// a call. Calls with an unknown state are acknowledged but change nothing.
#[wasm_bindgen]
pub fn push_gesture_message(message: &str) -> Option<String> {
    MAILBOX.with(|m| {
        let update = m.offer(message)?;
        if update.state.is_some() {
            m.set_tracking(true);
        }
        update.acknowledgement().map(|ack| ack.to_json())
    })
}

#[wasm_bindgen]
pub fn set_connected(connected: bool) {
    log::info!(
        "[gesture] classifier {}",
        if connected { "connected" } else { "disconnected" }
    );
    MAILBOX.with(|m| {
        m.set_connected(connected);
        if !connected {
            m.set_tracking(false);
        }
    });
}

/// Accepts a shape id (`DNA`), label (`Hyper Galaxy`) or digit; unknown
/// values fall back to the sphere.
#[wasm_bindgen]
pub fn set_shape(id: &str) {
    let shape = ShapeKind::from_id(id);
    with_scene(|scene| scene.set_shape(shape, &mut rand::thread_rng()));
}

#[wasm_bindgen]
pub fn set_color(value: &str) -> Result<(), JsValue> {
    let color = value
        .parse::<ColorState>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_scene(|scene| scene.set_color(color));
    Ok(())
}

#[wasm_bindgen]
pub fn set_auto_color(enabled: bool) {
    with_scene(|scene| scene.set_auto_color(enabled));
}

/// Same text the native window title shows.
#[wasm_bindgen]
pub fn status_line() -> Option<String> {
    SCENE.with(|s| s.borrow().as_ref().map(|scene| scene.borrow().status_line()))
}
