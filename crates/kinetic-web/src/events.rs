use crate::dom;
use crate::input::{self, DragState};
use kinetic_core::{command_for_key, Command, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, scene: &Rc<RefCell<Scene>>) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let Some(command) = command_for_key(&key) else {
        return;
    };
    // Tab would otherwise move focus off the canvas
    if command == Command::NextShape {
        ev.prevent_default();
    }
    scene
        .borrow_mut()
        .apply(command, &mut rand::thread_rng());
}

pub fn wire_global_keydown(scene: Rc<RefCell<Scene>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &scene);
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_resize(canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas);
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Drag to orbit, wheel to zoom.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, scene: Rc<RefCell<Scene>>) {
    let drag = Rc::new(RefCell::new(DragState::default()));

    // pointerdown
    {
        let drag_m = drag.clone();
        let canvas_m = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (x, y) = input::pointer_client_px(&ev);
            drag_m.borrow_mut().begin(x, y);
            let _ = canvas_m.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let drag_m = drag.clone();
        let scene_m = scene.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let (x, y) = input::pointer_client_px(&ev);
            if let Some((dx, dy)) = drag_m.borrow_mut().moved(x, y) {
                scene_m.borrow_mut().camera_mut().orbit(dx, dy);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointerup / pointercancel
    for name in ["pointerup", "pointercancel"] {
        let drag_m = drag.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            drag_m.borrow_mut().end();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // wheel
    {
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            scene
                .borrow_mut()
                .camera_mut()
                .zoom(input::wheel_notches(&ev));
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
