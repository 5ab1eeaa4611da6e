use crate::input::{self, DragState, DragTarget};
use crate::orbit::{ControlMode, OrbitCamera};
use globe_core::Globe;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub globe: Rc<RefCell<Globe>>,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    pub drag: Rc<RefCell<DragState>>,
    pub mode: ControlMode,
}

impl InputWiring {
    fn background_target(&self) -> DragTarget {
        match self.mode {
            ControlMode::Orbit => DragTarget::Camera,
            ControlMode::DragRotate => DragTarget::Sphere,
        }
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let viewport = input::canvas_viewport(&w.canvas);
        let camera = w.orbit.borrow().camera(viewport.aspect());

        let armed = w.globe.borrow_mut().on_pointer_down(pos, viewport, &camera);
        let target = if armed {
            DragTarget::Pin
        } else {
            w.background_target()
        };
        if target == DragTarget::Camera {
            w.orbit.borrow_mut().begin_drag(pos);
        }
        w.drag.borrow_mut().begin(target, ev.pointer_id(), pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut drag = w.drag.borrow_mut();
        if drag.target.is_none() || drag.pointer_id != ev.pointer_id() {
            return;
        }
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let delta = drag.advance(pos);
        let current = drag.target;
        match current {
            Some(DragTarget::Pin) => {
                if w.globe.borrow_mut().on_pointer_move(pos) {
                    // The tap became a drag; hand it to the background owner.
                    let target = w.background_target();
                    log::debug!("[pick] tap cancelled, dragging {:?}", target);
                    if target == DragTarget::Camera {
                        w.orbit.borrow_mut().begin_drag(pos);
                    }
                    drag.target = Some(target);
                }
            }
            Some(DragTarget::Camera) => w.orbit.borrow_mut().drag_to(pos),
            Some(DragTarget::Sphere) => w.globe.borrow_mut().on_drag_delta(delta.x, delta.y),
            None => {}
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ended = {
            let mut drag = w.drag.borrow_mut();
            if drag.pointer_id != ev.pointer_id() {
                return;
            }
            drag.end()
        };
        match ended {
            Some(DragTarget::Pin) if ev.type_() == "pointercancel" => {
                w.globe.borrow_mut().on_pointer_cancel();
            }
            Some(DragTarget::Pin) => {
                // Fires the pin callback, which dispatches `pin-selected`.
                w.globe.borrow_mut().on_pointer_up();
            }
            Some(DragTarget::Camera) => w.orbit.borrow_mut().end_drag(),
            Some(DragTarget::Sphere) | None => {}
        }
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);

    for kind in ["pointerup", "pointercancel"] {
        _ = canvas_for_listener
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let page = w.canvas.height() as f32;
        let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), page);
        if let Some(distance) = w.orbit.borrow_mut().zoom(delta) {
            log::debug!("[zoom] camera distance {:.3}", distance);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
