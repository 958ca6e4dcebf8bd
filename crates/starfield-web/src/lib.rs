//! Browser exports for the particle field.
//!
//! The page calls `field_mount` when the canvas mounts, `field_wheel` from its
//! wheel listener, `field_frame` from `requestAnimationFrame`, and
//! `field_unmount` after removing both listeners. Every export is a no-op
//! while nothing is mounted, so a late frame or wheel callback after teardown
//! never touches freed buffers.

pub mod runner;

pub use runner::FieldRunner;

use std::cell::RefCell;

use starfield::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<FieldRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut FieldRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Mount the field. `config_json` may be empty; invalid configs fall back to defaults.
#[wasm_bindgen]
pub fn field_mount(config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = match FieldRunner::from_json(config_json) {
        Ok(runner) => runner,
        Err(err) => {
            log::error!("starfield: {}; using default config", err);
            match FieldRunner::new(Default::default()) {
                Ok(runner) => runner,
                Err(err) => {
                    log::error!("starfield: default config rejected: {}", err);
                    return;
                }
            }
        }
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("starfield: mounted");
}

/// Drop the field and its buffers. Call after deregistering the frame and wheel callbacks.
#[wasm_bindgen]
pub fn field_unmount() {
    let was_mounted = RUNNER.with(|cell| cell.borrow_mut().take().is_some());
    if was_mounted {
        log::info!("starfield: unmounted");
    }
}

#[wasm_bindgen]
pub fn field_frame() {
    if with_runner(|r| r.frame()).is_none() {
        log::debug!("starfield: frame while unmounted");
    }
}

#[wasm_bindgen]
pub fn field_wheel(delta: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
}

#[wasm_bindgen]
pub fn field_model_loaded(dimension: f32) {
    with_runner(|r| r.push_input(InputEvent::ModelResized { dimension }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_positions_ptr() -> *const f32 {
    with_runner(|r| r.positions_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

/// Copy of the frame header, for hosts that do not read wasm memory directly.
#[wasm_bindgen]
pub fn get_header() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.header().as_floats()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

/// Copy of the active positions, for hosts that do not read wasm memory directly.
#[wasm_bindgen]
pub fn get_positions() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.positions()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_header_floats() -> u32 {
    starfield::HEADER_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_active_count() -> u32 {
    with_runner(|r| r.active_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_dirty() -> bool {
    with_runner(|r| r.dirty()).unwrap_or(false)
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_capacity() -> u32 {
    with_runner(|r| r.capacity()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_position_floats() -> u32 {
    with_runner(|r| r.position_floats()).unwrap_or(0)
}

// ---- Model collaborator accessors ----

#[wasm_bindgen]
pub fn get_scroll_progress() -> f32 {
    with_runner(|r| r.scroll_progress()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_rotation_speed() -> f32 {
    with_runner(|r| r.rotation_speed()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_model_yaw() -> f32 {
    with_runner(|r| r.model_yaw()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_particle_radius() -> f32 {
    with_runner(|r| r.particle_radius()).unwrap_or(0.0)
}
