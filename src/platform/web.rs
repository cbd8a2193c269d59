//! Browser helpers used by the wasm entry point

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::tuning::Tuning;

/// Screen containers; the visible one carries the `active` class
pub const START_SCREEN: &str = "start-screen";
pub const GAME_SCREEN: &str = "game-screen";
pub const GAME_OVER_SCREEN: &str = "game-over-screen";
const SCREENS: [&str; 3] = [START_SCREEN, GAME_SCREEN, GAME_OVER_SCREEN];

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn element(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Milliseconds on the same clock as `requestAnimationFrame` timestamps
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = element(id) {
        el.set_text_content(Some(text));
    }
}

/// Make `active` the only visible screen
pub fn show_screen(active: &str) {
    for id in SCREENS {
        let Some(el) = element(id) else {
            log::warn!("Missing screen element #{}", id);
            continue;
        };
        let classes = el.class_list();
        let result = if id == active {
            classes.add_1("active")
        } else {
            classes.remove_1("active")
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle #{}: {:?}", id, e);
        }
    }
}

/// Read balance overrides from `<script id="tuning" type="application/json">`.
/// Missing or invalid blocks fall back to the defaults.
pub fn load_tuning() -> Tuning {
    let Some(json) = element("tuning").and_then(|el| el.text_content()) else {
        log::info!("Using default tuning");
        return Tuning::default();
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning ({:?} spawns)", tuning.spawn_policy);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring inline tuning: {}", e);
            Tuning::default()
        }
    }
}

/// Handle to at most one pending `requestAnimationFrame` callback
#[derive(Debug, Default)]
pub struct FrameRequest {
    id: Option<i32>,
}

impl FrameRequest {
    pub fn is_pending(&self) -> bool {
        self.id.is_some()
    }

    /// Schedule `callback` for the next frame unless one is already pending
    pub fn schedule(&mut self, callback: impl FnOnce(f64) + 'static) {
        if self.is_pending() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(callback);
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => self.id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// The scheduled callback is running; it no longer needs cancelling
    pub fn fired(&mut self) {
        self.id = None;
    }

    /// Drop the pending callback, if any, so no further frame runs
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
    }
}
