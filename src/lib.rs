//! Ctrl-wheel and pinch zoom with double-tap reset for a host page's
//! `#canvas` element.

use wasm_bindgen::prelude::*;

pub mod boot;
pub mod controller;
pub mod state;
mod util;

#[wasm_bindgen(start)]
pub fn start() {
    boot::schedule();
}
