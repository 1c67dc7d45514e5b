//! knowledge-bot Web Frontend
//!
//! Leptos-based WASM chat client for agent-server.

mod api;
mod app;
mod components;
mod pages;

pub use app::App;

use wasm_bindgen::prelude::*;

/// Offered in the sidebar
pub const SAMPLE_QUESTIONS: [&str; 4] = [
    "Who is the CEO of OpenAI?",
    "Where did he study?",
    "Who founded Tesla?",
    "Tell me about Python",
];

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
