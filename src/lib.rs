use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod client;
pub mod components;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod tokens;
pub mod types;

pub use app::App;
pub use client::ChatClient;
pub use error::ClientError;

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("pdf chat client starting");

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("root"));
    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
