#[macro_use]
extern crate log;

mod api;
mod app;
mod catalog;
mod common;
mod favorites;
mod gallery;
mod home;
mod login;
mod pager;
mod register;
mod utils;
mod validate;

use wasm_bindgen::prelude::*;

use app::App;

#[wasm_bindgen(start)]
pub async fn main_js() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    utils::initialize_urls();

    dominator::append_dom(&dominator::body(), App::render(App::new()));

    Ok(())
}
