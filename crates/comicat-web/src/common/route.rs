use dominator::routing;
use futures_signals::signal::{Signal, SignalExt};
use wasm_bindgen::prelude::*;
use web_sys::Url;

#[derive(Debug)]
pub enum Route {
    Catalog,
    Login,
    Register,
    NotFound,
}

impl Route {
    pub fn signal() -> impl Signal<Item = Self> {
        routing::url()
            .signal_ref(|url| Url::new(url).unwrap_throw())
            .map(|url| {
                let pathname = url.pathname();
                let mut paths = pathname.split('/').collect::<Vec<_>>();
                paths.retain(|path| !path.is_empty());

                match paths.as_slice() {
                    [] => Route::Catalog,
                    // the server redirects here after a successful login
                    ["catalog"] => Route::Catalog,
                    ["login"] => Route::Login,
                    ["register"] => Route::Register,
                    _ => Route::NotFound,
                }
            })
    }

    pub fn url(&self) -> String {
        match self {
            Route::Catalog => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::NotFound => "/notfound".to_string(),
        }
    }
}
