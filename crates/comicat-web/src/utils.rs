use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{
    Future,
    future::{AbortHandle, abortable},
};
use futures_signals::signal::{Mutable, Signal};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, Storage, Window};

thread_local! {
    static WINDOW: Window = web_sys::window().unwrap_throw();
    static DOCUMENT: Document = WINDOW.with(|w| w.document().unwrap_throw());
    static BODY: HtmlElement = DOCUMENT.with(|d| d.body().unwrap_throw());
    static SESSION_STORAGE: Storage = WINDOW.with(|w| w.session_storage().unwrap_throw().unwrap_throw());
    static API_HOST: std::cell::RefCell<String> = const { std::cell::RefCell::new(String::new()) };
}

pub struct AsyncState {
    id: usize,
    handle: AbortHandle,
}

impl AsyncState {
    fn new(handle: AbortHandle) -> Self {
        static ID: AtomicUsize = AtomicUsize::new(0);
        let id = ID.fetch_add(1, Ordering::SeqCst);

        Self { id, handle }
    }
}

/// Runs at most one future at a time; loading a new one aborts the previous.
pub struct AsyncLoader {
    loading: Mutable<Option<AsyncState>>,
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading: Mutable::new(None),
        }
    }

    pub fn replace(&self, value: Option<AsyncState>) {
        let mut loading = self.loading.lock_mut();
        if let Some(state) = loading.as_mut() {
            state.handle.abort();
        }
        *loading = value;
    }

    pub fn load<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let (fut, handle) = abortable(fut);

        let state = AsyncState::new(handle);
        let id = state.id;

        self.replace(Some(state));

        let loading = self.loading.clone();

        spawn_local(async move {
            if fut.await.is_ok() {
                let mut loading = loading.lock_mut();

                if let Some(current_id) = loading.as_ref().map(|x| x.id) {
                    if current_id == id {
                        *loading = None;
                    }
                }
            }
        });
    }

    pub fn is_loading(&self) -> impl Signal<Item = bool> + use<> {
        self.loading.signal_ref(|x| x.is_some())
    }
}

pub fn initialize_urls() {
    let origin = window().location().origin().unwrap_throw();
    API_HOST.with(|s| *s.borrow_mut() = origin);
}

pub fn api_host() -> String {
    API_HOST.with(|v| v.borrow().clone())
}

pub fn window() -> Window {
    WINDOW.with(|s| s.clone())
}

pub fn document() -> Document {
    DOCUMENT.with(|d| d.clone())
}

pub fn body() -> HtmlElement {
    BODY.with(|d| d.clone())
}

pub fn session_storage() -> Storage {
    SESSION_STORAGE.with(|s| s.clone())
}
