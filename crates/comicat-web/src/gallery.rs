use std::rc::Rc;

use dominator::{Dom, clone, html};
use futures_signals::signal_vec::{MutableVec, SignalVecExt};
use serde::{Deserialize, Serialize};
use wasm_bindgen::UnwrapThrowExt;

use crate::api;
use crate::common::GalleryComic;
use crate::utils::{AsyncLoader, session_storage};

pub const STORAGE_KEY: &str = "gallery_comics";

pub const CACHE_DURATION_MS: f64 = 1000.0 * 60.0 * 5.0;

#[derive(Serialize, Deserialize)]
pub struct GalleryCache {
    pub data: Vec<GalleryComic>,
    /// Write time, epoch milliseconds.
    pub timestamp: f64,
}

impl GalleryCache {
    pub fn is_fresh(&self, now_ms: f64) -> bool {
        now_ms - self.timestamp < CACHE_DURATION_MS
    }
}

/// The rotating comic strip behind the auth forms. Images come from
/// `/get_random_comics`, cached per browser session so switching between the
/// login and register pages does not refetch.
pub struct Gallery {
    comics: MutableVec<GalleryComic>,
    loader: AsyncLoader,
}

impl Gallery {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            comics: MutableVec::new(),
            loader: AsyncLoader::new(),
        })
    }

    fn fetch_comics(gallery: Rc<Self>) {
        gallery.loader.load(clone!(gallery => async move {
            let comics = match Self::cached() {
                Some(comics) => comics,
                None => match api::get_random_comics().await {
                    Ok(comics) => {
                        Self::store(&comics);
                        comics
                    }
                    Err(e) => {
                        error!("error loading gallery comics: {}", e);
                        return;
                    }
                },
            };

            gallery.comics.lock_mut().replace_cloned(comics);
        }));
    }

    fn cached() -> Option<Vec<GalleryComic>> {
        let raw = session_storage().get(STORAGE_KEY).unwrap_throw()?;
        let cache: GalleryCache = serde_json::from_str(&raw).ok()?;

        cache.is_fresh(js_sys::Date::now()).then_some(cache.data)
    }

    fn store(comics: &[GalleryComic]) {
        let cache = GalleryCache {
            data: comics.to_vec(),
            timestamp: js_sys::Date::now(),
        };

        if let Ok(serialized) = serde_json::to_string(&cache) {
            session_storage()
                .set(STORAGE_KEY, &serialized)
                .unwrap_throw();
        }
    }

    // The strip is rendered twice so the CSS loop can wrap seamlessly.
    fn render_strip(gallery: &Rc<Self>) -> Dom {
        html!("div", {
            .class("comics-gallery-inner")
            .children_signal_vec(gallery.comics.signal_vec_cloned().map(|comic| html!("img", {
                .class("gallery-comic")
                .attribute("src", &comic.thumbnail)
                .attribute("alt", &comic.title)
                .attribute("loading", "lazy")
                .attribute("decoding", "async")
            })))
        })
    }

    pub fn render(gallery: Rc<Self>) -> Dom {
        Self::fetch_comics(gallery.clone());

        html!("div", {
            .class("comics-gallery")
            .class_signal("hidden", gallery.comics.signal_vec_cloned().is_empty())
            .children(&mut [
                Self::render_strip(&gallery),
                Self::render_strip(&gallery),
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cache_is_fresh_within_five_minutes() {
        let written_at = 1_700_000_000_000.0;
        let cache = GalleryCache {
            data: vec![],
            timestamp: written_at,
        };

        let four_minutes = 1000.0 * 60.0 * 4.0;
        let six_minutes = 1000.0 * 60.0 * 6.0;

        assert!(cache.is_fresh(written_at + four_minutes));
        assert!(!cache.is_fresh(written_at + six_minutes));
    }

    #[test]
    fn test_cache_round_trips_through_json() {
        let cache = GalleryCache {
            data: vec![GalleryComic {
                id: 1,
                title: "Avengers".to_string(),
                thumbnail: "http://i.example.com/av/portrait_uncanny.jpg".to_string(),
            }],
            timestamp: 1_700_000_000_000.0,
        };

        let parsed: GalleryCache =
            serde_json::from_str(&serde_json::to_string(&cache).unwrap()).unwrap();

        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.timestamp, cache.timestamp);
        assert_eq!(parsed.data[0].title, "Avengers");
    }
}
