use std::cell::RefCell;
use std::rc::Rc;

use dominator::{Dom, clone, html};
use futures_signals::{
    signal::Mutable,
    signal_vec::{MutableVec, SignalVecExt},
};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::api;
use crate::common::{Comic, ComicsPage, Spinner};
use crate::favorites::FavoriteSync;
use crate::pager::{self, PagerState, SCROLL_DEBOUNCE_MS};
use crate::utils::AsyncLoader;

/// Infinite-scroll catalog surface. A single boolean gate keeps at most one
/// page fetch in flight; scroll triggers while loading are dropped, not queued.
pub struct Catalog {
    pager: RefCell<PagerState>,
    comic_list: MutableVec<Rc<Comic>>,
    is_active: Mutable<bool>,
    sync: Rc<FavoriteSync>,
    scroll_loader: AsyncLoader,
    spinner: Rc<Spinner>,
}

impl Catalog {
    pub fn new(sync: Rc<FavoriteSync>) -> Rc<Self> {
        Rc::new(Self {
            pager: RefCell::new(PagerState::new()),
            comic_list: MutableVec::new(),
            is_active: Mutable::new(true),
            sync,
            scroll_loader: AsyncLoader::new(),
            spinner: Spinner::new(),
        })
    }

    pub fn set_active(&self, active: bool) {
        self.is_active.set_neq(active);
    }

    pub fn fetch_more(catalog: Rc<Self>) {
        if !catalog.is_active.get() {
            return;
        }

        let offset = match catalog.pager.borrow_mut().try_begin() {
            Some(offset) => offset,
            None => return,
        };

        catalog.spinner.set_active(true);
        spawn_local(clone!(catalog => async move {
            match api::load_more_comics(offset).await {
                Ok(page) => {
                    catalog.append_page(page);
                }
                Err(e) => {
                    error!("error loading more comics: {}", e);
                    catalog.pager.borrow_mut().settle(0);
                }
            }
            catalog.spinner.set_active(false);
        }));
    }

    fn append_page(&self, page: ComicsPage) {
        self.sync.reconcile(&page.favorite_ids);

        let appended = page.comics.len();
        {
            let mut comic_list = self.comic_list.lock_mut();
            for comic in page.comics {
                comic_list.push_cloned(Rc::new(comic));
            }
        }

        self.pager.borrow_mut().settle(appended);
    }

    /// Debounced near-bottom check; a fresh scroll event restarts the timer.
    pub fn on_scroll(catalog: Rc<Self>, element: &HtmlElement) {
        let element = element.clone();
        catalog.scroll_loader.load(clone!(catalog => async move {
            TimeoutFuture::new(SCROLL_DEBOUNCE_MS).await;

            if pager::near_bottom(
                element.scroll_top(),
                element.scroll_height(),
                element.client_height(),
            ) {
                Self::fetch_more(catalog);
            }
        }));
    }

    pub fn render<F>(catalog: Rc<Self>, on_select: F) -> Dom
    where
        F: Fn(Rc<Comic>) + Clone + 'static,
    {
        if catalog.comic_list.lock_ref().is_empty() {
            Self::fetch_more(catalog.clone());
        }

        html!("div", {
            .children(&mut [
                html!("div", {
                    .class("comics-grid")
                    .children_signal_vec(catalog.comic_list.signal_vec_cloned().map(clone!(catalog, on_select => move |comic| {
                        crate::common::card::render(&comic, &catalog.sync, on_select.clone())
                    })))
                }),
                html!("div", {
                    .class("loading-indicator")
                    .children(&mut [
                        Spinner::render(catalog.spinner.clone())
                    ])
                })
            ])
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::Thumbnail;

    fn page(start_id: i64, count: i64, favorite_ids: Vec<i64>) -> ComicsPage {
        ComicsPage {
            comics: (start_id..start_id + count)
                .map(|id| Comic {
                    id,
                    title: format!("Comic #{}", id),
                    page_count: None,
                    prices: vec![],
                    thumbnail: Thumbnail {
                        path: "http://i.example.com/x".to_string(),
                        extension: "jpg".to_string(),
                    },
                    description: None,
                })
                .collect(),
            favorite_ids,
        }
    }

    #[test]
    fn test_pages_append_and_advance_offset() {
        let catalog = Catalog::new(FavoriteSync::new());

        assert_eq!(catalog.pager.borrow_mut().try_begin(), Some(0));
        catalog.append_page(page(1, 12, vec![]));
        assert_eq!(catalog.pager.borrow().offset(), 12);
        assert_eq!(catalog.comic_list.lock_ref().len(), 12);

        assert_eq!(catalog.pager.borrow_mut().try_begin(), Some(12));
        catalog.append_page(page(13, 12, vec![]));
        assert_eq!(catalog.pager.borrow().offset(), 24);
        assert_eq!(catalog.comic_list.lock_ref().len(), 24);
    }

    #[test]
    fn test_empty_page_keeps_offset() {
        let catalog = Catalog::new(FavoriteSync::new());

        catalog.pager.borrow_mut().try_begin();
        catalog.append_page(page(1, 12, vec![]));

        catalog.pager.borrow_mut().try_begin();
        catalog.append_page(page(0, 0, vec![]));

        assert_eq!(catalog.pager.borrow().offset(), 12);
        assert_eq!(catalog.comic_list.lock_ref().len(), 12);
        assert!(!catalog.pager.borrow().is_loading());
    }

    #[test]
    fn test_page_seeds_membership_registry() {
        let sync = FavoriteSync::new();
        let catalog = Catalog::new(sync.clone());

        catalog.pager.borrow_mut().try_begin();
        catalog.append_page(page(1, 12, vec![3, 7]));

        assert!(sync.membership(3).get());
        assert!(sync.membership(7).get());
        assert!(!sync.membership(1).get());
    }
}
