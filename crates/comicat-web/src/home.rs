use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use dominator::{Dom, clone, events, html, with_node};
use futures_signals::signal::{Mutable, SignalExt};
use futures_signals::signal_vec::SignalVecExt;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::UnwrapThrowExt;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::catalog::Catalog;
use crate::common::{Comic, card, modal};
use crate::favorites::FavoriteSync;
use crate::utils::window;

/// Tab visibility flips before the browser lays the surface out again, so the
/// scroll restore waits a beat.
const TAB_RESTORE_DELAY_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Catalog,
    Favorites,
}

/// The main page: exclusive tab selection with per-tab scroll memory, plus the
/// detail, remove-confirmation and logout modals. Favorite state changes reach
/// every surface here through the synchronizer's shared cells.
pub struct Home {
    active_tab: Mutable<Tab>,
    scroll_positions: RefCell<HashMap<Tab, i32>>,
    tab_elements: RefCell<HashMap<Tab, HtmlElement>>,
    sync: Rc<FavoriteSync>,
    catalog: Rc<Catalog>,
    detail: Mutable<Option<Rc<Comic>>>,
    show_logout_confirm: Mutable<bool>,
}

impl Home {
    pub fn new() -> Rc<Self> {
        let sync = FavoriteSync::new();

        Rc::new(Self {
            active_tab: Mutable::new(Tab::Catalog),
            scroll_positions: RefCell::new(HashMap::new()),
            tab_elements: RefCell::new(HashMap::new()),
            catalog: Catalog::new(sync.clone()),
            sync,
            detail: Mutable::new(None),
            show_logout_confirm: Mutable::new(false),
        })
    }

    fn switch_tab(home: Rc<Self>, tab: Tab) {
        let current = home.active_tab.get();
        if current == tab {
            return;
        }

        if let Some(element) = home.tab_elements.borrow().get(&current) {
            home.scroll_positions
                .borrow_mut()
                .insert(current, element.scroll_top());
        }

        home.catalog.set_active(tab == Tab::Catalog);
        home.active_tab.set(tab);

        let restore = home
            .scroll_positions
            .borrow()
            .get(&tab)
            .copied()
            .unwrap_or(0);

        spawn_local(clone!(home => async move {
            TimeoutFuture::new(TAB_RESTORE_DELAY_MS).await;
            if let Some(element) = home.tab_elements.borrow().get(&tab) {
                element.set_scroll_top(restore);
            }
        }));
    }

    fn open_detail(home: &Rc<Self>) -> impl Fn(Rc<Comic>) + Clone + use<> {
        clone!(home => move |comic| {
            home.detail.set(Some(comic));
        })
    }

    fn render_tab_button(home: Rc<Self>, tab: Tab, label: &str) -> Dom {
        html!("button", {
            .class("tab-btn")
            .class_signal("active", home.active_tab.signal().map(move |active| active == tab))
            .text(label)
            .event(clone!(home => move |_: events::Click| {
                Self::switch_tab(home.clone(), tab);
            }))
        })
    }

    fn render_topbar(home: Rc<Self>) -> Dom {
        html!("div", {
            .class("topbar")
            .children(&mut [
                html!("span", {
                    .class("app-title")
                    .text("Comicat")
                }),
                html!("div", {
                    .class("tab-buttons")
                    .children(&mut [
                        Self::render_tab_button(home.clone(), Tab::Catalog, "Catalog"),
                        Self::render_tab_button(home.clone(), Tab::Favorites, "Favorites"),
                    ])
                }),
                html!("button", {
                    .class("logout-btn")
                    .text("Log out")
                    .event(clone!(home => move |_: events::Click| {
                        home.show_logout_confirm.set_neq(true);
                    }))
                })
            ])
        })
    }

    fn render_catalog_tab(home: Rc<Self>) -> Dom {
        html!("div" => HtmlElement, {
            .class("tab-content")
            .attribute("id", "catalog-tab")
            .visible_signal(home.active_tab.signal().map(|tab| tab == Tab::Catalog))
            .after_inserted(clone!(home => move |element| {
                home.tab_elements.borrow_mut().insert(Tab::Catalog, element);
            }))
            .with_node!(element => {
                .event(clone!(home => move |_: events::Scroll| {
                    Catalog::on_scroll(home.catalog.clone(), &element);
                }))
            })
            .children(&mut [
                Catalog::render(home.catalog.clone(), Self::open_detail(&home))
            ])
        })
    }

    fn render_favorites_tab(home: Rc<Self>) -> Dom {
        html!("div" => HtmlElement, {
            .class("tab-content")
            .attribute("id", "favorites-tab")
            .visible_signal(home.active_tab.signal().map(|tab| tab == Tab::Favorites))
            .after_inserted(clone!(home => move |element| {
                home.tab_elements.borrow_mut().insert(Tab::Favorites, element);
            }))
            .children(&mut [
                html!("div", {
                    .class("comics-grid")
                    .children_signal_vec(home.sync.favorites_signal_vec().map(clone!(home => move |comic| {
                        card::render(&comic, &home.sync, Self::open_detail(&home))
                    })))
                })
            ])
        })
    }

    fn render_detail(home: &Rc<Self>, comic: &Rc<Comic>) -> Dom {
        let membership = home.sync.membership(comic.id);

        html!("div", {
            .children(&mut [
                html!("button", {
                    .class("modal-close")
                    .text("×")
                    .event(clone!(home => move |_: events::Click| {
                        home.detail.set(None);
                    }))
                }),
                html!("div", {
                    .class("modal-grid")
                    .children(&mut [
                        html!("div", {
                            .class("modal-image")
                            .children(&mut [
                                html!("img", {
                                    .attribute("src", &comic.thumbnail_url())
                                    .attribute("alt", &comic.title)
                                })
                            ])
                        }),
                        html!("div", {
                            .class("modal-info")
                            .children(&mut [
                                html!("h2", {
                                    .text(&comic.title)
                                }),
                                html!("button", {
                                    .class("favorite-btn")
                                    .class_signal("active", membership.signal())
                                    .text_signal(membership.signal().map(card::favorite_label))
                                    .event(clone!(home, comic => move |_: events::Click| {
                                        FavoriteSync::request_toggle(&home.sync, &comic);
                                    }))
                                }),
                                html!("div", {
                                    .class("modal-details")
                                    .children(&mut [
                                        html!("p", {
                                            .child(html!("strong", { .text("Pages:") }))
                                            .text(&format!(" {}", card::format_page_count(comic.page_count)))
                                        }),
                                        html!("p", {
                                            .child(html!("strong", { .text("Price:") }))
                                            .text(&format!(" {}", card::format_price(comic.price())))
                                        }),
                                        html!("p", {
                                            .child(html!("strong", { .text("Description:") }))
                                            .text(&format!(" {}", comic.description.as_deref().unwrap_or("Not available")))
                                        })
                                    ])
                                })
                            ])
                        })
                    ])
                })
            ])
        })
    }

    fn render_detail_modal(home: Rc<Self>) -> Dom {
        modal::render(
            home.detail.signal_ref(|detail| detail.is_some()),
            clone!(home => move || {
                home.detail.set(None);
            }),
            html!("div", {
                .child_signal(home.detail.signal_cloned().map(clone!(home => move |detail| {
                    detail.map(|comic| Self::render_detail(&home, &comic))
                })))
            }),
        )
    }

    fn render_confirm_modal(home: Rc<Self>) -> Dom {
        modal::render(
            home.sync.is_confirming_signal(),
            clone!(home => move || {
                home.sync.cancel_removal();
            }),
            html!("div", {
                .class("confirm-dialog")
                .children(&mut [
                    html!("p", {
                        .text_signal(home.sync.pending_removal_signal().map(|pending| {
                            pending
                                .map(|comic| format!("Remove \"{}\" from your favorites?", comic.title))
                                .unwrap_or_default()
                        }))
                    }),
                    html!("div", {
                        .class("confirm-actions")
                        .children(&mut [
                            html!("button", {
                                .class("confirm-btn")
                                .text("Remove")
                                .event(clone!(home => move |_: events::Click| {
                                    FavoriteSync::confirm_removal(&home.sync);
                                }))
                            }),
                            html!("button", {
                                .class("cancel-btn")
                                .text("Cancel")
                                .event(clone!(home => move |_: events::Click| {
                                    home.sync.cancel_removal();
                                }))
                            })
                        ])
                    })
                ])
            }),
        )
    }

    fn render_logout_modal(home: Rc<Self>) -> Dom {
        modal::render(
            home.show_logout_confirm.signal(),
            clone!(home => move || {
                home.show_logout_confirm.set_neq(false);
            }),
            html!("div", {
                .class("confirm-dialog")
                .children(&mut [
                    html!("p", {
                        .text("Log out of Comicat?")
                    }),
                    html!("div", {
                        .class("confirm-actions")
                        .children(&mut [
                            html!("button", {
                                .class("confirm-btn")
                                .text("Log out")
                                .event(|_: events::Click| {
                                    window().location().set_href("/logout").unwrap_throw();
                                })
                            }),
                            html!("button", {
                                .class("cancel-btn")
                                .text("Cancel")
                                .event(clone!(home => move |_: events::Click| {
                                    home.show_logout_confirm.set_neq(false);
                                }))
                            })
                        ])
                    })
                ])
            }),
        )
    }

    pub fn render(home: Rc<Self>) -> Dom {
        html!("div", {
            .class("page")
            .children(&mut [
                Self::render_topbar(home.clone()),
                html!("div", {
                    .class("topbar-spacing")
                }),
                Self::render_catalog_tab(home.clone()),
                Self::render_favorites_tab(home.clone()),
                Self::render_detail_modal(home.clone()),
                Self::render_confirm_modal(home.clone()),
                Self::render_logout_modal(home),
            ])
        })
    }
}
