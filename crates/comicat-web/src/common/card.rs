use std::rc::Rc;

use dominator::{Dom, clone, events, html};
use futures_signals::signal::SignalExt;
use web_sys::HtmlElement;

use crate::common::Comic;
use crate::favorites::FavoriteSync;

pub fn favorite_label(is_favorite: bool) -> &'static str {
    if is_favorite {
        "★ Remove from favorites"
    } else {
        "☆ Add to favorites"
    }
}

pub fn format_page_count(page_count: Option<i64>) -> String {
    page_count
        .map(|count| count.to_string())
        .unwrap_or_else(|| "Not available".to_string())
}

pub fn format_price(price: Option<f64>) -> String {
    price
        .map(|price| format!("${}", price))
        .unwrap_or_else(|| "Not available".to_string())
}

/// One comic card. Catalog and favorites surfaces share this; the favorite
/// button binds to the synchronizer's shared membership cell so every card for
/// the same comic flips together. Clicking anywhere else on the card opens the
/// detail view.
pub fn render<F>(comic: &Rc<Comic>, sync: &Rc<FavoriteSync>, on_select: F) -> Dom
where
    F: Fn(Rc<Comic>) + 'static,
{
    let membership = sync.membership(comic.id);

    html!("div", {
        .class("comic-card")
        .attribute("data-comic-id", &comic.id.to_string())
        .event(clone!(comic => move |e: events::Click| {
            let on_favorite_btn = e
                .dyn_target::<HtmlElement>()
                .is_some_and(|el| el.class_list().contains("favorite-btn"));
            if !on_favorite_btn {
                on_select(comic.clone());
            }
        }))
        .children(&mut [
            html!("img", {
                .class("comic-image")
                .attribute("src", &comic.thumbnail_url())
                .attribute("alt", &comic.title)
                .attribute("loading", "lazy")
            }),
            html!("div", {
                .class("comic-title")
                .children(&mut [
                    html!("h3", {
                        .text(&comic.title)
                    })
                ])
            }),
            html!("div", {
                .class("comic-hover-info")
                .children(&mut [
                    html!("div", {
                        .class("comic-hover-details")
                        .children(&mut [
                            html!("p", {
                                .child(html!("strong", { .text("Pages:") }))
                                .text(&format!(" {}", format_page_count(comic.page_count)))
                            }),
                            html!("p", {
                                .child(html!("strong", { .text("Price:") }))
                                .text(&format!(" {}", format_price(comic.price())))
                            }),
                            html!("button", {
                                .class("favorite-btn")
                                .class_signal("active", membership.signal())
                                .text_signal(membership.signal().map(favorite_label))
                                .event(clone!(sync, comic => move |_: events::Click| {
                                    FavoriteSync::request_toggle(&sync, &comic);
                                }))
                            })
                        ])
                    })
                ])
            })
        ])
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_favorite_label() {
        assert_eq!(favorite_label(true), "★ Remove from favorites");
        assert_eq!(favorite_label(false), "☆ Add to favorites");
    }

    #[test]
    fn test_missing_numeric_fields_fall_back() {
        assert_eq!(format_page_count(Some(32)), "32");
        assert_eq!(format_page_count(None), "Not available");
        assert_eq!(format_price(Some(3.99)), "$3.99");
        assert_eq!(format_price(None), "Not available");
    }
}
