use dominator::{Dom, events, html};
use futures_signals::signal::Signal;

/// Shared modal shell: a backdrop that closes on click and a content box that
/// swallows clicks. Visibility is driven by the caller's own state.
pub fn render<S, F>(visible: S, on_close: F, content: Dom) -> Dom
where
    S: Signal<Item = bool> + 'static,
    F: Fn() + 'static,
{
    html!("div", {
        .class("modal")
        .visible_signal(visible)
        .children(&mut [
            html!("div", {
                .class("modal-backdrop")
                .event(move |_: events::Click| {
                    on_close();
                })
            }),
            html!("div", {
                .class("modal-content")
                .children(&mut [
                    content
                ])
            })
        ])
    })
}
