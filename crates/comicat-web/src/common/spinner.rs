use std::rc::Rc;

use dominator::{Dom, html};
use futures_signals::signal::Mutable;

pub struct Spinner {
    active: Mutable<bool>,
}

impl Spinner {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            active: Mutable::new(false),
        })
    }

    pub fn set_active(&self, active: bool) {
        self.active.set_neq(active);
    }

    pub fn render(this: Rc<Self>) -> Dom {
        html!("div", {
            .class("spinner")
            .visible_signal(this.active.signal())
            .children(&mut [
                html!("div", {
                    .class("loader")
                })
            ])
        })
    }
}
