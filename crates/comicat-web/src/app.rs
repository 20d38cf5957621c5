use std::rc::Rc;

use dominator::{Dom, html};
use futures_signals::signal::SignalExt;

use crate::common::Route;
use crate::home::Home;
use crate::login::Login;
use crate::register::Register;

pub struct App {}

impl App {
    pub fn new() -> Rc<Self> {
        Rc::new(App {})
    }

    pub fn render(_app: Rc<Self>) -> Dom {
        html!("div", {
            .child_signal(Route::signal().map(|route| {
                match route {
                    Route::Catalog => Some(
                        Home::render(Home::new()),
                    ),
                    Route::Login => Some(
                        Login::render(Login::new()),
                    ),
                    Route::Register => Some(
                        Register::render(Register::new()),
                    ),
                    Route::NotFound => Some(
                        html!("div", {
                            .text("not found")
                        }),
                    )
                }
            }))
        })
    }
}
