use std::rc::Rc;

use dominator::{Dom, EventOptions, clone, events, html, link, with_node};
use futures_signals::signal::{Mutable, SignalExt};
use wasm_bindgen::UnwrapThrowExt;
use web_sys::HtmlInputElement;

use crate::api::{self, AuthOutcome};
use crate::common::Route;
use crate::gallery::Gallery;
use crate::utils::{AsyncLoader, window};
use crate::validate::{self, Field, FieldError};

pub struct Login {
    email: Mutable<String>,
    password: Mutable<String>,
    errors: Mutable<Vec<FieldError>>,
    server_message: Mutable<Option<String>>,
    gallery: Rc<Gallery>,
    loader: AsyncLoader,
}

impl Login {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            email: Mutable::new("".to_string()),
            password: Mutable::new("".to_string()),
            errors: Mutable::new(vec![]),
            server_message: Mutable::new(None),
            gallery: Gallery::new(),
            loader: AsyncLoader::new(),
        })
    }

    fn submit(login: Rc<Self>) {
        let email = login.email.get_cloned();
        let password = login.password.get_cloned();

        let errors = validate::validate_login(&email, &password);
        if !errors.is_empty() {
            login.errors.set(errors);
            return;
        }
        login.errors.set(vec![]);

        login.loader.load(clone!(login => async move {
            match api::login(&email, &password).await {
                Ok(AuthOutcome::Success { redirect }) => {
                    window().location().set_href(&redirect).unwrap_throw();
                }
                Ok(AuthOutcome::Rejected { message }) => {
                    login.server_message.set(Some(message));
                }
                Err(e) => {
                    error!("error submitting login form: {}", e);
                }
            }
        }));
    }

    fn render_field_group(login: &Rc<Self>, field: Field, input: Dom) -> Dom {
        html!("div", {
            .class("form-group")
            .class_signal("error", login.errors.signal_cloned().map(move |errors| {
                validate::message_for(&errors, field).is_some()
            }))
            .children(&mut [input])
            .child_signal(login.errors.signal_cloned().map(move |errors| {
                validate::message_for(&errors, field).map(|message| html!("span", {
                    .class("error-message")
                    .text(message)
                }))
            }))
        })
    }

    pub fn render(login: Rc<Self>) -> Dom {
        html!("div", {
            .class("auth-page")
            .children(&mut [
                Gallery::render(login.gallery.clone()),
                html!("div", {
                    .class("form-side")
                    .child_signal(login.server_message.signal_cloned().map(|message| {
                        message.map(|message| html!("div", {
                            .class(["alert", "alert-error"])
                            .text(&message)
                        }))
                    }))
                    .children(&mut [
                        html!("h1", {
                            .text("Comicat")
                        }),
                        html!("form", {
                            .attribute("id", "login-form")
                            .event_with_options(&EventOptions::preventable(), clone!(login => move |e: events::KeyDown| {
                                if e.key() == "Enter" {
                                    e.prevent_default();
                                    Self::submit(login.clone());
                                }
                            }))
                            .children(&mut [
                                Self::render_field_group(&login, Field::Email, html!("input" => HtmlInputElement, {
                                    .attribute("type", "email")
                                    .attribute("name", "email")
                                    .attribute("placeholder", "Email")
                                    .with_node!(input => {
                                        .event(clone!(login => move |_: events::Input| {
                                            login.email.set(input.value());
                                        }))
                                    })
                                })),
                                Self::render_field_group(&login, Field::Password, html!("input" => HtmlInputElement, {
                                    .attribute("type", "password")
                                    .attribute("name", "password")
                                    .attribute("placeholder", "Password")
                                    .with_node!(input => {
                                        .event(clone!(login => move |_: events::Input| {
                                            login.password.set(input.value());
                                        }))
                                    })
                                })),
                                html!("button", {
                                    .text("Log in")
                                    .event_with_options(&EventOptions::preventable(), clone!(login => move |e: events::Click| {
                                        e.prevent_default();
                                        Self::submit(login.clone());
                                    }))
                                })
                            ])
                        }),
                        link!(Route::Register.url(), {
                            .class("auth-switch")
                            .text("Create an account")
                        })
                    ])
                }),
                html!("div", {
                    .class("login-loading")
                    .visible_signal(login.loader.is_loading())
                    .children(&mut [
                        html!("div", {
                            .class("loader")
                        })
                    ])
                })
            ])
        })
    }
}
