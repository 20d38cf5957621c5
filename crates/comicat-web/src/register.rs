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

pub struct Register {
    username: Mutable<String>,
    email: Mutable<String>,
    identification: Mutable<String>,
    password: Mutable<String>,
    confirm_password: Mutable<String>,
    errors: Mutable<Vec<FieldError>>,
    server_message: Mutable<Option<String>>,
    gallery: Rc<Gallery>,
    loader: AsyncLoader,
}

impl Register {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            username: Mutable::new("".to_string()),
            email: Mutable::new("".to_string()),
            identification: Mutable::new("".to_string()),
            password: Mutable::new("".to_string()),
            confirm_password: Mutable::new("".to_string()),
            errors: Mutable::new(vec![]),
            server_message: Mutable::new(None),
            gallery: Gallery::new(),
            loader: AsyncLoader::new(),
        })
    }

    fn submit(register: Rc<Self>) {
        let username = register.username.get_cloned();
        let email = register.email.get_cloned();
        let identification = register.identification.get_cloned();
        let password = register.password.get_cloned();
        let confirm_password = register.confirm_password.get_cloned();

        let errors = validate::validate_register(&username, &email, &password, &confirm_password);
        if !errors.is_empty() {
            register.errors.set(errors);
            return;
        }
        register.errors.set(vec![]);

        register.loader.load(clone!(register => async move {
            match api::register(&username, &email, &identification, &password, &confirm_password).await {
                Ok(AuthOutcome::Success { redirect }) => {
                    window().location().set_href(&redirect).unwrap_throw();
                }
                Ok(AuthOutcome::Rejected { message }) => {
                    register.server_message.set(Some(message));
                }
                Err(e) => {
                    error!("error submitting register form: {}", e);
                }
            }
        }));
    }

    fn render_field_group(register: &Rc<Self>, field: Field, input: Dom) -> Dom {
        html!("div", {
            .class("form-group")
            .class_signal("error", register.errors.signal_cloned().map(move |errors| {
                validate::message_for(&errors, field).is_some()
            }))
            .children(&mut [input])
            .child_signal(register.errors.signal_cloned().map(move |errors| {
                validate::message_for(&errors, field).map(|message| html!("span", {
                    .class("error-message")
                    .text(message)
                }))
            }))
        })
    }

    fn render_input(value: &Mutable<String>, input_type: &str, name: &str, placeholder: &str) -> Dom {
        let value = value.clone();

        html!("input" => HtmlInputElement, {
            .attribute("type", input_type)
            .attribute("name", name)
            .attribute("placeholder", placeholder)
            .with_node!(input => {
                .event(move |_: events::Input| {
                    value.set(input.value());
                })
            })
        })
    }

    pub fn render(register: Rc<Self>) -> Dom {
        html!("div", {
            .class("auth-page")
            .children(&mut [
                Gallery::render(register.gallery.clone()),
                html!("div", {
                    .class("form-side")
                    .child_signal(register.server_message.signal_cloned().map(|message| {
                        message.map(|message| html!("div", {
                            .class(["alert", "alert-error"])
                            .text(&message)
                        }))
                    }))
                    .children(&mut [
                        html!("h1", {
                            .text("Create your account")
                        }),
                        html!("form", {
                            .attribute("id", "register-form")
                            .event_with_options(&EventOptions::preventable(), clone!(register => move |e: events::KeyDown| {
                                if e.key() == "Enter" {
                                    e.prevent_default();
                                    Self::submit(register.clone());
                                }
                            }))
                            .children(&mut [
                                Self::render_field_group(&register, Field::Username,
                                    Self::render_input(&register.username, "text", "username", "Username")),
                                Self::render_field_group(&register, Field::Email,
                                    Self::render_input(&register.email, "email", "email", "Email")),
                                html!("div", {
                                    .class("form-group")
                                    .children(&mut [
                                        Self::render_input(&register.identification, "text", "identification", "Identification")
                                    ])
                                }),
                                Self::render_field_group(&register, Field::Password,
                                    Self::render_input(&register.password, "password", "password", "Password")),
                                Self::render_field_group(&register, Field::ConfirmPassword,
                                    Self::render_input(&register.confirm_password, "password", "confirm_password", "Confirm password")),
                                html!("button", {
                                    .text("Sign up")
                                    .event_with_options(&EventOptions::preventable(), clone!(register => move |e: events::Click| {
                                        e.prevent_default();
                                        Self::submit(register.clone());
                                    }))
                                })
                            ])
                        }),
                        link!(Route::Login.url(), {
                            .class("auth-switch")
                            .text("Already have an account? Log in")
                        })
                    ])
                }),
                html!("div", {
                    .class("login-loading")
                    .visible_signal(register.loader.is_loading())
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
