use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::FormVm;

#[component]
pub fn LoginView(page: FormVm) -> Element {
    rsx! {
        Layout { title: "Log in".to_string(), signed_in: false,
            div { class: "card",
                h2 { "Log in" }
                {error_line(page.error.clone())}
                {credentials_form("/login", "Log in")}
                p { "New here? " a { href: "/signup", "Create an account" } }
            }
        }
    }
}

#[component]
pub fn SignupView(page: FormVm) -> Element {
    rsx! {
        Layout { title: "Sign up".to_string(), signed_in: false,
            div { class: "card",
                h2 { "Create your account" }
                {error_line(page.error.clone())}
                {credentials_form("/signup", "Sign up")}
                p { "Already registered? " a { href: "/login", "Log in" } }
            }
        }
    }
}

pub(crate) fn error_line(error: Option<String>) -> Element {
    match error {
        Some(message) => rsx! {
            p { class: "error", "{message}" }
        },
        None => rsx! {},
    }
}

fn credentials_form(action: &'static str, submit_label: &'static str) -> Element {
    rsx! {
        form { method: "post", action: "{action}",
            label { r#for: "username", "Username" }
            input { id: "username", name: "username", r#type: "text", autocomplete: "username" }
            label { r#for: "password", "Password" }
            input { id: "password", name: "password", r#type: "password" }
            button { r#type: "submit", "{submit_label}" }
        }
    }
}
