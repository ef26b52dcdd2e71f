use dioxus::prelude::*;

use crate::views::Layout;

pub const FAQ_MARKDOWN: &str = include_str!("../../assets/faq.md");

/// `html` must already be sanitized.
#[component]
pub fn FaqView(html: String, signed_in: bool) -> Element {
    rsx! {
        Layout { title: "FAQ".to_string(), signed_in,
            div { class: "card",
                h2 { "Frequently asked questions" }
                div { class: "faq", dangerous_inner_html: "{html}" }
            }
        }
    }
}
