use dioxus::prelude::*;

// Dioxus 0.7 no longer ships an `html` element; extend the element namespace
// locally so the `rsx!` below can still emit the document root.
mod dioxus_elements {
    pub use dioxus::prelude::dioxus_elements::*;
    pub use elements::html;

    pub mod elements {
        pub use dioxus::prelude::dioxus_elements::elements::*;

        #[allow(non_camel_case_types)]
        pub mod html {
            pub use dioxus::prelude::dioxus_elements::elements::body::*;

            pub const TAG_NAME: &str = "html";
            pub const NAME_SPACE: Option<&str> = None;
        }
    }
}

const STYLESHEET: &str = "
body { font-family: system-ui, sans-serif; margin: 0; background: #f6f7fb; color: #1d2433; }
nav.topbar { display: flex; gap: 1rem; align-items: center; padding: 0.75rem 1.5rem; background: #283593; }
nav.topbar a, nav.topbar span { color: #fff; text-decoration: none; }
nav.topbar .brand { font-weight: 700; margin-right: auto; }
main.content { max-width: 40rem; margin: 2rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 8px; padding: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.error { color: #b00020; }
.stat { font-size: 2rem; font-weight: 700; }
form label { display: block; margin-top: 0.75rem; }
form input, form select { width: 100%; padding: 0.5rem; margin-top: 0.25rem; }
form button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 0.35rem 0.5rem; border-bottom: 1px solid #e0e0e0; }
";

/// Page chrome shared by every view.
#[component]
pub fn Layout(title: String, signed_in: bool, children: Element) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{title} · NumberNinja" }
                style { dangerous_inner_html: STYLESHEET }
            }
            body {
                TopBar { signed_in }
                main { class: "content", {children} }
            }
        }
    }
}

#[component]
fn TopBar(signed_in: bool) -> Element {
    rsx! {
        nav { class: "topbar",
            a { class: "brand", href: "/", "NumberNinja" }
            if signed_in {
                a { href: "/dashboard", "Dashboard" }
                a { href: "/choose_quiz", "Quiz" }
                a { href: "/progress", "Progress" }
                a { href: "/faq", "FAQ" }
                a { href: "/logout", "Log out" }
            } else {
                a { href: "/faq", "FAQ" }
                a { href: "/login", "Log in" }
                a { href: "/signup", "Sign up" }
            }
        }
    }
}
