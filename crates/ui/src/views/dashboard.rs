use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::DashboardVm;

#[component]
pub fn DashboardView(vm: DashboardVm) -> Element {
    rsx! {
        Layout { title: "Dashboard".to_string(), signed_in: true,
            div { class: "card",
                h2 { "Welcome back, {vm.username}!" }
                dl {
                    dt { "Overall score" }
                    dd { class: "stat", "{vm.score}%" }
                    dt { "Streak" }
                    dd { class: "stat", "{vm.streak_label}" }
                }
                h3 { "Badges" }
                if vm.badges.is_empty() {
                    p { "No badges yet. Every fifth correct answer in a grade earns one." }
                } else {
                    ul { class: "badges",
                        for badge in vm.badges.iter() {
                            li { "{badge}" }
                        }
                    }
                }
                p { a { href: "/choose_quiz", "Start a quiz" } }
            }
        }
    }
}
