use dioxus::prelude::*;

use crate::views::Layout;
use crate::vm::ProgressVm;

#[component]
pub fn ProgressView(vm: ProgressVm) -> Element {
    rsx! {
        Layout { title: "Progress".to_string(), signed_in: true,
            div { class: "card",
                h2 { "Progress for {vm.username}" }
                p { "Overall score: " strong { "{vm.score}%" } }
                table {
                    thead {
                        tr {
                            th { "Grade" }
                            th { "Correct" }
                            th { "Attempts" }
                            th { "Score" }
                        }
                    }
                    tbody {
                        for row in vm.rows.iter() {
                            tr {
                                td { "{row.label}" }
                                td { "{row.correct}" }
                                td { "{row.attempts}" }
                                td { "{row.percent}%" }
                            }
                        }
                    }
                }
            }
        }
    }
}
