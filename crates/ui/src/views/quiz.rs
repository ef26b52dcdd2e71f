use dioxus::prelude::*;

use crate::views::Layout;
use crate::views::auth::error_line;
use crate::vm::{FormVm, GradeOptionVm, QuizResultVm, QuizVm};

#[component]
pub fn ChooseGradeView(options: Vec<GradeOptionVm>, page: FormVm) -> Element {
    rsx! {
        Layout { title: "Choose a grade".to_string(), signed_in: true,
            div { class: "card",
                h2 { "Choose your grade" }
                {error_line(page.error.clone())}
                form { method: "post", action: "/choose_quiz",
                    label { r#for: "grade", "Grade" }
                    select { id: "grade", name: "grade",
                        for choice in options.iter() {
                            option { value: "{choice.value}", "{choice.label}" }
                        }
                    }
                    button { r#type: "submit", "Start quiz" }
                }
            }
        }
    }
}

#[component]
pub fn QuizView(vm: QuizVm) -> Element {
    rsx! {
        Layout { title: "Quiz".to_string(), signed_in: true,
            div { class: "card",
                p { class: "counter", "Question {vm.number} of {vm.total}" }
                h2 { class: "prompt", "{vm.prompt}" }
                form { method: "post", action: "/submit",
                    label { r#for: "answer", "Your answer" }
                    input { id: "answer", name: "answer", r#type: "text", autocomplete: "off", autofocus: true }
                    button { r#type: "submit", "Submit" }
                }
            }
        }
    }
}

#[component]
pub fn ResultsView(vm: QuizResultVm) -> Element {
    rsx! {
        Layout { title: "Results".to_string(), signed_in: true,
            div { class: "card",
                h2 { "Quiz complete!" }
                {grade_line(vm.grade_label)}
                p { class: "stat", "Score: {vm.score} / {vm.total}" }
                p {
                    a { href: "/choose_quiz", "Try another quiz" }
                    " · "
                    a { href: "/dashboard", "Back to dashboard" }
                }
            }
        }
    }
}

fn grade_line(label: Option<&'static str>) -> Element {
    match label {
        Some(grade) => rsx! {
            p { "Grade: {grade}" }
        },
        None => rsx! {},
    }
}
