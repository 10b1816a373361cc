use dioxus::prelude::*;

/// Form label bound to an input id.
#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "label", r#for: "{html_for}", {children} }
    }
}
