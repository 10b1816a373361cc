use crate::components::class_list;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct InputProps {
    #[props(default)]
    pub id: String,
    /// HTML input type.
    #[props(default = "text".to_string())]
    pub kind: String,
    pub value: String,
    #[props(default)]
    pub placeholder: String,
    #[props(default = false)]
    pub required: bool,
    /// Browser-side hint only.
    #[props(default)]
    pub minlength: Option<usize>,
    #[props(default = false)]
    pub disabled: bool,
    #[props(default)]
    pub class: Option<String>,
    pub oninput: EventHandler<FormEvent>,
}

#[component]
pub fn Input(props: InputProps) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        input {
            class: class_list("input", props.class.as_deref()),
            id: "{props.id}",
            r#type: "{props.kind}",
            value: "{props.value}",
            placeholder: "{props.placeholder}",
            required: props.required,
            minlength: props.minlength.map(|n| n.to_string()),
            disabled: props.disabled,
            oninput: move |evt| props.oninput.call(evt),
        }
    }
}
