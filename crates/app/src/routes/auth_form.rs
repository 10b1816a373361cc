use crate::auth::page_origin;
use crate::use_services;
use backend::submit_auth;
use dioxus::prelude::*;
use shared_types::{AuthFormState, FeatureFlags, Icon, Role, PASSWORD_MIN_LEN};
use shared_ui::{
    use_toast, AppIcon, Button, Card, CardContent, CardDescription, CardHeader, CardTitle, Input,
    Label,
};

/// Sign-in / sign-up card shown to signed-out visitors on every route.
#[component]
pub fn AuthForm() -> Element {
    let services = use_services();
    let flags: FeatureFlags = use_context();
    let mut toasts = use_toast();
    let mut form = use_signal(AuthFormState::default);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if form.peek().submitting {
            return;
        }
        let mut draft = form.peek().clone();
        form.write().submitting = true;

        let auth = services.auth.clone();
        spawn(async move {
            let origin = page_origin().await;
            let notice = submit_auth(auth.as_ref(), &mut draft, &origin).await;
            form.with_mut(|f| {
                f.mode = draft.mode;
                f.submitting = draft.submitting;
            });
            if let Some(notice) = notice {
                toasts.notify(&notice);
            }
        });
    };

    let state = form.read().clone();
    let can_toggle = flags.self_signup || state.shows_profile_fields();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth_form.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    div { class: "auth-logo",
                        AppIcon { icon: Icon::GraduationCap, size: 32 }
                    }
                    CardTitle { "Smart Class" }
                    CardDescription { "{state.subtitle()}" }
                }

                CardContent {
                    form { class: "auth-fields", onsubmit: handle_submit,
                        if state.shows_profile_fields() {
                            div { class: "auth-field",
                                Label { html_for: "name", "Full Name" }
                                Input {
                                    id: "name",
                                    value: state.name.clone(),
                                    placeholder: "Enter your full name",
                                    required: true,
                                    disabled: state.submitting,
                                    oninput: move |e: FormEvent| form.write().name = e.value(),
                                }
                            }
                            div { class: "auth-field",
                                Label { html_for: "role", "Role" }
                                select {
                                    id: "role",
                                    class: "select",
                                    disabled: state.submitting,
                                    value: state.role.as_str(),
                                    onchange: move |e: FormEvent| {
                                        if let Some(role) = Role::parse(&e.value()) {
                                            form.write().role = role;
                                        }
                                    },
                                    for role in Role::ALL {
                                        option { value: role.as_str(), "{role.label()}" }
                                    }
                                }
                            }
                        }

                        div { class: "auth-field",
                            Label { html_for: "email", "Email" }
                            Input {
                                id: "email",
                                kind: "email",
                                value: state.email.clone(),
                                placeholder: "Enter your email",
                                required: true,
                                disabled: state.submitting,
                                oninput: move |e: FormEvent| form.write().email = e.value(),
                            }
                        }

                        div { class: "auth-field",
                            Label { html_for: "password", "Password" }
                            Input {
                                id: "password",
                                kind: "password",
                                value: state.password.clone(),
                                placeholder: "Enter your password",
                                required: true,
                                minlength: PASSWORD_MIN_LEN,
                                disabled: state.submitting,
                                oninput: move |e: FormEvent| form.write().password = e.value(),
                            }
                        }

                        Button { submit: true, class: "auth-submit", disabled: state.submitting,
                            if state.submitting { "Please wait..." } else { "{state.submit_label()}" }
                        }
                    }

                    if can_toggle {
                        button {
                            class: "auth-toggle",
                            r#type: "button",
                            disabled: state.submitting,
                            onclick: move |_| form.write().toggle_mode(),
                            "{state.toggle_prompt()}"
                        }
                    }
                }
            }
        }
    }
}
