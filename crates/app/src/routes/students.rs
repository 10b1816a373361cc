use crate::auth::use_profile;
use crate::routes::PageError;
use crate::use_services;
use backend::pages::load_students;
use dioxus::prelude::*;
use shared_ui::{Card, CardContent, LoadingState, PageDescription, PageHeader, PageTitle};

/// Enrolled students, ordered by enrollment number.
#[component]
pub fn Students() -> Element {
    let services = use_services();
    let profile = use_profile();

    let roster = use_resource(move || {
        let store = services.store.clone();
        let profile = profile.clone();
        async move { load_students(store.as_ref(), &profile).await }
    });

    let result = roster.read().as_ref().cloned();

    rsx! {
        div { class: "page",
            PageHeader {
                div {
                    PageTitle { "Students" }
                    PageDescription { "Everyone enrolled across all classes" }
                }
            }

            match result {
                None => rsx! { LoadingState { message: "Loading students..." } },
                Some(Err(error)) => rsx! { PageError { error } },
                Some(Ok(students)) => rsx! {
                    Card {
                        CardContent {
                            if students.is_empty() {
                                p { class: "muted-text", "No students found" }
                            } else {
                                table { class: "data-table",
                                    thead {
                                        tr {
                                            th { "Enrollment #" }
                                            th { "Class" }
                                            th { "Section" }
                                        }
                                    }
                                    tbody {
                                        for student in students.rows().iter() {
                                            tr { key: "{student.id}",
                                                td { "{student.enrollment_number}" }
                                                td { "{student.class}" }
                                                td { "{student.section}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
