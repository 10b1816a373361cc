use crate::auth::use_profile;
use crate::format_helpers::{format_date_human, format_marks};
use crate::routes::PageError;
use crate::use_services;
use backend::pages::{load_tests, TestsView};
use shared_types::TestResult;
use dioxus::prelude::*;
use shared_ui::{
    Badge, BadgeVariant, Card, CardContent, LoadingState, PageDescription, PageHeader, PageTitle,
};

/// Test results for students, authored tests for teachers, all tests for admins.
#[component]
pub fn Tests() -> Element {
    let services = use_services();
    let profile = use_profile();
    let is_student = profile.role() == Some(shared_types::Role::Student);

    let tests = use_resource(move || {
        let store = services.store.clone();
        let profile = profile.clone();
        async move { load_tests(store.as_ref(), &profile).await }
    });

    let result = tests.read().as_ref().cloned();

    rsx! {
        div { class: "page",
            PageHeader {
                div {
                    PageTitle { if is_student { "My Tests" } else { "Tests" } }
                    PageDescription {
                        if is_student { "Your marks across all tests" } else { "Tests and their schedules" }
                    }
                }
            }

            match result {
                None => rsx! { LoadingState { message: "Loading tests..." } },
                Some(Err(error)) => rsx! { PageError { error } },
                Some(Ok(TestsView::Results(results))) => rsx! {
                    Card {
                        CardContent {
                            if results.is_empty() {
                                p { class: "muted-text", "No test results yet" }
                            } else {
                                table { class: "data-table",
                                    thead {
                                        tr {
                                            th { "Test" }
                                            th { "Subject" }
                                            th { "Date" }
                                            th { "Marks" }
                                            th { "Score" }
                                        }
                                    }
                                    tbody {
                                        for result in results.rows().iter() {
                                            ResultRow { key: "{result.id}", result: result.clone() }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Ok(TestsView::Authored(tests))) => rsx! {
                    Card {
                        CardContent {
                            if tests.is_empty() {
                                p { class: "muted-text", "No tests created yet" }
                            } else {
                                table { class: "data-table",
                                    thead {
                                        tr {
                                            th { "Test" }
                                            th { "Subject" }
                                            th { "Date" }
                                            th { "Total Marks" }
                                        }
                                    }
                                    tbody {
                                        for test in tests.rows().iter() {
                                            tr { key: "{test.id}",
                                                td { "{test.test_name}" }
                                                td { "{test.subject}" }
                                                td { "{format_date_human(&test.test_date)}" }
                                                td { "{test.total_marks}" }
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

#[component]
fn ResultRow(result: TestResult) -> Element {
    let test = result.tests.clone().unwrap_or_default();
    rsx! {
        tr {
            td { "{test.test_name}" }
            td { "{test.subject}" }
            td { "{format_date_human(&test.test_date)}" }
            td { "{format_marks(result.marks_obtained, test.total_marks)}" }
            td {
                match result.percentage() {
                    Some(pct) => rsx! {
                        Badge { variant: score_variant(pct), "{pct}%" }
                    },
                    None => rsx! { "-" },
                }
            }
        }
    }
}

fn score_variant(percentage: u32) -> BadgeVariant {
    match percentage {
        75.. => BadgeVariant::Primary,
        40..=74 => BadgeVariant::Secondary,
        _ => BadgeVariant::Destructive,
    }
}
