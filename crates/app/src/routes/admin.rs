use crate::auth::use_profile;
use crate::routes::PageError;
use crate::use_services;
use backend::pages::load_admin_overview;
use dioxus::prelude::*;
use shared_types::{Icon, Tone};
use shared_ui::theme::role_chip_class;
use shared_ui::{Card, CardContent, CardHeader, CardTitle, LoadingState, PageDescription, PageHeader, PageTitle, StatCard};

/// Every profile with per-role counts.
#[component]
pub fn Admin() -> Element {
    let services = use_services();
    let profile = use_profile();

    let overview = use_resource(move || {
        let store = services.store.clone();
        let profile = profile.clone();
        async move { load_admin_overview(store.as_ref(), &profile).await }
    });

    let result = overview.read().as_ref().cloned();

    rsx! {
        div { class: "page",
            PageHeader {
                div {
                    PageTitle { "Admin Panel" }
                    PageDescription { "Accounts across the school" }
                }
            }

            match result {
                None => rsx! { LoadingState { message: "Loading accounts..." } },
                Some(Err(error)) => rsx! { PageError { error } },
                Some(Ok(overview)) => rsx! {
                    div { class: "stats-grid",
                        StatCard {
                            title: "Students",
                            value: overview.counts.students.to_string(),
                            description: "Student accounts",
                            icon: Icon::Users,
                            tone: Tone::Student,
                        }
                        StatCard {
                            title: "Teachers",
                            value: overview.counts.teachers.to_string(),
                            description: "Teacher accounts",
                            icon: Icon::UserCheck,
                            tone: Tone::Teacher,
                        }
                        StatCard {
                            title: "Admins",
                            value: overview.counts.admins.to_string(),
                            description: "Administrator accounts",
                            icon: Icon::Settings,
                            tone: Tone::Admin,
                        }
                    }

                    Card {
                        CardHeader {
                            CardTitle { "All accounts ({overview.counts.total()})" }
                        }
                        CardContent {
                            table { class: "data-table",
                                thead {
                                    tr {
                                        th { "Name" }
                                        th { "Email" }
                                        th { "Role" }
                                    }
                                }
                                tbody {
                                    for account in overview.profiles.rows().iter() {
                                        tr { key: "{account.id}",
                                            td { "{account.name}" }
                                            td { "{account.email}" }
                                            td {
                                                span { class: role_chip_class(account.role()),
                                                    {account.role().map(|r| r.label()).unwrap_or(account.raw_role.as_str())}
                                                }
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
