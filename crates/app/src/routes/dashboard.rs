use crate::auth::use_profile;
use crate::format_helpers::{current_hour, format_date_human};
use crate::routes::route_for;
use crate::use_services;
use backend::{fetch_dashboard, DashboardGuard};
use dioxus::prelude::*;
use shared_types::{
    cards_for_raw, greeting_for_hour, quick_actions_for, welcome_subtitle, AppPath,
    DashboardSummary, FeatureFlags, Icon,
};
use shared_ui::{
    AppIcon, Badge, BadgeVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    PageDescription, PageHeader, PageTitle, Skeleton, StatCard,
};

/// Role-specific overview: greeting, stat cards, quick actions and lists.
#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let profile = use_profile();
    let flags: FeatureFlags = use_context();
    let mut guard = use_signal(DashboardGuard::new);
    let mut summary = use_signal(|| None::<DashboardSummary>);

    let load_for = profile.clone();
    use_hook(move || {
        guard.write().track(load_for.id.clone());
        let store = services.store.clone();
        spawn(async move {
            let fetched = fetch_dashboard(store.as_ref(), &load_for).await;
            if let Some(accepted) = guard.peek().accept(fetched) {
                summary.set(Some(accepted));
            }
        });
    });

    let role = profile.role();
    let cards = cards_for_raw(&profile.raw_role);
    let actions: Vec<_> = role
        .map(quick_actions_for)
        .unwrap_or(&[])
        .iter()
        .filter(|a| a.target != AppPath::QrScan || flags.qr_scan)
        .copied()
        .collect();
    let greeting = greeting_for_hour(current_hour(), &profile.name);
    let loaded = summary.read().clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard-page",
            PageHeader {
                div {
                    PageTitle { "{greeting}" }
                    if let Some(role) = role {
                        PageDescription { "{welcome_subtitle(role)}" }
                    }
                }
                if let Some(role) = role {
                    Badge { variant: BadgeVariant::Outline, class: "role-badge", "{role.dashboard_badge()}" }
                }
            }

            match loaded {
                None => rsx! {
                    div { class: "stats-grid",
                        for i in 0..cards.len() {
                            Card { key: "{i}",
                                CardHeader { Skeleton { class: "skeleton-line" } }
                                CardContent { Skeleton { class: "skeleton-value" } }
                            }
                        }
                    }
                },
                Some(summary) => rsx! {
                    div { class: "stats-grid",
                        for card in cards.iter() {
                            StatCard {
                                key: "{card.title}",
                                title: card.title.to_string(),
                                value: card.value(&summary),
                                description: card.description.to_string(),
                                icon: card.icon,
                                tone: card.tone,
                            }
                        }
                    }

                    div { class: "dashboard-columns",
                        if !actions.is_empty() {
                            Card {
                                CardHeader {
                                    CardTitle { "Quick Actions" }
                                    CardDescription { "Common tasks for your role" }
                                }
                                CardContent {
                                    div { class: "quick-actions",
                                        for action in actions {
                                            Link {
                                                key: "{action.label}",
                                                to: route_for(action.target),
                                                class: "quick-action",
                                                span { class: "quick-action-icon {action.tone.css_class()}",
                                                    AppIcon { icon: action.icon, size: 16 }
                                                }
                                                span { "{action.label}" }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        Card {
                            CardHeader {
                                CardTitle { "Upcoming Events" }
                            }
                            CardContent {
                                if summary.upcoming_events.is_empty() {
                                    p { class: "muted-text", "No upcoming events" }
                                }
                                ul { class: "item-list",
                                    for event in summary.upcoming_events.iter() {
                                        li { key: "{event.id}", class: "item-row",
                                            AppIcon { icon: Icon::Calendar, size: 14 }
                                            span { class: "item-title", "{event.title}" }
                                            span { class: "item-meta", "{format_date_human(&event.event_date)}" }
                                        }
                                    }
                                }
                            }
                        }

                        if !summary.recent_tests.is_empty() {
                            Card {
                                CardHeader {
                                    CardTitle { "Recent Tests" }
                                }
                                CardContent {
                                    ul { class: "item-list",
                                        for test in summary.recent_tests.iter() {
                                            li { key: "{test.id}", class: "item-row",
                                                AppIcon { icon: Icon::FileText, size: 14 }
                                                span { class: "item-title", "{test.test_name}" }
                                                span { class: "item-meta", "{test.subject}" }
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
