pub mod admin;
pub mod attendance;
pub mod auth_form;
pub mod dashboard;
pub mod events;
pub mod not_found;
pub mod qr_scan;
pub mod students;
pub mod test_list;

use crate::auth::{sign_out_detached, use_auth};
use crate::use_services;
use auth_form::AuthForm;
use backend::RootView;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLogOut;
use dioxus_free_icons::Icon as LucideIcon;
use shared_types::{
    navigation_for_raw, role_can_visit, AppError, AppPath, FeatureFlags, Icon, Profile, Role,
};
use shared_ui::theme::{role_chip_class, RoleAccent};
use shared_ui::{use_toast, AppIcon, Button, ButtonVariant, Card, CardContent, LoadingState};

use admin::Admin;
use attendance::Attendance;
use dashboard::Dashboard;
use events::Events;
use not_found::NotFound;
use qr_scan::QrScan;
use students::Students;
use test_list::Tests;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(RootGate)]
        #[layout(AppLayout)]
            #[redirect("/", || Route::Dashboard {})]
            #[route("/dashboard")]
            Dashboard {},
            #[route("/students")]
            Students {},
            #[route("/tests")]
            Tests {},
            #[route("/attendance")]
            Attendance {},
            #[route("/events")]
            Events {},
            #[route("/qr-scan")]
            QrScan {},
            #[route("/admin")]
            Admin {},
        #[end_layout]
        #[route("/:..route")]
        NotFound { route: Vec<String> },
}

/// Router target for a navigation path.
pub fn route_for(path: AppPath) -> Route {
    match path {
        AppPath::Dashboard => Route::Dashboard {},
        AppPath::Students => Route::Students {},
        AppPath::Tests => Route::Tests {},
        AppPath::Attendance => Route::Attendance {},
        AppPath::Events => Route::Events {},
        AppPath::QrScan => Route::QrScan {},
        AppPath::Admin => Route::Admin {},
    }
}

/// Navigation path of a route, `None` for the not-found page.
pub fn app_path(route: &Route) -> Option<AppPath> {
    match route {
        Route::Dashboard {} => Some(AppPath::Dashboard),
        Route::Students {} => Some(AppPath::Students),
        Route::Tests {} => Some(AppPath::Tests),
        Route::Attendance {} => Some(AppPath::Attendance),
        Route::Events {} => Some(AppPath::Events),
        Route::QrScan {} => Some(AppPath::QrScan),
        Route::Admin {} => Some(AppPath::Admin),
        Route::NotFound { .. } => None,
    }
}

/// Whether a profile with `role` may open `path` under the current flags.
/// Profiles with an unrecognised role only get the dashboard.
pub fn page_allowed(role: Option<Role>, path: AppPath, flags: &FeatureFlags) -> bool {
    if path == AppPath::QrScan && !flags.qr_scan {
        return false;
    }
    match role {
        Some(role) => role_can_visit(role, path),
        None => path == AppPath::Dashboard,
    }
}

/// Inline error for a page whose data could not be loaded.
#[component]
pub fn PageError(error: AppError) -> Element {
    rsx! {
        Card {
            CardContent {
                p { class: "error-text", "{error.friendly_message()}" }
            }
        }
    }
}

fn nav_class(active: bool) -> String {
    if active {
        "nav-link active".to_string()
    } else {
        "nav-link".to_string()
    }
}

/// Chooses between the auth form, the profile screens and the app.
/// Every route sits below this gate.
#[component]
fn RootGate() -> Element {
    let auth = use_auth();

    match auth.view() {
        RootView::Resolving => rsx! {
            LoadingState { message: "Loading..." }
        },
        RootView::SignedOut => rsx! { AuthForm {} },
        RootView::LoadingProfile => rsx! {
            LoadingState { message: "Loading your profile..." }
        },
        RootView::ProfileMissing => rsx! {
            div { class: "centered-screen",
                div { class: "centered-card",
                    p { class: "error-text", "{backend::view::PROFILE_MISSING_MESSAGE}" }
                }
            }
        },
        RootView::Ready(profile) => rsx! {
            ProfileScope { key: "{profile.id}", profile,
                Outlet::<Route> {}
            }
        },
    }
}

/// Provides the resolved profile to everything below it.
#[component]
fn ProfileScope(profile: Profile, children: Element) -> Element {
    use_context_provider(|| profile.clone());
    rsx! { {children} }
}

/// Sidebar with the role's navigation, profile card and sign-out.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let flags: FeatureFlags = use_context();
    let services = use_services();
    let profile = crate::auth::use_profile();
    let toasts = use_toast();

    let role = profile.role();
    let role_label = role
        .map(|r| r.label().to_string())
        .unwrap_or_else(|| profile.raw_role.clone());
    let items: Vec<_> = navigation_for_raw(&profile.raw_role)
        .iter()
        .filter(|item| item.enabled(&flags))
        .copied()
        .collect();
    let current = app_path(&route);
    let allowed = current.map_or(true, |path| page_allowed(role, path, &flags));

    let sign_out = move |_| sign_out_detached(services.auth.clone(), toasts);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }
        RoleAccent { role }

        div { class: "app-shell",
            aside { class: "sidebar",
                div { class: "sidebar-brand",
                    span { class: "sidebar-brand-icon",
                        AppIcon { icon: Icon::GraduationCap, size: 20 }
                    }
                    div { class: "sidebar-brand-text",
                        span { class: "sidebar-brand-name", "Smart Class" }
                        span { class: role_chip_class(role), "{role_label}" }
                    }
                }

                div { class: "sidebar-profile",
                    div { class: "avatar", "{profile.initial()}" }
                    div { class: "sidebar-profile-text",
                        p { class: "sidebar-profile-name", "{profile.name}" }
                        p { class: "sidebar-profile-email", "{profile.email}" }
                    }
                }

                nav { class: "sidebar-nav",
                    for item in items {
                        Link {
                            key: "{item.label}",
                            to: route_for(item.path),
                            class: nav_class(current == Some(item.path)),
                            AppIcon { icon: item.icon, size: 18 }
                            span { "{item.label}" }
                        }
                    }
                }

                div { class: "sidebar-footer",
                    Button { variant: ButtonVariant::Ghost, class: "sign-out", onclick: sign_out,
                        LucideIcon { icon: LdLogOut, width: 16, height: 16 }
                        "Sign Out"
                    }
                }
            }

            main { class: "app-main",
                if allowed {
                    Outlet::<Route> {}
                } else {
                    Card {
                        CardContent {
                            p { class: "error-text", "You do not have access to this page" }
                            Link { to: Route::Dashboard {}, class: "text-link", "Back to Dashboard" }
                        }
                    }
                }
            }
        }
    }
}
