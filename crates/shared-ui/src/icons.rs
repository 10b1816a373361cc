use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{
    LdCalendar, LdFileText, LdGraduationCap, LdQrCode, LdSettings, LdUserCheck, LdUsers,
};
use dioxus_free_icons::Icon as LucideIcon;
use shared_types::Icon;

/// Renders one of the icons named by the navigation and card tables.
#[component]
pub fn AppIcon(icon: Icon, #[props(default = 16)] size: u32) -> Element {
    match icon {
        Icon::GraduationCap => rsx! { LucideIcon { icon: LdGraduationCap, width: size, height: size } },
        Icon::Users => rsx! { LucideIcon { icon: LdUsers, width: size, height: size } },
        Icon::FileText => rsx! { LucideIcon { icon: LdFileText, width: size, height: size } },
        Icon::Calendar => rsx! { LucideIcon { icon: LdCalendar, width: size, height: size } },
        Icon::QrCode => rsx! { LucideIcon { icon: LdQrCode, width: size, height: size } },
        Icon::UserCheck => rsx! { LucideIcon { icon: LdUserCheck, width: size, height: size } },
        Icon::Settings => rsx! { LucideIcon { icon: LdSettings, width: size, height: size } },
    }
}
