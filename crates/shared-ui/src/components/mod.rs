pub mod badge;
pub mod button;
pub mod card;
pub mod input;
pub mod label;
pub mod page_header;
pub mod skeleton;
pub mod stat_card;
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use input::*;
pub use label::*;
pub use page_header::*;
pub use skeleton::*;
pub use stat_card::*;
pub use toast::*;

/// Join a component's base class with caller-supplied extras.
pub fn class_list(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|e| !e.is_empty()) {
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}
