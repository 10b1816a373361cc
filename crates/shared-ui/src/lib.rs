//! Small component kit shared by the app's pages.

pub mod components;
pub mod icons;
pub mod theme;

pub use components::*;
pub use icons::AppIcon;
