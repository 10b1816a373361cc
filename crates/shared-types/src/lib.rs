pub mod auth_form;
pub mod dashboard;
pub mod error;
pub mod feature_flags;
pub mod models;
pub mod navigation;
pub mod records;
pub mod requests;

pub use auth_form::*;
pub use dashboard::*;
pub use error::*;
pub use feature_flags::*;
pub use models::*;
pub use navigation::*;
pub use records::*;
pub use requests::*;
