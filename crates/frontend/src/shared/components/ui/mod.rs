pub mod badge;
pub mod input;
pub mod select;
pub mod textarea;

pub use badge::{Badge, PriorityBadge, StatusBadge};
pub use input::TextField;
pub use select::SelectField;
pub use textarea::TextAreaField;
