//! Completion modal.
//!
//! - view_model.rs: completion form state and submit command
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::CompleteWorkOrderModal;
pub use view_model::CompletionViewModel;
