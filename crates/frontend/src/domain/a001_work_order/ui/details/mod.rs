//! Work order create/edit form and read-only summary.
//!
//! The form has no state of its own: every input reads from and writes to
//! the store's form, so create and edit share one submit path.

mod form;
mod summary;

pub use form::{WorkOrderForm, WorkOrderFormModal};
pub use summary::WorkOrderSummaryModal;
