pub mod form_state;
pub mod list_state;

pub use form_state::{FormDraft, FormState, MSG_BUSY, MSG_INVALID_FORM};
pub use list_state::ListState;
