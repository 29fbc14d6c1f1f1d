use crate::domain::a001_work_order::store::WorkOrderStore;
use crate::shared::api_utils::ApiContext;
use crate::shared::cancel::CancelToken;
use crate::shared::state::{FormState, MSG_BUSY, MSG_INVALID_FORM};
use contracts::domain::a001_work_order::{CompletionDraft, CompletionField};
use leptos::prelude::*;

/// ViewModel for the completion form
#[derive(Clone, Copy)]
pub struct CompletionViewModel {
    pub form: RwSignal<FormState<CompletionDraft>>,
    pub error: RwSignal<Option<String>>,
}

impl Default for CompletionViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(FormState::default()),
            error: RwSignal::new(None),
        }
    }

    pub fn change(&self, field: CompletionField, value: &str) {
        self.form.update(|f| f.change(field, value));
    }

    pub fn touch(&self, field: CompletionField) {
        self.form.update(|f| f.touch(field));
    }

    pub fn visible_error(&self, field: CompletionField) -> Option<String> {
        self.form.with(|f| f.visible_error(field))
    }

    pub fn submitting(&self) -> bool {
        self.form.with(|f| f.submitting)
    }

    /// Validate, then complete through the store.
    ///
    /// Invalid input stays local and yields `MSG_INVALID_FORM`.
    pub async fn submit_command(
        &self,
        store: WorkOrderStore,
        ctx: &ApiContext,
        work_order_id: &str,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let (draft, busy) = self
            .form
            .with_untracked(|f| (f.draft.clone(), f.submitting));
        if busy {
            return Err(MSG_BUSY.to_string());
        }
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(validation) => {
                self.form.update(|f| f.apply_validation(validation));
                return Err(MSG_INVALID_FORM.to_string());
            }
        };

        self.form.update(|f| f.submitting = true);
        self.error.set(None);
        let result = store
            .complete_work_order(ctx, work_order_id, &payload, cancel)
            .await;
        if cancel.is_cancelled() {
            return result;
        }
        if let Err(e) = &result {
            log::error!("completing work order {} failed: {}", work_order_id, e);
            let _ = self.form.try_update(|f| f.submitting = false);
            let _ = self.error.try_set(Some(e.clone()));
        }
        result
    }
}
