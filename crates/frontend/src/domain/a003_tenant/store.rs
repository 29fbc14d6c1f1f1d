//! Tenant store: list + form, same contract as the work order store.

use super::api;
use crate::shared::api_utils::{ApiContext, REQUEST_CANCELLED};
use crate::shared::cancel::CancelToken;
use crate::shared::state::{FormState, ListState, MSG_BUSY, MSG_INVALID_FORM};
use contracts::domain::a003_tenant::{Tenant, TenantDraft, TenantField, TenantPayload};
use leptos::prelude::*;

pub const MSG_CREATED: &str = "Cliente creado correctamente";
pub const MSG_UPDATED: &str = "Cliente actualizado correctamente";
pub const MSG_DELETED: &str = "Cliente eliminado correctamente";

#[derive(Clone, Copy)]
pub struct TenantStore {
    pub list: RwSignal<ListState<Tenant>>,
    pub form: RwSignal<FormState<TenantDraft>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl Default for TenantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TenantStore {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(ListState::default()),
            form: RwSignal::new(FormState::default()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    fn commit(
        &self,
        cancel: &CancelToken,
        change: impl FnOnce(&mut ListState<Tenant>),
    ) -> Result<(), String> {
        if cancel.is_cancelled() {
            return Err(REQUEST_CANCELLED.to_string());
        }
        self.list.update(change);
        Ok(())
    }

    pub async fn load_tenants(&self, ctx: &ApiContext, cancel: &CancelToken) {
        self.loading.set(true);
        let result = api::fetch_tenants(ctx, cancel).await;
        if cancel.is_cancelled() {
            return;
        }
        match result {
            Ok(items) => {
                self.list.update(|list| list.replace_all(items));
                self.error.set(None);
            }
            Err(e) => {
                log::error!("failed to load tenants: {}", e);
                self.error.set(Some(e));
            }
        }
        self.loading.set(false);
    }

    pub async fn add_tenant(
        &self,
        ctx: &ApiContext,
        payload: &TenantPayload,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let created = api::create_tenant(ctx, payload, cancel).await?;
        log::debug!("tenant {} created", created.id);
        self.commit(cancel, |list| list.prepend(created))?;
        Ok(MSG_CREATED)
    }

    pub async fn edit_tenant(
        &self,
        ctx: &ApiContext,
        id: &str,
        payload: &TenantPayload,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let updated = api::update_tenant(ctx, id, payload, cancel).await?;
        self.commit(cancel, |list| {
            list.replace(updated);
        })?;
        Ok(MSG_UPDATED)
    }

    pub async fn remove_tenant(
        &self,
        ctx: &ApiContext,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        api::delete_tenant(ctx, id, cancel).await?;
        self.commit(cancel, |list| list.remove(id))?;
        Ok(MSG_DELETED)
    }

    pub fn set_form_values(&self, record: &Tenant) {
        self.form.update(|form| form.load(TenantDraft::from_record(record)));
    }

    pub fn handle_field_change(&self, field: TenantField, value: &str) {
        self.form.update(|form| form.change(field, value));
    }

    pub fn handle_field_blur(&self, field: TenantField) {
        self.form.update(|form| form.touch(field));
    }

    pub fn reset_form(&self) {
        self.form.update(|form| form.reset());
    }

    fn begin_submit(&self) -> Result<(Option<String>, TenantPayload), String> {
        let (draft, busy) = self
            .form
            .with_untracked(|form| (form.draft.clone(), form.submitting));
        if busy {
            return Err(MSG_BUSY.to_string());
        }
        match draft.to_payload() {
            Ok(payload) => {
                self.form.update(|form| form.submitting = true);
                Ok((draft.id, payload))
            }
            Err(validation) => {
                self.form.update(|form| form.apply_validation(validation));
                Err(MSG_INVALID_FORM.to_string())
            }
        }
    }

    /// Validate, then create or update depending on the draft's id
    pub async fn handle_submit_form(
        &self,
        ctx: &ApiContext,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let (id, payload) = self.begin_submit()?;
        let result = match &id {
            Some(id) => self.edit_tenant(ctx, id, &payload, cancel).await,
            None => self.add_tenant(ctx, &payload, cancel).await,
        };
        if cancel.is_cancelled() {
            return result;
        }
        match &result {
            Ok(_) => self.reset_form(),
            Err(e) => {
                log::error!("tenant submit failed: {}", e);
                self.form.update(|form| form.submitting = false);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: &str) -> Tenant {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "nombre": "Acme",
            "email": "ops@acme.com",
        }))
        .unwrap()
    }

    #[test]
    fn test_remove_after_unmount_keeps_row() {
        let owner = Owner::new();
        owner.set();
        let store = TenantStore::new();
        store.list.set(ListState::new(vec![tenant("t1")]));
        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome = store.commit(&cancel, |list| list.remove("t1"));

        assert_eq!(outcome, Err(REQUEST_CANCELLED.to_string()));
        assert_eq!(store.list.with_untracked(|l| l.items().len()), 1);
    }

    #[test]
    fn test_busy_form_rejects_submit() {
        let owner = Owner::new();
        owner.set();
        let store = TenantStore::new();
        store.form.update(|f| f.submitting = true);
        assert_eq!(store.begin_submit().err(), Some(MSG_BUSY.to_string()));
    }
}
