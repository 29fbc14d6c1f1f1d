//! Work order store: the single source of truth for the work order list and
//! the active create/edit draft.
//!
//! Every operation takes the request context and a cancel token explicitly.
//! State is committed only after the request succeeded and only while the
//! token is not cancelled.

use super::api;
use crate::domain::a002_installation::api as installation_api;
use crate::shared::api_utils::{ApiContext, REQUEST_CANCELLED};
use crate::shared::cancel::CancelToken;
use crate::shared::state::{FormState, ListState, MSG_BUSY, MSG_INVALID_FORM};
use crate::system::users::api as users_api;
use chrono::Utc;
use contracts::domain::a001_work_order::{
    AssignTechnicianPayload, CompletionPayload, WorkOrder, WorkOrderDraft, WorkOrderField,
    WorkOrderPayload,
};
use contracts::domain::a002_installation::Installation;
use contracts::system::users::Technician;
use leptos::prelude::*;

pub const MSG_CREATED: &str = "Orden de trabajo creada correctamente";
pub const MSG_UPDATED: &str = "Orden de trabajo actualizada correctamente";
pub const MSG_DELETED: &str = "Orden de trabajo eliminada correctamente";
pub const MSG_ASSIGNED: &str = "Técnico asignado correctamente";
pub const MSG_STARTED: &str = "Orden de trabajo iniciada";
pub const MSG_COMPLETED: &str = "Orden de trabajo completada correctamente";
pub const MSG_CANCELLED: &str = "Orden de trabajo cancelada";

#[derive(Clone, Copy)]
pub struct WorkOrderStore {
    pub list: RwSignal<ListState<WorkOrder>>,
    pub form: RwSignal<FormState<WorkOrderDraft>>,
    pub installations: RwSignal<Vec<Installation>>,
    pub technicians: RwSignal<Vec<Technician>>,
    /// Set once installations arrived; editing reconciles against them
    pub reference_loaded: RwSignal<bool>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl Default for WorkOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkOrderStore {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(ListState::default()),
            form: RwSignal::new(FormState::default()),
            installations: RwSignal::new(Vec::new()),
            technicians: RwSignal::new(Vec::new()),
            reference_loaded: RwSignal::new(false),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Apply a list change unless the caller went away while the request ran
    fn commit(
        &self,
        cancel: &CancelToken,
        change: impl FnOnce(&mut ListState<WorkOrder>),
    ) -> Result<(), String> {
        if cancel.is_cancelled() {
            return Err(REQUEST_CANCELLED.to_string());
        }
        self.list.update(change);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Replace the list with the server's. On failure the previous list
    /// stays visible and the error is kept for the page banner.
    pub async fn load_work_orders(&self, ctx: &ApiContext, cancel: &CancelToken) {
        self.loading.set(true);
        let result = api::fetch_work_orders(ctx, cancel).await;
        if cancel.is_cancelled() {
            return;
        }
        match result {
            Ok(items) => {
                log::debug!("loaded {} work orders", items.len());
                self.list.update(|list| list.replace_all(items));
                self.error.set(None);
            }
            Err(e) => {
                log::error!("failed to load work orders: {}", e);
                self.error.set(Some(e));
            }
        }
        self.loading.set(false);
    }

    /// Installations and technicians for the form and assign dropdowns
    pub async fn load_reference_data(&self, ctx: &ApiContext, cancel: &CancelToken) {
        let installations = installation_api::fetch_installations(ctx, cancel).await;
        let technicians = users_api::fetch_technicians(ctx, cancel).await;
        if cancel.is_cancelled() {
            return;
        }
        match installations {
            Ok(items) => {
                self.installations.set(items);
                self.reference_loaded.set(true);
            }
            Err(e) => log::error!("failed to load installations: {}", e),
        }
        match technicians {
            Ok(items) => self.technicians.set(items),
            Err(e) => log::error!("failed to load technicians: {}", e),
        }
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    pub async fn add_work_order(
        &self,
        ctx: &ApiContext,
        payload: &WorkOrderPayload,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let created = api::create_work_order(ctx, payload, cancel).await?;
        log::debug!("work order {} created", created.id);
        self.commit(cancel, |list| list.prepend(created))?;
        Ok(MSG_CREATED)
    }

    pub async fn edit_work_order(
        &self,
        ctx: &ApiContext,
        id: &str,
        payload: &WorkOrderPayload,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let updated = api::update_work_order(ctx, id, payload, cancel).await?;
        self.commit(cancel, |list| {
            list.replace(updated);
        })?;
        Ok(MSG_UPDATED)
    }

    pub async fn remove_work_order(
        &self,
        ctx: &ApiContext,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        api::delete_work_order(ctx, id, cancel).await?;
        self.commit(cancel, |list| list.remove(id))?;
        Ok(MSG_DELETED)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// The server answers with the populated work order, which replaces the
    /// local copy so the technician name is current.
    pub async fn assign_technician(
        &self,
        ctx: &ApiContext,
        work_order_id: &str,
        technician_id: &str,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let payload = AssignTechnicianPayload {
            technician_id: technician_id.to_string(),
        };
        let updated = api::assign_technician(ctx, work_order_id, &payload, cancel).await?;
        self.commit(cancel, |list| {
            list.replace(updated);
        })?;
        Ok(MSG_ASSIGNED)
    }

    pub async fn start_work_order(
        &self,
        ctx: &ApiContext,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let response = api::start_work_order(ctx, id, cancel).await?;
        let now = Utc::now();
        self.commit(cancel, |list| {
            list.update(id, |wo| wo.apply_start(now, response));
        })?;
        Ok(MSG_STARTED)
    }

    pub async fn complete_work_order(
        &self,
        ctx: &ApiContext,
        id: &str,
        payload: &CompletionPayload,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let response = api::complete_work_order(ctx, id, payload, cancel).await?;
        let submitted = payload.to_details();
        let now = Utc::now();
        self.commit(cancel, |list| {
            list.update(id, |wo| wo.apply_completion(&submitted, response, now));
        })?;
        Ok(MSG_COMPLETED)
    }

    pub async fn cancel_work_order(
        &self,
        ctx: &ApiContext,
        id: &str,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let response = api::cancel_work_order(ctx, id, cancel).await?;
        self.commit(cancel, |list| {
            list.update(id, |wo| wo.apply_cancel(response));
        })?;
        Ok(MSG_CANCELLED)
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    /// Load a server record into the draft, reconciling its installation
    /// against `installations`
    pub fn set_form_values(&self, record: &WorkOrder, installations: &[Installation]) {
        let draft = WorkOrderDraft::from_record(record, installations);
        self.form.update(|form| form.load(draft));
    }

    pub fn handle_field_change(&self, field: WorkOrderField, value: &str) {
        self.form.update(|form| form.change(field, value));
    }

    pub fn handle_field_blur(&self, field: WorkOrderField) {
        self.form.update(|form| form.touch(field));
    }

    pub fn reset_form(&self) {
        self.form.update(|form| form.reset());
    }

    /// Synchronous half of a submit: reject a second submit while one is in
    /// flight, validate, then mark the form as submitting.
    ///
    /// An invalid draft never reaches the service layer: the error map is
    /// stored and `MSG_INVALID_FORM` returned.
    fn begin_submit(&self) -> Result<(Option<String>, WorkOrderPayload), String> {
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

    /// Validate the draft and create or update depending on its id
    pub async fn handle_submit_form(
        &self,
        ctx: &ApiContext,
        cancel: &CancelToken,
    ) -> Result<&'static str, String> {
        let (id, payload) = self.begin_submit()?;
        let result = match &id {
            Some(id) => self.edit_work_order(ctx, id, &payload, cancel).await,
            None => self.add_work_order(ctx, &payload, cancel).await,
        };
        if cancel.is_cancelled() {
            return result;
        }

        match &result {
            Ok(_) => self.reset_form(),
            Err(e) => {
                log::error!("work order submit failed: {}", e);
                self.form.update(|form| form.submitting = false);
            }
        }
        result
    }

    // ------------------------------------------------------------------
    // Helpers for the UI
    // ------------------------------------------------------------------

    /// Installation label for a list row: snapshot first, then loaded list
    pub fn installation_label(&self, wo: &WorkOrder) -> String {
        if let Some(company) = wo.installation_company() {
            return company.to_string();
        }
        let id = wo.installation_id_str();
        self.installations
            .with_untracked(|items| items.iter().find(|i| i.id == id).map(|i| i.label()))
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wo(id: &str, title: &str) -> WorkOrder {
        serde_json::from_value(serde_json::json!({ "_id": id, "titulo": title })).unwrap()
    }

    fn store_with(items: Vec<WorkOrder>) -> WorkOrderStore {
        let store = WorkOrderStore::new();
        store.list.set(ListState::new(items));
        store
    }

    fn ids(store: &WorkOrderStore) -> Vec<String> {
        store
            .list
            .with_untracked(|l| l.items().iter().map(|w| w.id.clone()).collect())
    }

    #[test]
    fn test_cancelled_token_leaves_list_untouched() {
        let owner = Owner::new();
        owner.set();
        let store = store_with(vec![wo("a", "uno"), wo("b", "dos")]);
        let cancel = CancelToken::new();
        cancel.cancel();

        let prepend = store.commit(&cancel, |list| list.prepend(wo("c", "tres")));
        let remove = store.commit(&cancel, |list| list.remove("a"));

        assert_eq!(prepend, Err(REQUEST_CANCELLED.to_string()));
        assert_eq!(remove, Err(REQUEST_CANCELLED.to_string()));
        assert_eq!(ids(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_live_token_commits() {
        let owner = Owner::new();
        owner.set();
        let store = store_with(vec![wo("a", "uno")]);
        let cancel = CancelToken::new();

        assert_eq!(store.commit(&cancel, |list| list.prepend(wo("c", "tres"))), Ok(()));
        assert_eq!(ids(&store), vec!["c", "a"]);
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let owner = Owner::new();
        owner.set();
        let store = WorkOrderStore::new();
        store.form.update(|f| f.submitting = true);

        assert_eq!(store.begin_submit().err(), Some(MSG_BUSY.to_string()));
        assert!(store.form.with_untracked(|f| f.submitting));
    }

    #[test]
    fn test_invalid_draft_is_stopped_before_any_request() {
        let owner = Owner::new();
        owner.set();
        let store = WorkOrderStore::new();
        store.handle_field_change(WorkOrderField::Title, "ab");

        assert_eq!(store.begin_submit().err(), Some(MSG_INVALID_FORM.to_string()));
        store.form.with_untracked(|f| {
            assert!(!f.submitting);
            assert!(f.visible_error(WorkOrderField::Title).is_some());
            assert!(f.visible_error(WorkOrderField::InstallationId).is_some());
        });
    }
}
