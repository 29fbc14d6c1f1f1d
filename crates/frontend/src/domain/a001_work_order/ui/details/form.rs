use crate::domain::a001_work_order::store::WorkOrderStore;
use crate::shared::api_utils::REQUEST_CANCELLED;
use crate::shared::cancel::CancelToken;
use crate::shared::components::ui::{SelectField, TextAreaField, TextField};
use crate::shared::modal::Modal;
use crate::shared::state::MSG_INVALID_FORM;
use crate::system::auth::context::use_api_context;
use contracts::domain::a001_work_order::validation::{DESCRIPTION, TITLE};
use contracts::domain::a001_work_order::WorkOrderField;
use contracts::domain::a002_installation::Installation;
use contracts::domain::common::AggregateRoot;
use contracts::enums::{Priority, WorkType};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Work order fields bound to `store.form`
#[component]
pub fn WorkOrderForm(store: WorkOrderStore) -> impl IntoView {
    let value = move |field: WorkOrderField| {
        Signal::derive(move || store.form.with(|f| f.draft.field_value(field)))
    };
    let error = move |field: WorkOrderField| {
        Signal::derive(move || store.form.with(|f| f.visible_error(field)))
    };
    let on_input = move |field: WorkOrderField| {
        Callback::new(move |v: String| store.handle_field_change(field, &v))
    };
    let on_blur =
        move |field: WorkOrderField| Callback::new(move |_| store.handle_field_blur(field));
    let submitting = Signal::derive(move || store.form.with(|f| f.submitting));

    let installation_options = Signal::derive(move || {
        store.installations.with(|list| {
            list.iter()
                .map(|i| (i.id.clone(), i.label()))
                .collect::<Vec<_>>()
        })
    });

    // Devices of the selected installation
    let device_options = Signal::derive(move || {
        let installation_id = store.form.with(|f| f.draft.installation_id.clone());
        store.installations.with(|list| {
            list.iter()
                .find(|i| i.id == installation_id)
                .map(|i| {
                    i.devices
                        .iter()
                        .map(|d| (d.id.clone(), d.label()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    });
    let no_devices = Signal::derive(move || device_options.with(Vec::is_empty));

    let priority_options = Priority::all()
        .into_iter()
        .map(|p| (p.code().to_string(), p.display_name().to_string()))
        .collect::<Vec<_>>();
    let work_type_options = WorkType::all()
        .into_iter()
        .map(|t| (t.code().to_string(), t.display_name().to_string()))
        .collect::<Vec<_>>();

    view! {
        <div class="details-form work-order-form">
            <TextField
                id="wo-title"
                label="Título"
                required=true
                value=value(WorkOrderField::Title)
                on_input=on_input(WorkOrderField::Title)
                on_blur=on_blur(WorkOrderField::Title)
                error=error(WorkOrderField::Title)
                disabled=submitting
                placeholder="Ej.: Revisión anual de caldera"
            />
            <TextAreaField
                id="wo-description"
                label="Descripción"
                required=true
                rows=4
                max_chars=DESCRIPTION.max_length.unwrap_or_default()
                value=value(WorkOrderField::Description)
                on_input=on_input(WorkOrderField::Description)
                on_blur=on_blur(WorkOrderField::Description)
                error=error(WorkOrderField::Description)
                disabled=submitting
            />
            <div class="form__row">
                <SelectField
                    id="wo-installation"
                    label=Installation::element_name()
                    required=true
                    placeholder="Seleccione una instalación"
                    options=installation_options
                    value=value(WorkOrderField::InstallationId)
                    on_change=on_input(WorkOrderField::InstallationId)
                    error=error(WorkOrderField::InstallationId)
                    disabled=submitting
                />
                <SelectField
                    id="wo-device"
                    label="Dispositivo"
                    placeholder="Sin dispositivo"
                    options=device_options
                    value=value(WorkOrderField::DeviceId)
                    on_change=on_input(WorkOrderField::DeviceId)
                    error=error(WorkOrderField::DeviceId)
                    disabled=Signal::derive(move || submitting.get() || no_devices.get())
                />
            </div>
            <div class="form__row">
                <SelectField
                    id="wo-priority"
                    label="Prioridad"
                    required=true
                    options=priority_options
                    value=value(WorkOrderField::Priority)
                    on_change=on_input(WorkOrderField::Priority)
                    error=error(WorkOrderField::Priority)
                    disabled=submitting
                />
                <SelectField
                    id="wo-work-type"
                    label="Tipo de trabajo"
                    required=true
                    options=work_type_options
                    value=value(WorkOrderField::WorkType)
                    on_change=on_input(WorkOrderField::WorkType)
                    error=error(WorkOrderField::WorkType)
                    disabled=submitting
                />
            </div>
            <div class="form__row">
                <TextField
                    id="wo-date"
                    label="Fecha programada"
                    input_type="date"
                    required=true
                    value=value(WorkOrderField::ScheduledDate)
                    on_input=on_input(WorkOrderField::ScheduledDate)
                    on_blur=on_blur(WorkOrderField::ScheduledDate)
                    error=error(WorkOrderField::ScheduledDate)
                    disabled=submitting
                />
                <TextField
                    id="wo-time"
                    label="Hora programada"
                    input_type="time"
                    value=value(WorkOrderField::ScheduledTime)
                    on_input=on_input(WorkOrderField::ScheduledTime)
                    on_blur=on_blur(WorkOrderField::ScheduledTime)
                    error=error(WorkOrderField::ScheduledTime)
                    disabled=submitting
                />
            </div>
            <Show when=move || store.installations.with(Vec::is_empty)>
                <p class="form__hint">
                    {format!("Cargando {}...", Installation::list_name().to_lowercase())}
                </p>
            </Show>
            <p class="form__hint">
                {format!(
                    "El título debe tener entre {} y {} caracteres.",
                    TITLE.min_length.unwrap_or_default(),
                    TITLE.max_length.unwrap_or_default()
                )}
            </p>
        </div>
    }
}

/// Create/edit modal. Whether it creates or updates is decided by the
/// draft's id, set beforehand through `set_form_values` or `reset_form`.
#[component]
pub fn WorkOrderFormModal(
    store: WorkOrderStore,
    /// Page-scoped token; the request outlives the modal
    cancel: StoredValue<CancelToken, LocalStorage>,
    on_close: Callback<()>,
    /// Called with the success message after the list was updated
    on_saved: Callback<&'static str>,
) -> impl IntoView {
    let submit_error = RwSignal::new(None::<String>);
    let submitting = Signal::derive(move || store.form.with(|f| f.submitting));
    let title = Signal::derive(move || {
        if store.form.with(|f| f.draft.is_edit_mode()) {
            "Editar orden de trabajo".to_string()
        } else {
            "Nueva orden de trabajo".to_string()
        }
    });

    let submit = move || {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        submit_error.set(None);
        spawn_local(async move {
            match store.handle_submit_form(&ctx, &cancel).await {
                Ok(message) => on_saved.run(message),
                // field errors are already shown inline
                Err(e) if e == MSG_INVALID_FORM || e == REQUEST_CANCELLED => {}
                Err(e) => {
                    let _ = submit_error.try_set(Some(e));
                }
            }
        });
    };

    view! {
        <Modal
            title=title
            on_close=on_close
            modal_class="work-order-modal"
            footer=move || view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=submitting
                >
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| submit()
                    disabled=submitting
                >
                    {move || if submitting.get() { "Guardando..." } else { "Guardar" }}
                </Button>
            }
        >
            {move || submit_error.get().map(|e| view! { <div class="error">{e}</div> })}
            <WorkOrderForm store=store />
        </Modal>
    }
}
