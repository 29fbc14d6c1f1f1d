use super::view_model::CompletionViewModel;
use crate::domain::a001_work_order::store::WorkOrderStore;
use crate::shared::cancel::CancelToken;
use crate::shared::components::ui::{SelectField, TextAreaField, TextField};
use crate::shared::modal::Modal;
use crate::system::auth::context::use_api_context;
use contracts::domain::a001_work_order::validation::{OBSERVATIONS, WORK_PERFORMED};
use contracts::domain::a001_work_order::{CompletionField, WorkOrder};
use contracts::enums::DeviceState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Close an in-progress work order with the technician's report
#[component]
pub fn CompleteWorkOrderModal(
    store: WorkOrderStore,
    work_order: WorkOrder,
    cancel: StoredValue<CancelToken, LocalStorage>,
    on_close: Callback<()>,
    on_completed: Callback<&'static str>,
) -> impl IntoView {
    let vm = CompletionViewModel::new();
    let work_order_id = StoredValue::new(work_order.id.clone());

    let error = move |field: CompletionField| Signal::derive(move || vm.visible_error(field));
    let on_input =
        move |field: CompletionField| Callback::new(move |v: String| vm.change(field, &v));
    let on_blur = move |field: CompletionField| Callback::new(move |_| vm.touch(field));
    let submitting = Signal::derive(move || vm.submitting());

    let device_options = DeviceState::all()
        .into_iter()
        .map(|s| (s.code().to_string(), s.display_name().to_string()))
        .collect::<Vec<_>>();

    let submit = move || {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        let id = work_order_id.get_value();
        spawn_local(async move {
            if let Ok(message) = vm.submit_command(store, &ctx, &id, &cancel).await {
                on_completed.run(message);
            }
        });
    };

    view! {
        <Modal
            title=format!("Completar: {}", work_order.title)
            on_close=on_close
            modal_class="complete-modal"
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
                    {move || if submitting.get() { "Guardando..." } else { "Completar" }}
                </Button>
            }
        >
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}
            <div class="details-form">
                <TextAreaField
                    id="completion-work"
                    label="Trabajo realizado"
                    required=true
                    rows=4
                    max_chars=WORK_PERFORMED.max_length.unwrap_or_default()
                    value=Signal::derive(move || vm.form.with(|f| f.draft.work_performed.clone()))
                    on_input=on_input(CompletionField::WorkPerformed)
                    on_blur=on_blur(CompletionField::WorkPerformed)
                    error=error(CompletionField::WorkPerformed)
                    disabled=submitting
                />
                <div class="form__row">
                    <TextField
                        id="completion-hours"
                        label="Horas de trabajo"
                        input_type="text"
                        required=true
                        placeholder="Ej.: 1,5"
                        value=Signal::derive(move || vm.form.with(|f| f.draft.time_spent.clone()))
                        on_input=on_input(CompletionField::TimeSpent)
                        on_blur=on_blur(CompletionField::TimeSpent)
                        error=error(CompletionField::TimeSpent)
                        disabled=submitting
                    />
                    <SelectField
                        id="completion-device-state"
                        label="Estado del dispositivo"
                        required=true
                        placeholder="Seleccione el estado"
                        options=device_options
                        value=Signal::derive(move || {
                            vm.form.with(|f| {
                                f.draft.device_state.map(|s| s.code().to_string()).unwrap_or_default()
                            })
                        })
                        on_change=on_input(CompletionField::DeviceState)
                        error=error(CompletionField::DeviceState)
                        disabled=submitting
                    />
                </div>
                <TextAreaField
                    id="completion-observations"
                    label="Observaciones"
                    rows=3
                    max_chars=OBSERVATIONS.max_length.unwrap_or_default()
                    value=Signal::derive(move || vm.form.with(|f| f.draft.observations.clone()))
                    on_input=on_input(CompletionField::Observations)
                    on_blur=on_blur(CompletionField::Observations)
                    error=error(CompletionField::Observations)
                    disabled=submitting
                />
                <TextAreaField
                    id="completion-materials"
                    label="Materiales utilizados"
                    rows=2
                    placeholder="Separados por coma o en líneas distintas"
                    value=Signal::derive(move || vm.form.with(|f| f.draft.materials.clone()))
                    on_input=on_input(CompletionField::Materials)
                    error=error(CompletionField::Materials)
                    disabled=submitting
                />
            </div>
        </Modal>
    }
}
