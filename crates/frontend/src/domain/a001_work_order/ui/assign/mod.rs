use crate::domain::a001_work_order::store::WorkOrderStore;
use crate::shared::api_utils::REQUEST_CANCELLED;
use crate::shared::cancel::CancelToken;
use crate::shared::components::ui::SelectField;
use crate::shared::modal::Modal;
use crate::system::auth::context::use_api_context;
use contracts::domain::a001_work_order::WorkOrder;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Pick a technician for a pending work order
#[component]
pub fn AssignTechnicianModal(
    store: WorkOrderStore,
    work_order: WorkOrder,
    cancel: StoredValue<CancelToken, LocalStorage>,
    on_close: Callback<()>,
    on_assigned: Callback<&'static str>,
) -> impl IntoView {
    let work_order_id = work_order.id.clone();
    let selected = RwSignal::new(
        work_order
            .assigned_technician
            .as_ref()
            .map(|t| t.id().to_string())
            .unwrap_or_default(),
    );
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let options = Signal::derive(move || {
        store.technicians.with(|list| {
            list.iter()
                .map(|t| (t.id.clone(), t.username.clone()))
                .collect::<Vec<_>>()
        })
    });

    let submit = move |work_order_id: String| {
        let technician_id = selected.get_untracked();
        if technician_id.is_empty() {
            error.set(Some("Debe seleccionar un técnico".to_string()));
            return;
        }
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            let result = store
                .assign_technician(&ctx, &work_order_id, &technician_id, &cancel)
                .await;
            match result {
                Ok(message) => on_assigned.run(message),
                Err(e) if e == REQUEST_CANCELLED => {}
                Err(e) => {
                    let _ = error.try_set(Some(e));
                    let _ = busy.try_set(false);
                }
            }
        });
    };

    let title = format!("Asignar técnico: {}", work_order.title);

    view! {
        <Modal
            title=title
            on_close=on_close
            modal_class="assign-modal"
            footer=move || {
                let work_order_id = work_order_id.clone();
                view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| on_close.run(())
                        disabled=busy
                    >
                        "Cancelar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| submit(work_order_id.clone())
                        disabled=busy
                    >
                        {move || if busy.get() { "Asignando..." } else { "Asignar" }}
                    </Button>
                }
            }
        >
            <SelectField
                id="assign-technician"
                label="Técnico"
                required=true
                placeholder="Seleccione un técnico"
                options=options
                value=selected
                on_change=Callback::new(move |v: String| {
                    selected.set(v);
                    error.set(None);
                })
                error=error
                disabled=busy
            />
            <Show when=move || options.with(Vec::is_empty)>
                <p class="form__hint">"No hay técnicos disponibles."</p>
            </Show>
        </Modal>
    }
}
