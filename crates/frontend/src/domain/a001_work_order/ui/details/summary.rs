use crate::shared::components::ui::{PriorityBadge, StatusBadge};
use crate::shared::date_utils::{format_date, format_datetime_opt};
use crate::shared::modal::Modal;
use contracts::domain::a001_work_order::WorkOrder;
use leptos::prelude::*;

/// Read-only view of a work order with its completion data and history
#[component]
pub fn WorkOrderSummaryModal(
    work_order: WorkOrder,
    /// Installation label resolved by the page
    installation: String,
    on_close: Callback<()>,
) -> impl IntoView {
    let wo = work_order;
    let scheduled = match (&wo.scheduled_date, &wo.scheduled_time) {
        (Some(d), Some(t)) => format!("{} {}", format_date(d), t),
        (Some(d), None) => format_date(d),
        _ => "-".to_string(),
    };
    let device = wo
        .device_id
        .as_ref()
        .map(|d| d.as_id().to_string())
        .unwrap_or_else(|| "-".to_string());
    let technician = wo
        .technician_name()
        .map(str::to_string)
        .or_else(|| wo.assigned_technician.as_ref().map(|t| t.id().to_string()))
        .unwrap_or_else(|| "Sin asignar".to_string());

    let completion = wo.status.is_terminal().then(|| wo.completion.clone());
    let history = wo.history.clone();

    view! {
        <Modal title=wo.title.clone() on_close=on_close modal_class="work-order-summary">
            <div class="summary-grid">
                <div class="summary-grid__label">"Estado"</div>
                <div><StatusBadge status=wo.status /></div>
                <div class="summary-grid__label">"Prioridad"</div>
                <div><PriorityBadge priority=wo.priority /></div>
                <div class="summary-grid__label">"Tipo de trabajo"</div>
                <div>{wo.work_type.display_name()}</div>
                <div class="summary-grid__label">"Instalación"</div>
                <div>{installation}</div>
                <div class="summary-grid__label">"Dispositivo"</div>
                <div>{device}</div>
                <div class="summary-grid__label">"Programada"</div>
                <div>{scheduled}</div>
                <div class="summary-grid__label">"Técnico"</div>
                <div>{technician}</div>
                <div class="summary-grid__label">"Creada"</div>
                <div>{format_datetime_opt(wo.metadata.created_at.as_ref())}</div>
                <div class="summary-grid__label">"Iniciada"</div>
                <div>{format_datetime_opt(wo.started_at.as_ref())}</div>
            </div>

            <p class="summary__description">{wo.description.clone()}</p>

            {completion.filter(|c| c.work_performed.is_some()).map(|c| view! {
                <section class="summary__section">
                    <h3>"Cierre"</h3>
                    <div class="summary-grid">
                        <div class="summary-grid__label">"Completada"</div>
                        <div>{format_datetime_opt(c.completed_at.as_ref())}</div>
                        <div class="summary-grid__label">"Trabajo realizado"</div>
                        <div>{c.work_performed.clone().unwrap_or_default()}</div>
                        <div class="summary-grid__label">"Horas"</div>
                        <div>{c.time_spent.map(|h| format!("{:.1}", h)).unwrap_or_else(|| "-".into())}</div>
                        <div class="summary-grid__label">"Estado del dispositivo"</div>
                        <div>{c.device_state_after.map(|s| s.display_name()).unwrap_or("-")}</div>
                        <div class="summary-grid__label">"Observaciones"</div>
                        <div>{c.observations.clone().unwrap_or_else(|| "-".into())}</div>
                        <div class="summary-grid__label">"Materiales"</div>
                        <div>
                            {if c.materials_used.is_empty() {
                                "-".to_string()
                            } else {
                                c.materials_used.join(", ")
                            }}
                        </div>
                    </div>
                </section>
            })}

            {(!history.is_empty()).then(|| view! {
                <section class="summary__section">
                    <h3>"Historial"</h3>
                    <ul class="history-list">
                        {history.iter().map(|entry| view! {
                            <li class="history-list__item">
                                <span class="history-list__date">{format_datetime_opt(entry.timestamp.as_ref())}</span>
                                <span class="history-list__action">{entry.action.clone()}</span>
                                {entry.user.clone().map(|u| view! { <span class="history-list__user">{u}</span> })}
                                {entry.note.clone().map(|n| view! { <span class="history-list__note">{n}</span> })}
                            </li>
                        }).collect_view()}
                    </ul>
                </section>
            })}
        </Modal>
    }
}
