use crate::domain::a001_work_order::store::WorkOrderStore;
use crate::domain::a001_work_order::ui::assign::AssignTechnicianModal;
use crate::domain::a001_work_order::ui::complete::CompleteWorkOrderModal;
use crate::domain::a001_work_order::ui::details::{WorkOrderFormModal, WorkOrderSummaryModal};
use crate::shared::api_utils::REQUEST_CANCELLED;
use crate::shared::cancel::CancelToken;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::{PriorityBadge, StatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, filter_list, highlight_matches, paginate, SearchInput, Searchable,
};
use crate::shared::modal::{ConfirmModal, ResultMessage, ResultModal};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::context::{use_api_context, use_auth};
use contracts::domain::a001_work_order::WorkOrder;
use contracts::domain::common::AggregateRoot;
use contracts::enums::WorkOrderStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Editing reconciles the installation against the loaded list, so the
/// action stays hidden until that list has arrived.
fn can_open_edit(status: WorkOrderStatus, manage: bool, reference_loaded: bool) -> bool {
    manage && status.can_edit() && reference_loaded
}

/// Table row: the record plus the installation label resolved for display
#[derive(Clone, Debug, PartialEq)]
pub struct WorkOrderRow {
    pub work_order: WorkOrder,
    pub installation: String,
}

impl Searchable for WorkOrderRow {
    fn matches_filter(&self, filter: &str) -> bool {
        let wo = &self.work_order;
        contains_ci(&wo.title, filter)
            || contains_ci(&wo.description, filter)
            || contains_ci(&self.installation, filter)
            || wo
                .technician_name()
                .map(|t| contains_ci(t, filter))
                .unwrap_or(false)
            || contains_ci(wo.status.display_name(), filter)
    }
}

/// Rows visible under a status filter
pub fn rows_with_status(rows: Vec<WorkOrderRow>, status: Option<WorkOrderStatus>) -> Vec<WorkOrderRow> {
    match status {
        None => rows,
        Some(status) => rows
            .into_iter()
            .filter(|r| r.work_order.status == status)
            .collect(),
    }
}

/// Which modal the page shows
#[derive(Clone, Debug, PartialEq)]
enum ActiveModal {
    None,
    Form,
    Summary(WorkOrderRow),
    Assign(WorkOrder),
    Complete(WorkOrder),
    ConfirmDelete(WorkOrder),
    ConfirmCancel(WorkOrder),
}

#[component]
#[allow(non_snake_case)]
pub fn WorkOrderList() -> impl IntoView {
    let store = WorkOrderStore::new();
    let auth = use_auth();
    let cancel = StoredValue::new_local(CancelToken::scoped());

    let modal = RwSignal::new(ActiveModal::None);
    let result = RwSignal::new(None::<ResultMessage>);
    let action_busy = RwSignal::new(false);

    let search = RwSignal::new(String::new());
    let status_filter = RwSignal::new(None::<WorkOrderStatus>);
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(10usize);

    let can_manage = Signal::derive(move || auth.with(|a| a.can_manage_work_orders()));

    let fetch = move || {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            store.load_work_orders(&ctx, &cancel).await;
        });
    };

    // Dropdown data loads in its own task
    {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            store.load_reference_data(&ctx, &cancel).await;
        });
    }
    fetch();

    let report = move |outcome: Result<&'static str, String>| {
        if matches!(&outcome, Err(e) if e == REQUEST_CANCELLED) {
            return;
        }
        let _ = result.try_set(Some(ResultMessage::from_result(outcome)));
    };

    let close_modal = Callback::new(move |_| {
        if modal.get_untracked() == ActiveModal::Form {
            store.reset_form();
        }
        modal.set(ActiveModal::None);
    });

    let finish = Callback::new(move |message: &'static str| {
        modal.set(ActiveModal::None);
        report(Ok(message));
    });

    let open_create = move |_| {
        store.reset_form();
        modal.set(ActiveModal::Form);
    };

    let open_edit = move |wo: WorkOrder| {
        if !store.reference_loaded.get_untracked() {
            return;
        }
        let installations = store.installations.get_untracked();
        store.set_form_values(&wo, &installations);
        modal.set(ActiveModal::Form);
    };

    let start = move |id: String| {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            let outcome = store.start_work_order(&ctx, &id, &cancel).await;
            report(outcome);
        });
    };

    // Shared by the delete and cancel confirmations
    let run_confirmed = move |wo: WorkOrder, delete: bool| {
        if action_busy.get_untracked() {
            return;
        }
        action_busy.set(true);
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            let outcome = if delete {
                store.remove_work_order(&ctx, &wo.id, &cancel).await
            } else {
                store.cancel_work_order(&ctx, &wo.id, &cancel).await
            };
            let _ = action_busy.try_set(false);
            let _ = modal.try_set(ActiveModal::None);
            report(outcome);
        });
    };

    let rows = Memo::new(move |_| {
        let all = store.list.with(|list| {
            list.items()
                .iter()
                .map(|wo| WorkOrderRow {
                    installation: store.installation_label(wo),
                    work_order: wo.clone(),
                })
                .collect::<Vec<_>>()
        });
        // re-resolve labels once installations arrive
        store.installations.track();
        let by_status = rows_with_status(all, status_filter.get());
        filter_list(&by_status, &search.get())
    });

    let current_page = Memo::new(move |_| rows.with(|r| paginate(r, page.get(), page_size.get())));

    let status_options = WorkOrderStatus::all();

    view! {
        <PageFrame page_id="a001_work_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="header__content">
                    <h1 class="header__title">{WorkOrder::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <Show when=move || can_manage.get()>
                        <button class="button button--primary" on:click=open_create>
                            {icon("plus")}
                            {"Nueva orden"}
                        </button>
                    </Show>
                    <button
                        class="button button--secondary"
                        on:click=move |_| fetch()
                        disabled=move || store.loading.get()
                    >
                        {icon("refresh")}
                        {move || if store.loading.get() { "Cargando..." } else { "Actualizar" }}
                    </button>
                </div>
            </div>

            <div class="page__content">
                {move || store.error.get().map(|e| view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">"⚠"</span>
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <div class="filter-bar">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |v: String| {
                            search.set(v);
                            page.set(0);
                        })
                        placeholder="Buscar por título, instalación o técnico..."
                    />
                    <select
                        class="form__select filter-bar__status"
                        on:change=move |ev| {
                            let code = event_target_value(&ev);
                            status_filter.set(WorkOrderStatus::from_code(&code));
                            page.set(0);
                        }
                    >
                        <option value="">"Todos los estados"</option>
                        {status_options.into_iter().map(|s| view! {
                            <option value=s.code()>{s.display_name()}</option>
                        }).collect_view()}
                    </select>
                </div>

                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">{"Título"}</th>
                                <th class="table__header-cell">{"Instalación"}</th>
                                <th class="table__header-cell">{"Prioridad"}</th>
                                <th class="table__header-cell">{"Estado"}</th>
                                <th class="table__header-cell">{"Técnico"}</th>
                                <th class="table__header-cell">{"Programada"}</th>
                                <th class="table__header-cell table__header-cell--actions">{"Acciones"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let filter = search.get();
                                let items = current_page.with(|p| p.items.clone());
                                if items.is_empty() {
                                    return view! {
                                        <tr>
                                            <td class="table__cell table__cell--empty" colspan="7">
                                                {if store.loading.get() { "Cargando..." } else { "No hay órdenes de trabajo" }}
                                            </td>
                                        </tr>
                                    }.into_any();
                                }
                                items.into_iter().map(|row| {
                                    let wo = row.work_order.clone();
                                    let status = wo.status;
                                    let manage = can_manage.get();
                                    let editable = can_open_edit(status, manage, store.reference_loaded.get());
                                    let technician = wo.technician_name().unwrap_or("-").to_string();
                                    let scheduled = wo.scheduled_date.as_deref().map(format_date).unwrap_or_else(|| "-".into());
                                    let row_for_summary = row.clone();
                                    let (wo_edit, wo_assign, wo_complete, wo_cancel, wo_delete) =
                                        (wo.clone(), wo.clone(), wo.clone(), wo.clone(), wo.clone());
                                    let id_start = wo.id.clone();
                                    view! {
                                        <tr class="table__row" on:click=move |_| modal.set(ActiveModal::Summary(row_for_summary.clone()))>
                                            <td class="table__cell">{highlight_matches(&wo.title, &filter)}</td>
                                            <td class="table__cell">{highlight_matches(&row.installation, &filter)}</td>
                                            <td class="table__cell"><PriorityBadge priority=wo.priority /></td>
                                            <td class="table__cell"><StatusBadge status=status /></td>
                                            <td class="table__cell">{technician}</td>
                                            <td class="table__cell">{scheduled}</td>
                                            <td class="table__cell table__cell--actions" on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()>
                                                {editable.then(|| view! {
                                                    <button class="button button--icon" title="Editar" on:click=move |_| open_edit(wo_edit.clone())>
                                                        {icon("edit")}
                                                    </button>
                                                })}
                                                {(manage && status.can_assign()).then(|| view! {
                                                    <button class="button button--icon" title="Asignar técnico" on:click=move |_| modal.set(ActiveModal::Assign(wo_assign.clone()))>
                                                        {icon("user-plus")}
                                                    </button>
                                                })}
                                                {status.can_start().then(|| view! {
                                                    <button class="button button--icon" title="Iniciar" on:click=move |_| start(id_start.clone())>
                                                        {icon("play")}
                                                    </button>
                                                })}
                                                {status.can_complete().then(|| view! {
                                                    <button class="button button--icon" title="Completar" on:click=move |_| modal.set(ActiveModal::Complete(wo_complete.clone()))>
                                                        {icon("check")}
                                                    </button>
                                                })}
                                                {(manage && status.can_cancel()).then(|| view! {
                                                    <button class="button button--icon" title="Cancelar orden" on:click=move |_| modal.set(ActiveModal::ConfirmCancel(wo_cancel.clone()))>
                                                        {icon("ban")}
                                                    </button>
                                                })}
                                                {manage.then(|| view! {
                                                    <button class="button button--icon button--danger" title="Eliminar" on:click=move |_| modal.set(ActiveModal::ConfirmDelete(wo_delete.clone()))>
                                                        {icon("delete")}
                                                    </button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                }).collect_view().into_any()
                            }}
                        </tbody>
                    </table>
                </div>

                <PaginationControls
                    current_page=Signal::derive(move || current_page.with(|p| p.page))
                    total_pages=Signal::derive(move || current_page.with(|p| p.total_pages))
                    total_count=Signal::derive(move || current_page.with(|p| p.total_count))
                    page_size=page_size
                    on_page_change=Callback::new(move |p| page.set(p))
                    on_page_size_change=Callback::new(move |size| {
                        page_size.set(size);
                        page.set(0);
                    })
                />
            </div>

            {move || match modal.get() {
                ActiveModal::None => ().into_any(),
                ActiveModal::Form => view! {
                    <WorkOrderFormModal store=store cancel=cancel on_close=close_modal on_saved=finish />
                }.into_any(),
                ActiveModal::Summary(row) => view! {
                    <WorkOrderSummaryModal
                        work_order=row.work_order
                        installation=row.installation
                        on_close=close_modal
                    />
                }.into_any(),
                ActiveModal::Assign(wo) => view! {
                    <AssignTechnicianModal store=store work_order=wo cancel=cancel on_close=close_modal on_assigned=finish />
                }.into_any(),
                ActiveModal::Complete(wo) => view! {
                    <CompleteWorkOrderModal store=store work_order=wo cancel=cancel on_close=close_modal on_completed=finish />
                }.into_any(),
                ActiveModal::ConfirmDelete(wo) => {
                    let message = format!("¿Eliminar la orden \"{}\"? Esta acción no se puede deshacer.", wo.title);
                    view! {
                        <ConfirmModal
                            title=format!("Eliminar {}", WorkOrder::element_name().to_lowercase())
                            message=message
                            busy=action_busy
                            on_confirm=Callback::new(move |_| run_confirmed(wo.clone(), true))
                            on_cancel=close_modal
                        />
                    }.into_any()
                }
                ActiveModal::ConfirmCancel(wo) => {
                    let message = format!("¿Cancelar la orden \"{}\"?", wo.title);
                    view! {
                        <ConfirmModal
                            title=format!("Cancelar {}", WorkOrder::element_name().to_lowercase())
                            message=message
                            confirm_label="Cancelar orden"
                            busy=action_busy
                            on_confirm=Callback::new(move |_| run_confirmed(wo.clone(), false))
                            on_cancel=close_modal
                        />
                    }.into_any()
                }
            }}

            <ResultModal result=result />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_waits_for_installations() {
        assert!(!can_open_edit(WorkOrderStatus::Pending, true, false));
        assert!(can_open_edit(WorkOrderStatus::Pending, true, true));
        assert!(!can_open_edit(WorkOrderStatus::InProgress, true, true));
        assert!(!can_open_edit(WorkOrderStatus::Assigned, false, true));
    }

    fn row(id: &str, title: &str, status: &str, installation: &str) -> WorkOrderRow {
        WorkOrderRow {
            work_order: serde_json::from_value(serde_json::json!({
                "_id": id,
                "titulo": title,
                "estado": status,
            }))
            .unwrap(),
            installation: installation.to_string(),
        }
    }

    fn rows() -> Vec<WorkOrderRow> {
        vec![
            row("1", "Revisión caldera", "pendiente", "Acme (Lima)"),
            row("2", "Cambio de bomba", "en_progreso", "Beta (Cusco)"),
            row("3", "Inspección tablero", "pendiente", "Beta (Cusco)"),
        ]
    }

    #[test]
    fn test_status_filter() {
        let pending = rows_with_status(rows(), Some(WorkOrderStatus::Pending));
        assert_eq!(pending.len(), 2);
        assert_eq!(rows_with_status(rows(), None).len(), 3);
    }

    #[test]
    fn test_search_matches_installation_label() {
        let found = filter_list(&rows(), "beta");
        let ids: Vec<_> = found.iter().map(|r| r.work_order.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_search_matches_status_name() {
        let found = filter_list(&rows(), "pendiente");
        assert_eq!(found.len(), 2);
    }
}
