use crate::domain::a003_tenant::store::TenantStore;
use crate::domain::a003_tenant::ui::details::TenantFormModal;
use crate::shared::api_utils::REQUEST_CANCELLED;
use crate::shared::cancel::CancelToken;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::Badge;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, filter_list, highlight_matches, paginate, SearchInput, Searchable,
};
use crate::shared::modal::{ConfirmModal, ResultMessage, ResultModal};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::context::use_api_context;
use contracts::domain::a003_tenant::Tenant;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;

impl Searchable for Tenant {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.name, filter)
            || contains_ci(&self.email, filter)
            || self
                .phone
                .as_deref()
                .map(|p| contains_ci(p, filter))
                .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ActiveModal {
    None,
    Form,
    ConfirmDelete(Tenant),
}

#[component]
#[allow(non_snake_case)]
pub fn TenantList() -> impl IntoView {
    let store = TenantStore::new();
    let cancel = StoredValue::new_local(CancelToken::scoped());

    let modal = RwSignal::new(ActiveModal::None);
    let result = RwSignal::new(None::<ResultMessage>);
    let deleting = RwSignal::new(false);

    let search = RwSignal::new(String::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(10usize);

    let fetch = move || {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            store.load_tenants(&ctx, &cancel).await;
        });
    };
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

    let on_saved = Callback::new(move |message: &'static str| {
        modal.set(ActiveModal::None);
        report(Ok(message));
    });

    let open_edit = move |tenant: Tenant| {
        store.set_form_values(&tenant);
        modal.set(ActiveModal::Form);
    };

    let delete = move |id: String| {
        if deleting.get_untracked() {
            return;
        }
        deleting.set(true);
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        spawn_local(async move {
            let outcome = store.remove_tenant(&ctx, &id, &cancel).await;
            let _ = deleting.try_set(false);
            let _ = modal.try_set(ActiveModal::None);
            report(outcome);
        });
    };

    let rows = Memo::new(move |_| {
        store
            .list
            .with(|list| filter_list(list.items(), &search.get()))
    });
    let current_page = Memo::new(move |_| rows.with(|r| paginate(r, page.get(), page_size.get())));

    view! {
        <PageFrame page_id="a003_tenant--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="header__content">
                    <h1 class="header__title">{Tenant::list_name()}</h1>
                </div>
                <div class="header__actions">
                    <button
                        class="button button--primary"
                        on:click=move |_| {
                            store.reset_form();
                            modal.set(ActiveModal::Form);
                        }
                    >
                        {icon("plus")}
                        {"Nuevo cliente"}
                    </button>
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
                        placeholder="Buscar por nombre, email o teléfono..."
                    />
                </div>

                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">{"Nombre"}</th>
                                <th class="table__header-cell">{"Email"}</th>
                                <th class="table__header-cell">{"Teléfono"}</th>
                                <th class="table__header-cell">{"Estado"}</th>
                                <th class="table__header-cell">{"Creado"}</th>
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
                                            <td class="table__cell table__cell--empty" colspan="6">
                                                {if store.loading.get() { "Cargando..." } else { "No hay clientes" }}
                                            </td>
                                        </tr>
                                    }.into_any();
                                }
                                items.into_iter().map(|tenant| {
                                    let (for_edit, for_delete) = (tenant.clone(), tenant.clone());
                                    let (variant, label) = if tenant.active {
                                        ("success", "Activo")
                                    } else {
                                        ("neutral", "Inactivo")
                                    };
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{highlight_matches(&tenant.name, &filter)}</td>
                                            <td class="table__cell">{highlight_matches(&tenant.email, &filter)}</td>
                                            <td class="table__cell">{tenant.phone.clone().unwrap_or_else(|| "-".into())}</td>
                                            <td class="table__cell"><Badge variant=variant.to_string()>{label}</Badge></td>
                                            <td class="table__cell">{format_datetime_opt(tenant.metadata.created_at.as_ref())}</td>
                                            <td class="table__cell table__cell--actions">
                                                <button class="button button--icon" title="Editar" on:click=move |_| open_edit(for_edit.clone())>
                                                    {icon("edit")}
                                                </button>
                                                <button class="button button--icon button--danger" title="Eliminar" on:click=move |_| modal.set(ActiveModal::ConfirmDelete(for_delete.clone()))>
                                                    {icon("delete")}
                                                </button>
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
                    <TenantFormModal store=store cancel=cancel on_close=close_modal on_saved=on_saved />
                }.into_any(),
                ActiveModal::ConfirmDelete(tenant) => {
                    let message = format!(
                        "¿Eliminar el cliente \"{}\"? Se perderá el acceso de sus usuarios.",
                        tenant.name
                    );
                    let id = tenant.id.clone();
                    view! {
                        <ConfirmModal
                            title=format!("Eliminar {}", Tenant::element_name().to_lowercase())
                            message=message
                            busy=deleting
                            on_confirm=Callback::new(move |_| delete(id.clone()))
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

    fn tenant(id: &str, name: &str, email: &str, phone: Option<&str>) -> Tenant {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "nombre": name,
            "email": email,
            "telefono": phone,
        }))
        .unwrap()
    }

    #[test]
    fn test_search_by_name_email_and_phone() {
        let tenants = vec![
            tenant("1", "Acme Servicios", "ops@acme.com", Some("+51 999 111")),
            tenant("2", "Beta Clima", "hola@beta.pe", None),
        ];
        assert_eq!(filter_list(&tenants, "acme").len(), 1);
        assert_eq!(filter_list(&tenants, "beta.pe")[0].id, "2");
        assert_eq!(filter_list(&tenants, "999")[0].id, "1");
        assert_eq!(filter_list(&tenants, "x").len(), 2);
    }

    #[test]
    fn test_missing_active_flag_defaults_to_active() {
        assert!(tenant("1", "Acme", "a@b.co", None).active);
    }
}
