use crate::domain::a003_tenant::store::TenantStore;
use crate::shared::api_utils::REQUEST_CANCELLED;
use crate::shared::cancel::CancelToken;
use crate::shared::components::ui::TextField;
use crate::shared::modal::Modal;
use crate::shared::state::MSG_INVALID_FORM;
use crate::system::auth::context::use_api_context;
use contracts::domain::a003_tenant::{TenantDraft, TenantField};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn draft_value(draft: &TenantDraft, field: TenantField) -> String {
    match field {
        TenantField::Name => draft.name.clone(),
        TenantField::Email => draft.email.clone(),
        TenantField::Phone => draft.phone.clone(),
        TenantField::Active => draft.active.to_string(),
        TenantField::AdminUsername => draft.admin_username.clone(),
        TenantField::AdminPassword => draft.admin_password.clone(),
        TenantField::ConfirmPassword => draft.confirm_password.clone(),
    }
}

/// Create/edit a tenant. The admin account block is shown on create only.
#[component]
pub fn TenantFormModal(
    store: TenantStore,
    cancel: StoredValue<CancelToken, LocalStorage>,
    on_close: Callback<()>,
    on_saved: Callback<&'static str>,
) -> impl IntoView {
    let submit_error = RwSignal::new(None::<String>);
    let submitting = Signal::derive(move || store.form.with(|f| f.submitting));
    let edit_mode = Signal::derive(move || store.form.with(|f| f.draft.is_edit_mode()));

    let value = move |field: TenantField| {
        Signal::derive(move || store.form.with(|f| draft_value(&f.draft, field)))
    };
    let error = move |field: TenantField| {
        Signal::derive(move || store.form.with(|f| f.visible_error(field)))
    };
    let on_input = move |field: TenantField| {
        Callback::new(move |v: String| store.handle_field_change(field, &v))
    };
    let on_blur = move |field: TenantField| Callback::new(move |_| store.handle_field_blur(field));

    let title = Signal::derive(move || {
        if edit_mode.get() {
            "Editar cliente".to_string()
        } else {
            "Nuevo cliente".to_string()
        }
    });

    let submit = move || {
        let ctx = use_api_context();
        let cancel = cancel.get_value();
        submit_error.set(None);
        spawn_local(async move {
            match store.handle_submit_form(&ctx, &cancel).await {
                Ok(message) => on_saved.run(message),
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
            modal_class="tenant-modal"
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
            <div class="details-form tenant-form">
                <TextField
                    id="tenant-name"
                    label="Nombre"
                    required=true
                    value=value(TenantField::Name)
                    on_input=on_input(TenantField::Name)
                    on_blur=on_blur(TenantField::Name)
                    error=error(TenantField::Name)
                    disabled=submitting
                />
                <div class="form__row">
                    <TextField
                        id="tenant-email"
                        label="Email"
                        input_type="email"
                        required=true
                        value=value(TenantField::Email)
                        on_input=on_input(TenantField::Email)
                        on_blur=on_blur(TenantField::Email)
                        error=error(TenantField::Email)
                        disabled=submitting
                    />
                    <TextField
                        id="tenant-phone"
                        label="Teléfono"
                        input_type="tel"
                        value=value(TenantField::Phone)
                        on_input=on_input(TenantField::Phone)
                        on_blur=on_blur(TenantField::Phone)
                        error=error(TenantField::Phone)
                        disabled=submitting
                    />
                </div>
                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || store.form.with(|f| f.draft.active)
                        disabled=move || submitting.get()
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            store.handle_field_change(TenantField::Active, &checked.to_string());
                        }
                    />
                    <span>"Activo"</span>
                </label>

                <Show when=move || !edit_mode.get()>
                    <fieldset class="form__group">
                        <legend>"Usuario administrador"</legend>
                        <TextField
                            id="tenant-admin-username"
                            label="Usuario"
                            required=true
                            autocomplete="off"
                            value=value(TenantField::AdminUsername)
                            on_input=on_input(TenantField::AdminUsername)
                            on_blur=on_blur(TenantField::AdminUsername)
                            error=error(TenantField::AdminUsername)
                            disabled=submitting
                        />
                        <div class="form__row">
                            <TextField
                                id="tenant-admin-password"
                                label="Contraseña"
                                input_type="password"
                                required=true
                                autocomplete="new-password"
                                value=value(TenantField::AdminPassword)
                                on_input=on_input(TenantField::AdminPassword)
                                on_blur=on_blur(TenantField::AdminPassword)
                                error=error(TenantField::AdminPassword)
                                disabled=submitting
                            />
                            <TextField
                                id="tenant-confirm-password"
                                label="Confirmar contraseña"
                                input_type="password"
                                required=true
                                autocomplete="new-password"
                                value=value(TenantField::ConfirmPassword)
                                on_input=on_input(TenantField::ConfirmPassword)
                                on_blur=on_blur(TenantField::ConfirmPassword)
                                error=error(TenantField::ConfirmPassword)
                                disabled=submitting
                            />
                        </div>
                    </fieldset>
                </Show>
            </div>
        </Modal>
    }
}
