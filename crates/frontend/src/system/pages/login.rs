use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::cancel::CancelToken;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_SYSTEM};
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let auth = use_auth();
    let cancel = StoredValue::new_local(CancelToken::scoped());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let request = LoginRequest {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        let validation = request.validate();
        if !validation.is_valid {
            let first = validation.errors.values().next().cloned();
            set_error_message.set(first);
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);
        let cancel = cancel.get_value();

        spawn_local(async move {
            let result = do_login(auth, request, &cancel).await;
            if cancel.is_cancelled() {
                return;
            }
            if let Err(e) = result {
                log::warn!("login failed: {}", e);
                set_error_message.set(Some(e));
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <PageFrame page_id="login--system" category=PAGE_CAT_SYSTEM>
            <div class="login-container">
                <div class="login-box">
                    <h1>"Consola de Mantenimiento"</h1>
                    <h2>"Iniciar sesión"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <div class="error-message">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="username">"Usuario"</label>
                            <input
                                type="text"
                                id="username"
                                autocomplete="username"
                                prop:value=move || username.get()
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">"Contraseña"</label>
                            <input
                                type="password"
                                id="password"
                                autocomplete="current-password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_loading.get()
                        >
                            {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                        </button>
                    </form>
                </div>
            </div>
        </PageFrame>
    }
}
