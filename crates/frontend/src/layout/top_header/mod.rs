//! Top bar: sidebar toggle, current page title and tenant of the session.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();
    let auth = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();
    let tenant = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .and_then(|u| u.tenant_id.clone())
                .map(|t| format!("Cliente: {}", t))
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    {move || if is_sidebar_visible() {
                        icon("chevrons-left")
                    } else {
                        icon("chevrons-right")
                    }}
                </button>
                <span class="top-header__title">{move || ctx.active.get().label()}</span>
            </div>
            <div class="top-header__actions">
                {move || tenant().map(|t| view! { <span class="top-header__tenant">{t}</span> })}
            </div>
        </div>
    }
}
