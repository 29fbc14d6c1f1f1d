use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for super-admins
#[component]
pub fn RequireSuperAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.with(|s| s.is_super_admin())
            fallback=|| view! { <div class="access-denied">"Acceso denegado. Se requieren permisos de superadministrador."</div> }
        >
            {children()}
        </Show>
    }
}
