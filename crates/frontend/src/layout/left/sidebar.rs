//! Sidebar: page menu plus the signed-in user and logout

use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();
    let auth = use_auth();

    let is_super_admin = Signal::derive(move || auth.with(|a| a.is_super_admin()));
    let username = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .map(|u| u.username.clone())
                .unwrap_or_default()
        })
    };
    let role = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .map(|u| u.role.display_name())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__brand">"Mantenimiento"</div>
            {AppPage::all().into_iter().map(|page| {
                let visible = move || !page.requires_super_admin() || is_super_admin.get();
                view! {
                    <Show when=visible>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || ctx.active.get() == page
                            on:click=move |_| ctx.open(page)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(page.icon())}
                                <span>{page.label()}</span>
                            </div>
                        </div>
                    </Show>
                }
            }).collect_view()}

            <div class="app-sidebar__footer">
                <div class="app-sidebar__user">
                    <span class="app-sidebar__username">{username}</span>
                    <span class="app-sidebar__role">{role}</span>
                </div>
                <button
                    class="button button--icon"
                    title="Cerrar sesión"
                    on:click=move |_| do_logout(auth)
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
