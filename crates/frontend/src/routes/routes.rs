use crate::domain::a001_work_order::ui::list::WorkOrderList;
use crate::domain::a003_tenant::ui::list::TenantList;
use crate::layout::global_context::{AppGlobalContext, AppPage};
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireSuperAdmin;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn ActivePage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();

    move || match ctx.active.get() {
        AppPage::WorkOrders => view! { <WorkOrderList /> }.into_any(),
        AppPage::Tenants => view! {
            <RequireSuperAdmin>
                <TenantList />
            </RequireSuperAdmin>
        }
        .into_any(),
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().unwrap_or_default();
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <ActivePage /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.with(|a| a.is_authenticated())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
