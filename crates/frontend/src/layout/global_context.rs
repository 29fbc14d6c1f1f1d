use contracts::domain::a001_work_order::WorkOrder;
use contracts::domain::a003_tenant::Tenant;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Pages reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPage {
    #[default]
    WorkOrders,
    Tenants,
}

impl AppPage {
    pub fn key(&self) -> &'static str {
        match self {
            AppPage::WorkOrders => "a001_work_order",
            AppPage::Tenants => "a003_tenant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppPage::WorkOrders => WorkOrder::list_name(),
            AppPage::Tenants => Tenant::list_name(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AppPage::WorkOrders => "work-orders",
            AppPage::Tenants => "tenants",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.key() == key)
    }

    pub fn all() -> [AppPage; 2] {
        [AppPage::WorkOrders, AppPage::Tenants]
    }

    /// Only super-admins manage tenants
    pub fn requires_super_admin(&self) -> bool {
        matches!(self, AppPage::Tenants)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<AppPage>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Page named by `?active=` in a query string
pub fn page_from_query(search: &str) -> Option<AppPage> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").and_then(|key| AppPage::from_key(key))
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(AppPage::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the active page from the URL and keep `?active=` in sync
    pub fn init_router_integration(&self) {
        if let Some(page) = page_from_query(&current_search()) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let page = this.active.get();
            let query = serde_qs::to_string(&HashMap::from([("active", page.key())]))
                .unwrap_or_default();
            let new_url = format!("?{}", query);
            if current_search() == new_url {
                return;
            }
            if let Some(w) = window() {
                if let Ok(history) = w.history() {
                    let _ = history.replace_state_with_url(
                        &wasm_bindgen::JsValue::NULL,
                        "",
                        Some(&new_url),
                    );
                }
            }
        });
    }

    pub fn open(&self, page: AppPage) {
        log::debug!("open page {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_query() {
        assert_eq!(page_from_query("?active=a003_tenant"), Some(AppPage::Tenants));
        assert_eq!(page_from_query("active=a001_work_order"), Some(AppPage::WorkOrders));
        assert_eq!(page_from_query("?active=a999_unknown"), None);
        assert_eq!(page_from_query(""), None);
    }

    #[test]
    fn test_page_labels_follow_entity_names() {
        assert_eq!(AppPage::WorkOrders.label(), "Órdenes de trabajo");
        assert_eq!(AppPage::Tenants.label(), "Clientes");
    }
}
