//! PageFrame: standard root wrapper for every page.
//!
//! Sets two metadata attributes on the root DOM element:
//!   - `id`: `"{entity}--{category}"`, e.g. `"a001_work_order--list"`
//!   - `data-page-category`: one of the PAGE_CAT_* constants
//!
//! The `--` separator keeps the entity searchable: copy the id from the DOM
//! inspector and it leads to `domain/a001_work_order/`.

use leptos::prelude::*;

/// List of records: table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// System page (login, access errors).
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Root wrapper that sets standard metadata on every page.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`
    page_id: &'static str,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
