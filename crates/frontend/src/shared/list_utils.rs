//! List helpers shared by the list pages: text search, highlighting and
//! client-side pagination.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Minimum query length before the search filter kicks in
pub const MIN_SEARCH_CHARS: usize = 2;

/// Types that can be matched against a free-text search
pub trait Searchable {
    /// Does the record match the (already lowercased) query
    fn matches_filter(&self, filter: &str) -> bool;
}

fn active_query(filter: &str) -> Option<String> {
    let trimmed = filter.trim();
    if trimmed.chars().count() < MIN_SEARCH_CHARS {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive containment used by `Searchable` impls
pub fn contains_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Keep the records matching the query; short queries keep everything
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    match active_query(filter) {
        None => items.to_vec(),
        Some(query) => items
            .iter()
            .filter(|item| item.matches_filter(&query))
            .cloned()
            .collect(),
    }
}

/// One page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 0-indexed, clamped to the last page
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Slice `items` into pages of `page_size`. An out-of-range page is clamped
/// so deleting the last record of the last page does not show an empty table.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = page.min(total_pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total_count);
    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_count,
    }
}

/// Split `text` into (segment, is_match) pairs for highlighting
fn match_segments(text: &str, filter: &str) -> Vec<(String, bool)> {
    let query = match active_query(filter) {
        Some(q) => q,
        None => return vec![(text.to_string(), false)],
    };
    let lower = text.to_lowercase();
    // Lowercasing may change byte lengths; fall back to no highlight then
    if lower.len() != text.len() {
        return vec![(text.to_string(), false)];
    }

    let mut parts = Vec::new();
    let mut last = 0;
    while let Some(pos) = lower[last..].find(&query) {
        let start = last + pos;
        let end = start + query.len();
        if start > last {
            parts.push((text[last..start].to_string(), false));
        }
        parts.push((text[start..end].to_string(), true));
        last = end;
    }
    if last < text.len() || parts.is_empty() {
        parts.push((text[last..].to_string(), false));
    }
    parts
}

/// Highlight query matches in a table cell
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    match_segments(text, filter)
        .into_iter()
        .map(|(segment, hit)| {
            if hit {
                view! { <mark class="search-highlight">{segment}</mark> }.into_any()
            } else {
                view! { <span>{segment}</span> }.into_any()
            }
        })
        .collect_view()
        .into_any()
}

/// Search box with a 300 ms debounce and a clear button
#[component]
pub fn SearchInput(
    /// Current filter value
    #[prop(into)]
    value: Signal<String>,
    /// Called with the debounced value
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // Replacing the stored timeout drops (cancels) the previous one
        pending.set_value(Some(Timeout::new(300, move || {
            on_change.run(new_value);
        })));
    };

    let clear = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    let is_active = move || active_query(&value.get()).is_some();

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=is_active
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Limpiar">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(&'static str);

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.0, filter)
        }
    }

    #[test]
    fn test_filter_list_ignores_short_queries() {
        let rows = vec![Row("Caldera"), Row("Bomba")];
        assert_eq!(filter_list(&rows, "c").len(), 2);
        assert_eq!(filter_list(&rows, " CAL "), vec![Row("Caldera")]);
    }

    #[test]
    fn test_paginate_clamps_page() {
        let items: Vec<u32> = (0..25).collect();

        let first = paginate(&items, 0, 10);
        assert_eq!(first.items, (0..10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_count, 25);

        let last = paginate(&items, 7, 10);
        assert_eq!(last.page, 2);
        assert_eq!(last.items, vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn test_paginate_empty_list() {
        let page = paginate::<u32>(&[], 3, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.page, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_match_segments() {
        assert_eq!(
            match_segments("Revisión caldera Caldera", "caldera"),
            vec![
                ("Revisión ".to_string(), false),
                ("caldera".to_string(), true),
                (" ".to_string(), false),
                ("Caldera".to_string(), true),
            ]
        );
        assert_eq!(match_segments("Bomba", "x"), vec![("Bomba".to_string(), false)]);
    }
}
