/// List page helpers: debounced search box, sort indicators, match highlighting.
use contracts::shared::list_query::SortOrder;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Highlight case-insensitive matches of `filter` inside `text`.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let filter_lower = filter.to_lowercase();
    let text_lower = text.to_lowercase();

    // Lowercasing may change byte lengths outside ASCII; fall back to plain text.
    if text_lower.len() != text.len() || !text_lower.contains(&filter_lower) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let actual_pos = last_pos + pos;
        if actual_pos > last_pos {
            parts.push(view! { <span>{text[last_pos..actual_pos].to_string()}</span> }.into_any());
        }
        let match_end = actual_pos + filter_lower.len();
        parts.push(
            view! { <mark class="search-highlight">{text[actual_pos..match_end].to_string()}</mark> }
                .into_any(),
        );
        last_pos = match_end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Search box that reports its value after the user stops typing.
#[component]
pub fn SearchInput(
    /// Current filter value (for display)
    #[prop(into)]
    value: Signal<String>,
    /// Called with the debounced value
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // Replacing the stored timeout drops, and so cancels, the previous one.
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    // External clear (filter chip, reset) empties the box.
    Effect::new(move |_| {
        if value.with(|v| v.is_empty()) && !input_value.get_untracked().is_empty() {
            pending.set_value(None);
            set_input_value.set(String::new());
        }
    });

    on_cleanup(move || pending.set_value(None));

    view! {
        <div class="search-input" class:search-input--active=move || !value.get().trim().is_empty()>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// `For` key for a table row: the id plus a hash of the row's contents, so a
/// row refreshed in place under the same id is rebuilt.
pub fn row_key<T: Serialize>(id: i64, row: &T) -> (i64, u64) {
    let mut hasher = DefaultHasher::new();
    serde_json::to_string(row).unwrap_or_default().hash(&mut hasher);
    (id, hasher.finish())
}

/// Sort indicator for a column header.
pub fn get_sort_indicator(current_field: &str, field: &str, order: SortOrder) -> &'static str {
    if current_field == field {
        if order.is_ascending() {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Clickable header label with the sort indicator for `field`.
#[component]
pub fn SortableHeader(
    label: &'static str,
    field: &'static str,
    #[prop(into)] sort_field: Signal<String>,
    #[prop(into)] sort_order: Signal<SortOrder>,
    on_sort: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <div class="table__sortable-header" style="cursor: pointer;" on:click=move |_| on_sort.run(field)>
            {label}
            <span class=move || sort_field.with(|current| get_sort_class(current, field))>
                {move || sort_field.with(|current| get_sort_indicator(current, field, sort_order.get()))}
            </span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", SortOrder::Asc), " ▲");
        assert_eq!(get_sort_indicator("name", "name", SortOrder::Desc), " ▼");
        assert_eq!(get_sort_indicator("name", "code", SortOrder::Asc), " ⇅");
        assert_eq!(get_sort_class("code", "name"), "table__sort-indicator");
    }

    #[test]
    fn test_row_key_follows_row_contents() {
        #[derive(Serialize)]
        struct Row {
            id: i64,
            stock: i64,
        }
        let before = row_key(7, &Row { id: 7, stock: 5 });
        assert_eq!(before, row_key(7, &Row { id: 7, stock: 5 }));

        let refreshed = row_key(7, &Row { id: 7, stock: 0 });
        assert_eq!(refreshed.0, 7);
        assert_ne!(before, refreshed);
    }
}
