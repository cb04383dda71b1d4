use crate::shared::icons::icon;
use contracts::shared::list_query::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use leptos::prelude::*;

/// Page navigation and page size selector shown in the filter panel header.
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<usize>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Available page size options (optional, defaults to [10, 25, 50, 100])
    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| PAGE_SIZE_OPTIONS.to_vec());

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || current_page.get() == 0
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || current_page.get() == 0
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    pagination_label(
                        current_page.get(),
                        total_pages.get(),
                        total_count.get(),
                        page_size.get(),
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    let total = total_pages.get();
                    if page + 1 < total {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=move || {
                    let page = current_page.get();
                    let total = total_pages.get();
                    page + 1 >= total
                }
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total - 1);
                    }
                }
                disabled=move || {
                    let page = current_page.get();
                    let total = total_pages.get();
                    page + 1 >= total
                }
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    let val = event_target_value(&ev).parse().unwrap_or(DEFAULT_PAGE_SIZE);
                    on_page_size_change.run(val);
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

/// "11–20 of 23 · page 2/3"; "0 of 0" for an empty list.
pub fn pagination_label(page: usize, total_pages: usize, total_count: usize, page_size: usize) -> String {
    if total_count == 0 || page_size == 0 {
        return "0 of 0".to_string();
    }
    let first = (page * page_size + 1).min(total_count);
    let last = ((page + 1) * page_size).min(total_count);
    format!(
        "{}–{} of {} · page {}/{}",
        first,
        last,
        total_count,
        page + 1,
        total_pages.max(1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_label() {
        assert_eq!(pagination_label(0, 3, 23, 10), "1–10 of 23 · page 1/3");
        assert_eq!(pagination_label(2, 3, 23, 10), "21–23 of 23 · page 3/3");
        assert_eq!(pagination_label(0, 0, 0, 10), "0 of 0");
    }
}
