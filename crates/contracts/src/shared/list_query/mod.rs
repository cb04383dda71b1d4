//! Client-side list query: filter, sort, paginate and group already-fetched
//! records without another round trip to the backend.
//!
//! Pages describe their records through the [`Filterable`] and [`Sortable`]
//! traits and keep a [`FilterState`] in view state. Every function here is
//! total: empty input, missing optional fields and out-of-range pages all
//! degrade to empty results instead of failing.

pub mod filter;
pub mod group;
pub mod paginate;
pub mod query;
pub mod sort;

pub use filter::{
    apply_filters, count_active_filters, FilterDimension, FilterState, Filterable, StockStatus,
};
pub use group::{group_by_key, GroupedView};
pub use paginate::{paginate, total_pages, Page, PageResponse};
pub use query::{ListQuery, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use sort::{locale_compare, sort_items, SortOrder, SortValue, Sortable};
