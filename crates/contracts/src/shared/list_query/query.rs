use serde::{Deserialize, Serialize};

use super::filter::{FilterState, Filterable};
use super::paginate::{total_pages, Page};
use super::sort::{sort_items, SortOrder, Sortable};

pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Full client-side query over a fetched list: filters, sort and page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub filters: FilterState,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    /// Filter, then sort, then cut the requested page. Page metadata refers
    /// to the filtered count.
    pub fn run<T>(&self, items: &[T]) -> Page<T>
    where
        T: Filterable + Sortable + Clone,
    {
        let mut filtered = super::filter::apply_filters(items, &self.filters);
        sort_items(&mut filtered, &self.filters.sort_by, self.filters.sort_order);
        Page::from_slice(&filtered, self.page, self.page_size)
    }

    /// Clicking a column header: same field flips the order, another field
    /// starts ascending. Either way the view returns to the first page.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.filters.sort_by == field {
            self.filters.sort_order = self.filters.sort_order.toggled();
        } else {
            self.filters.sort_by = field.to_string();
            self.filters.sort_order = SortOrder::Asc;
        }
        self.page = 0;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size;
        self.page = 0;
    }

    /// Move back to the last existing page after the filtered set shrank.
    pub fn clamp_page(&mut self, total: usize) {
        let pages = total_pages(total, self.page_size);
        if pages == 0 {
            self.page = 0;
        } else if self.page >= pages {
            self.page = pages - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::{SortValue, StockStatus};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: String,
        stock: i64,
    }

    impl Filterable for Item {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str()]
        }
        fn stock_quantity(&self) -> Option<i64> {
            Some(self.stock)
        }
        fn is_out_of_stock(&self) -> bool {
            self.stock == 0
        }
    }

    impl Sortable for Item {
        fn sort_value(&self, field: &str) -> SortValue<'_> {
            match field {
                "name" => SortValue::Text(&self.name),
                "stock" => SortValue::Number(self.stock as f64),
                _ => SortValue::Missing,
            }
        }
    }

    fn items() -> Vec<Item> {
        (0..23)
            .map(|i| Item {
                name: format!("item-{i:02}"),
                stock: i % 5,
            })
            .collect()
    }

    #[test]
    fn test_run_filters_sorts_and_pages() {
        let mut query = ListQuery {
            page_size: 10,
            ..ListQuery::default()
        };
        query.filters.stock_status = StockStatus::OutOfStock;
        query.toggle_sort("name");

        let page = query.run(&items());
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.content[0].name, "item-20");
        assert_eq!(page.content[4].name, "item-00");
    }

    #[test]
    fn test_toggle_sort_resets_page() {
        let mut query = ListQuery {
            page: 3,
            ..ListQuery::default()
        };
        query.toggle_sort("stock");
        assert_eq!(query.page, 0);
        assert_eq!(query.filters.sort_by, "stock");
        assert_eq!(query.filters.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_clamp_page() {
        let mut query = ListQuery {
            page: 7,
            page_size: 10,
            ..ListQuery::default()
        };
        query.clamp_page(23);
        assert_eq!(query.page, 2);
        query.clamp_page(0);
        assert_eq!(query.page, 0);
    }
}
