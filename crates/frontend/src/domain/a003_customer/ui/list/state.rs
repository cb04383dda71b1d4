use crate::domain::a003_customer::api::CustomerListQuery;
use contracts::domain::a003_customer::aggregate::Customer;
use contracts::shared::list_query::{Page, SortOrder, DEFAULT_PAGE_SIZE};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct CustomerListState {
    pub customers: Vec<Customer>,
    pub search: String,
    pub sort_field: String,
    pub sort_order: SortOrder,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub is_loaded: bool,
}

impl Default for CustomerListState {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            search: String::new(),
            sort_field: "name".to_string(),
            sort_order: SortOrder::Asc,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
            is_loaded: false,
        }
    }
}

impl CustomerListState {
    pub fn to_query(&self) -> CustomerListQuery {
        let search = self.search.trim();
        CustomerListQuery {
            page: self.page,
            size: self.page_size,
            sort: format!("{},{}", self.sort_field, self.sort_order.as_str()),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub fn apply_page(&mut self, page: Page<Customer>) {
        self.total_count = page.total_elements;
        self.total_pages = page.total_pages;
        self.page = page.number;
        self.customers = page.content;
        self.is_loaded = true;
    }
}

pub fn create_state() -> RwSignal<CustomerListState> {
    RwSignal::new(CustomerListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string() {
        let state = CustomerListState {
            search: "harbor".into(),
            page: 2,
            page_size: 10,
            ..Default::default()
        };
        let qs = serde_qs::to_string(&state.to_query()).unwrap();
        assert!(qs.starts_with("page=2&size=10&sort=name"));
        assert!(qs.ends_with("&search=harbor"));
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let state = CustomerListState {
            search: "   ".into(),
            ..Default::default()
        };
        assert_eq!(state.to_query().search, None);
    }
}
