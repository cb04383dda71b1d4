use crate::domain::a001_contract::api::ContractListQuery;
use contracts::domain::a001_contract::aggregate::{Contract, ContractStatus};
use contracts::shared::list_query::{Page, SortOrder, DEFAULT_PAGE_SIZE};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct ContractListState {
    pub contracts: Vec<Contract>,
    pub search: String,
    pub status: Option<ContractStatus>,
    pub sort_field: String,
    pub sort_order: SortOrder,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub is_loaded: bool,
}

impl Default for ContractListState {
    fn default() -> Self {
        Self {
            contracts: Vec::new(),
            search: String::new(),
            status: None,
            sort_field: "contractNumber".to_string(),
            sort_order: SortOrder::Asc,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
            total_pages: 0,
            is_loaded: false,
        }
    }
}

impl ContractListState {
    pub fn to_query(&self) -> ContractListQuery {
        let search = self.search.trim();
        ContractListQuery {
            page: self.page,
            size: self.page_size,
            sort: format!("{},{}", self.sort_field, self.sort_order.as_str()),
            status: self.status.map(|s| s.as_str().to_string()),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub fn apply_page(&mut self, page: Page<Contract>) {
        self.total_count = page.total_elements;
        self.total_pages = page.total_pages;
        self.page = page.number;
        self.contracts = page.content;
        self.is_loaded = true;
    }

    pub fn active_filters_count(&self) -> usize {
        usize::from(!self.search.trim().is_empty()) + usize::from(self.status.is_some())
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field.to_string();
            self.sort_order = SortOrder::Asc;
        }
        self.page = 0;
    }
}

pub fn create_state() -> RwSignal<ContractListState> {
    RwSignal::new(ContractListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_skips_neutral_filters() {
        let state = ContractListState::default();
        let query = state.to_query();
        assert_eq!(query.sort, "contractNumber,asc");
        assert_eq!(query.status, None);
        assert_eq!(query.search, None);
        assert_eq!(state.active_filters_count(), 0);
    }

    #[test]
    fn test_query_with_filters_and_sort() {
        let mut state = ContractListState {
            search: "  north ".into(),
            status: Some(ContractStatus::PendingSignature),
            page: 3,
            ..Default::default()
        };
        state.toggle_sort("endDate");
        state.toggle_sort("endDate");

        let query = state.to_query();
        assert_eq!(query.page, 0);
        assert_eq!(query.sort, "endDate,desc");
        assert_eq!(query.status.as_deref(), Some("PENDING_SIGNATURE"));
        assert_eq!(query.search.as_deref(), Some("north"));
        assert_eq!(state.active_filters_count(), 2);
    }

    #[test]
    fn test_apply_page() {
        let mut state = ContractListState::default();
        state.apply_page(Page {
            content: Vec::new(),
            total_elements: 41,
            total_pages: 2,
            number: 1,
            size: 25,
        });
        assert!(state.is_loaded);
        assert_eq!((state.page, state.total_pages, state.total_count), (1, 2, 41));
    }
}
