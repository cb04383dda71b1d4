use contracts::domain::a004_inventory::aggregate::InventoryItem;
use contracts::shared::list_query::{FilterDimension, FilterState, ListQuery, Page};
use leptos::prelude::*;
use std::str::FromStr;

#[derive(Clone, Debug, Default)]
pub struct InventoryListState {
    pub items: Vec<InventoryItem>,
    pub query: ListQuery,
    pub is_loaded: bool,
}

impl InventoryListState {
    pub fn visible_page(&self) -> Page<InventoryItem> {
        self.query.run(&self.items)
    }

    /// Filter edits always start again from the first page.
    pub fn edit_filters(&mut self, edit: impl FnOnce(&mut FilterState)) {
        edit(&mut self.query.filters);
        self.query.page = 0;
    }

    pub fn clear_dimension(&mut self, dim: FilterDimension) {
        self.edit_filters(|f| f.clear(dim));
    }

    pub fn replace_items(&mut self, items: Vec<InventoryItem>) {
        self.items = items;
        self.is_loaded = true;
        let filtered = self.visible_page().total_elements;
        self.query.clamp_page(filtered);
    }
}

/// Range bound typed into a filter field. Blank or unparsable input means
/// "no bound".
pub fn parse_bound<T: FromStr>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse().ok()
}

pub fn create_state() -> RwSignal<InventoryListState> {
    RwSignal::new(InventoryListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list_query::StockStatus;

    fn item(id: i64, stock: i64, low: bool, out: bool) -> InventoryItem {
        InventoryItem {
            id,
            name: format!("Item {id}"),
            model: None,
            code: format!("C-{id}"),
            category: None,
            warehouse_location: Some("A1".into()),
            stock_quantity: stock,
            unit_cost: 10.0,
            min_stock_level: None,
            is_low_stock: low,
            is_out_of_stock: out,
        }
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound::<i64>(" 12 "), Some(12));
        assert_eq!(parse_bound::<f64>("9,5"), Some(9.5));
        assert_eq!(parse_bound::<i64>(""), None);
        assert_eq!(parse_bound::<i64>("many"), None);
    }

    #[test]
    fn test_filter_edit_resets_page() {
        let mut state = InventoryListState::default();
        state.replace_items((1..=60).map(|i| item(i, 5, false, false)).collect());
        state.query.page = 2;
        state.edit_filters(|f| f.stock_status = StockStatus::LowStock);
        assert_eq!(state.query.page, 0);
        assert!(state.visible_page().is_empty());
    }

    #[test]
    fn test_reload_clamps_page() {
        let mut state = InventoryListState::default();
        state.replace_items((1..=60).map(|i| item(i, 5, false, false)).collect());
        state.query.page = 2;
        state.replace_items((1..=30).map(|i| item(i, 5, false, false)).collect());
        assert_eq!(state.query.page, 1);
        assert_eq!(state.visible_page().content.len(), 5);
    }

    #[test]
    fn test_clear_dimension() {
        let mut state = InventoryListState::default();
        state.edit_filters(|f| {
            f.min_stock = Some(1);
            f.search_term = "belt".into();
        });
        state.clear_dimension(FilterDimension::StockRange);
        assert_eq!(state.query.filters.active_dimensions(), vec![FilterDimension::Search]);
    }
}
