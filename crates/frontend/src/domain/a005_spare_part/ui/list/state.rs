use contracts::domain::a005_spare_part::aggregate::SparePart;
use contracts::shared::list_query::{FilterState, ListQuery, Page, StockStatus};
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct SparePartListState {
    pub parts: Vec<SparePart>,
    pub query: ListQuery,
    pub is_loaded: bool,
}

impl Default for SparePartListState {
    fn default() -> Self {
        Self {
            parts: Vec::new(),
            query: ListQuery {
                filters: FilterState {
                    sort_by: "partNumber".to_string(),
                    ..FilterState::default()
                },
                ..ListQuery::default()
            },
            is_loaded: false,
        }
    }
}

impl SparePartListState {
    pub fn visible_page(&self) -> Page<SparePart> {
        self.query.run(&self.parts)
    }

    /// Every part passing the current filters, in display order, across all pages.
    pub fn filtered(&self) -> Vec<SparePart> {
        let all = ListQuery {
            page: 0,
            page_size: self.parts.len().max(1),
            ..self.query.clone()
        };
        all.run(&self.parts).content
    }

    pub fn set_search(&mut self, term: String) {
        self.query.filters.search_term = term;
        self.query.page = 0;
    }

    pub fn set_stock_status(&mut self, status: StockStatus) {
        self.query.filters.stock_status = status;
        self.query.page = 0;
    }

    pub fn replace_parts(&mut self, parts: Vec<SparePart>) {
        self.parts = parts;
        self.is_loaded = true;
        let filtered = self.visible_page().total_elements;
        self.query.clamp_page(filtered);
    }
}

pub fn create_state() -> RwSignal<SparePartListState> {
    RwSignal::new(SparePartListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: i64, number: &str, stock: i64) -> SparePart {
        SparePart {
            id,
            name: format!("Part {id}"),
            part_number: number.to_string(),
            compatible_models: vec!["LX-200".into()],
            stock_quantity: stock,
            unit_price: 1.0,
            supplier_id: None,
            supplier_name: None,
            location: None,
            is_low_stock: false,
        }
    }

    #[test]
    fn test_default_sort_by_part_number() {
        let mut state = SparePartListState::default();
        state.replace_parts(vec![part(1, "B-2", 3), part(2, "A-1", 3)]);
        let ids: Vec<i64> = state.visible_page().content.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_filtered_spans_all_pages() {
        let mut state = SparePartListState::default();
        state.query.page_size = 2;
        state.replace_parts((1..=5).map(|i| part(i, &format!("P-{i}"), 1)).collect());
        assert_eq!(state.visible_page().content.len(), 2);
        assert_eq!(state.filtered().len(), 5);

        state.set_stock_status(StockStatus::OutOfStock);
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn test_search_matches_compatible_models() {
        let mut state = SparePartListState::default();
        state.replace_parts(vec![part(1, "A", 1)]);
        state.set_search("lx-2".into());
        assert_eq!(state.filtered().len(), 1);
        state.set_search("mx".into());
        assert!(state.filtered().is_empty());
    }
}
