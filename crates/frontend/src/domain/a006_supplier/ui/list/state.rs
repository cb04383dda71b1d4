use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::shared::list_query::{ListQuery, Page};
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct SupplierListState {
    pub suppliers: Vec<Supplier>,
    pub query: ListQuery,
    pub active_only: bool,
    pub is_loaded: bool,
}

impl SupplierListState {
    pub fn visible_page(&self) -> Page<Supplier> {
        if self.active_only {
            let active: Vec<Supplier> = self.suppliers.iter().filter(|s| s.active).cloned().collect();
            self.query.run(&active)
        } else {
            self.query.run(&self.suppliers)
        }
    }

    pub fn set_search(&mut self, term: String) {
        self.query.filters.search_term = term;
        self.query.page = 0;
    }

    pub fn set_active_only(&mut self, active_only: bool) {
        self.active_only = active_only;
        self.query.page = 0;
    }

    /// Search plus the active-only toggle.
    pub fn active_filters_count(&self) -> usize {
        usize::from(!self.query.filters.search_term.trim().is_empty()) + usize::from(self.active_only)
    }

    pub fn replace_suppliers(&mut self, suppliers: Vec<Supplier>) {
        self.suppliers = suppliers;
        self.is_loaded = true;
        let filtered = self.visible_page().total_elements;
        self.query.clamp_page(filtered);
    }
}

pub fn create_state() -> RwSignal<SupplierListState> {
    RwSignal::new(SupplierListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(id: i64, name: &str, active: bool) -> Supplier {
        Supplier {
            id,
            name: name.to_string(),
            contact_name: None,
            email: None,
            phone: None,
            country: Some("DE".into()),
            rating: None,
            active,
            parts_count: 0,
        }
    }

    #[test]
    fn test_active_only_toggle() {
        let mut state = SupplierListState::default();
        state.replace_suppliers(vec![
            supplier(1, "Acme", true),
            supplier(2, "Bolt", false),
            supplier(3, "Cog", true),
        ]);
        assert_eq!(state.visible_page().total_elements, 3);

        state.set_active_only(true);
        let ids: Vec<i64> = state.visible_page().content.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(state.active_filters_count(), 1);
    }

    #[test]
    fn test_search_and_toggle_combine() {
        let mut state = SupplierListState::default();
        state.replace_suppliers(vec![supplier(1, "Acme", true), supplier(2, "Acme Old", false)]);
        state.set_search("acme".into());
        state.set_active_only(true);
        assert_eq!(state.visible_page().total_elements, 1);
        assert_eq!(state.active_filters_count(), 2);
    }
}
