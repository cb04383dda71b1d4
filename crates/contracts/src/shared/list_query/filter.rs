use serde::{Deserialize, Serialize};

use super::sort::SortOrder;

/// Record that can be narrowed by a [`FilterState`].
///
/// Only `search_fields` is required. Records without stock information keep
/// the defaults, which makes every stock related filter exclude them once the
/// filter is set, and leaves them untouched while it is neutral.
pub trait Filterable {
    /// Text fields matched by the free-text search (name, model, code, ...).
    fn search_fields(&self) -> Vec<&str>;

    /// Warehouse or site the record belongs to.
    fn location(&self) -> Option<&str> {
        None
    }

    fn stock_quantity(&self) -> Option<i64> {
        None
    }

    fn unit_cost(&self) -> Option<f64> {
        None
    }

    /// Server-computed flag, trusted as-is.
    fn is_low_stock(&self) -> bool {
        false
    }

    /// Server-computed flag, trusted as-is.
    fn is_out_of_stock(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [
        StockStatus::All,
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
    ];

    /// Value used in `<select>` options and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::All => "all",
            StockStatus::InStock => "in-stock",
            StockStatus::LowStock => "low-stock",
            StockStatus::OutOfStock => "out-of-stock",
        }
    }

    /// Unknown values fall back to `All`.
    pub fn parse(value: &str) -> Self {
        match value {
            "in-stock" => StockStatus::InStock,
            "low-stock" => StockStatus::LowStock,
            "out-of-stock" => StockStatus::OutOfStock,
            _ => StockStatus::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::All => "All",
            StockStatus::InStock => "In stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::OutOfStock => "Out of stock",
        }
    }

    /// Server flags are taken as-is. `InStock` means a healthy level: neither
    /// low nor out of stock.
    fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        match self {
            StockStatus::All => true,
            StockStatus::InStock => !item.is_low_stock() && !item.is_out_of_stock(),
            StockStatus::LowStock => item.is_low_stock(),
            StockStatus::OutOfStock => item.is_out_of_stock(),
        }
    }
}

/// Filter dimension that can be shown as a chip and cleared on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Search,
    StockStatus,
    Location,
    StockRange,
    CostRange,
}

/// Filter and sort settings of a list page.
///
/// All numeric bounds are inclusive; `None` leaves that side unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub search_term: String,
    pub stock_status: StockStatus,
    /// `None` stands for "all locations".
    pub location: Option<String>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            stock_status: StockStatus::All,
            location: None,
            min_stock: None,
            max_stock: None,
            min_cost: None,
            max_cost: None,
            sort_by: "name".to_string(),
            sort_order: SortOrder::Asc,
        }
    }
}

impl FilterState {
    /// Restore neutral filters, keeping the current sort settings.
    pub fn reset(&mut self) {
        let sort_by = std::mem::take(&mut self.sort_by);
        let sort_order = self.sort_order;
        *self = Self {
            sort_by,
            sort_order,
            ..Self::default()
        };
    }

    fn search_needle(&self) -> Option<String> {
        let term = self.search_term.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    fn location_filter(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("all"))
    }

    /// Dimensions that deviate from their neutral value, in display order.
    pub fn active_dimensions(&self) -> Vec<FilterDimension> {
        let mut dims = Vec::new();
        if self.search_needle().is_some() {
            dims.push(FilterDimension::Search);
        }
        if self.stock_status != StockStatus::All {
            dims.push(FilterDimension::StockStatus);
        }
        if self.location_filter().is_some() {
            dims.push(FilterDimension::Location);
        }
        if self.min_stock.is_some() || self.max_stock.is_some() {
            dims.push(FilterDimension::StockRange);
        }
        if self.min_cost.is_some() || self.max_cost.is_some() {
            dims.push(FilterDimension::CostRange);
        }
        dims
    }

    pub fn clear(&mut self, dim: FilterDimension) {
        match dim {
            FilterDimension::Search => self.search_term.clear(),
            FilterDimension::StockStatus => self.stock_status = StockStatus::All,
            FilterDimension::Location => self.location = None,
            FilterDimension::StockRange => {
                self.min_stock = None;
                self.max_stock = None;
            }
            FilterDimension::CostRange => {
                self.min_cost = None;
                self.max_cost = None;
            }
        }
    }

    /// Chip text for an active dimension.
    pub fn label(&self, dim: FilterDimension) -> String {
        match dim {
            FilterDimension::Search => format!("Search: {}", self.search_term.trim()),
            FilterDimension::StockStatus => format!("Status: {}", self.stock_status.label()),
            FilterDimension::Location => {
                format!("Location: {}", self.location_filter().unwrap_or_default())
            }
            FilterDimension::StockRange => {
                format!("Stock: {}", range_label(self.min_stock, self.max_stock))
            }
            FilterDimension::CostRange => {
                format!("Cost: {}", range_label(self.min_cost, self.max_cost))
            }
        }
    }

    /// True if `item` passes every active predicate.
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        if let Some(needle) = self.search_needle() {
            let hit = item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if !self.stock_status.matches(item) {
            return false;
        }

        if let Some(location) = self.location_filter() {
            if item.location().map(str::trim) != Some(location) {
                return false;
            }
        }

        if self.min_stock.is_some() || self.max_stock.is_some() {
            match item.stock_quantity() {
                Some(qty) if in_range(qty, self.min_stock, self.max_stock) => {}
                _ => return false,
            }
        }

        if self.min_cost.is_some() || self.max_cost.is_some() {
            match item.unit_cost() {
                Some(cost) if in_range(cost, self.min_cost, self.max_cost) => {}
                _ => return false,
            }
        }

        true
    }
}

fn in_range<V: PartialOrd>(value: V, min: Option<V>, max: Option<V>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

fn range_label<V: std::fmt::Display>(min: Option<V>, max: Option<V>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min} – {max}"),
        (Some(min), None) => format!("≥ {min}"),
        (None, Some(max)) => format!("≤ {max}"),
        (None, None) => String::new(),
    }
}

/// Keep the items passing all active filters, preserving their order.
pub fn apply_filters<T: Filterable + Clone>(items: &[T], filters: &FilterState) -> Vec<T> {
    items
        .iter()
        .filter(|item| filters.matches(*item))
        .cloned()
        .collect()
}

/// Number of filter dimensions away from their neutral value. Sort settings
/// never count.
pub fn count_active_filters(filters: &FilterState) -> usize {
    filters.active_dimensions().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Part {
        name: String,
        model: String,
        location: Option<String>,
        stock: i64,
        cost: f64,
        low: bool,
        out: bool,
    }

    impl Filterable for Part {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name.as_str(), self.model.as_str()]
        }
        fn location(&self) -> Option<&str> {
            self.location.as_deref()
        }
        fn stock_quantity(&self) -> Option<i64> {
            Some(self.stock)
        }
        fn unit_cost(&self) -> Option<f64> {
            Some(self.cost)
        }
        fn is_low_stock(&self) -> bool {
            self.low
        }
        fn is_out_of_stock(&self) -> bool {
            self.out
        }
    }

    fn part(name: &str, location: Option<&str>, stock: i64, cost: f64) -> Part {
        Part {
            name: name.to_string(),
            model: format!("{name}-M"),
            location: location.map(String::from),
            stock,
            cost,
            ..Part::default()
        }
    }

    fn sample() -> Vec<Part> {
        vec![
            Part { low: true, ..part("Toner", Some("A1"), 5, 12.5) },
            Part { out: true, ..part("Drum", Some("B2"), 0, 80.0) },
            part("Fuser", None, 50, 45.0),
        ]
    }

    #[test]
    fn test_default_filters_are_noop() {
        let items = sample();
        assert_eq!(apply_filters(&items, &FilterState::default()), items);
        assert_eq!(count_active_filters(&FilterState::default()), 0);
    }

    #[test]
    fn test_low_stock_filter() {
        let filters = FilterState {
            stock_status: StockStatus::LowStock,
            ..FilterState::default()
        };
        let result = apply_filters(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Toner");
    }

    #[test]
    fn test_in_and_out_of_stock() {
        let in_stock = FilterState {
            stock_status: StockStatus::InStock,
            ..FilterState::default()
        };
        let names: Vec<_> = apply_filters(&sample(), &in_stock)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Fuser"]);

        let out = FilterState {
            stock_status: StockStatus::OutOfStock,
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&sample(), &out)[0].name, "Drum");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let filters = FilterState {
            search_term: "  fUSER-m ".to_string(),
            ..FilterState::default()
        };
        let result = apply_filters(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Fuser");
    }

    #[test]
    fn test_location_filter_excludes_missing_location() {
        let filters = FilterState {
            location: Some("A1".to_string()),
            ..FilterState::default()
        };
        let result = apply_filters(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Toner");

        let all = FilterState {
            location: Some("all".to_string()),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&sample(), &all).len(), 3);
        assert_eq!(count_active_filters(&all), 0);
    }

    #[test]
    fn test_location_filter_ignores_stored_whitespace() {
        let items = vec![part("Toner", Some("A1 "), 5, 12.5), part("Drum", Some(" B2"), 0, 80.0)];
        let filters = FilterState {
            location: Some("A1".to_string()),
            ..FilterState::default()
        };
        let result = apply_filters(&items, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Toner");
    }

    #[test]
    fn test_low_stock_trusts_server_flag() {
        let both = Part {
            low: true,
            out: true,
            ..part("Belt", Some("C3"), 0, 9.0)
        };
        let low = FilterState {
            stock_status: StockStatus::LowStock,
            ..FilterState::default()
        };
        let out = FilterState {
            stock_status: StockStatus::OutOfStock,
            ..FilterState::default()
        };
        assert!(low.matches(&both));
        assert!(out.matches(&both));
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let filters = FilterState {
            min_stock: Some(5),
            max_stock: Some(50),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&sample(), &filters).len(), 2);

        let filters = FilterState {
            max_cost: Some(45.0),
            ..FilterState::default()
        };
        let names: Vec<_> = apply_filters(&sample(), &filters)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Toner", "Fuser"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let filters = FilterState {
            search_term: "r".to_string(),
            min_cost: Some(40.0),
            stock_status: StockStatus::InStock,
            ..FilterState::default()
        };
        let result = apply_filters(&sample(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Fuser");
    }

    #[test]
    fn test_missing_numeric_field_fails_set_range() {
        struct Plain(&'static str);
        impl Filterable for Plain {
            fn search_fields(&self) -> Vec<&str> {
                vec![self.0]
            }
        }
        let filters = FilterState {
            min_stock: Some(0),
            ..FilterState::default()
        };
        assert!(!filters.matches(&Plain("x")));
        assert!(FilterState::default().matches(&Plain("x")));
    }

    #[test]
    fn test_active_count_and_clear() {
        let mut filters = FilterState {
            search_term: "abc".to_string(),
            stock_status: StockStatus::OutOfStock,
            min_stock: Some(1),
            max_stock: Some(9),
            max_cost: Some(3.0),
            sort_by: "unitCost".to_string(),
            sort_order: SortOrder::Desc,
            ..FilterState::default()
        };
        assert_eq!(count_active_filters(&filters), 4);
        assert_eq!(filters.label(FilterDimension::StockRange), "Stock: 1 – 9");
        assert_eq!(filters.label(FilterDimension::CostRange), "Cost: ≤ 3");

        filters.clear(FilterDimension::StockRange);
        assert_eq!(count_active_filters(&filters), 3);

        filters.reset();
        assert_eq!(count_active_filters(&filters), 0);
        assert_eq!(filters.sort_by, "unitCost");
        assert_eq!(filters.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_stock_status_parse() {
        for status in StockStatus::ALL {
            assert_eq!(StockStatus::parse(status.as_str()), status);
        }
        assert_eq!(StockStatus::parse("bogus"), StockStatus::All);
    }
}
