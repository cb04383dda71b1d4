use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::shared::list_query::{Filterable, SortValue, Sortable};

/// Stock line held by the inventory service. `is_low_stock` and
/// `is_out_of_stock` are computed server-side and trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    pub code: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub warehouse_location: Option<String>,
    pub stock_quantity: i64,
    pub unit_cost: f64,
    #[serde(default)]
    pub min_stock_level: Option<i64>,
    #[serde(default)]
    pub is_low_stock: bool,
    #[serde(default)]
    pub is_out_of_stock: bool,
}

impl InventoryItem {
    pub fn stock_value(&self) -> f64 {
        self.stock_quantity as f64 * self.unit_cost
    }

    pub fn stock_badge(&self) -> (&'static str, &'static str) {
        if self.is_out_of_stock {
            ("error", "Out of stock")
        } else if self.is_low_stock {
            ("warning", "Low stock")
        } else {
            ("success", "In stock")
        }
    }
}

impl Filterable for InventoryItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.code.as_str()];
        fields.extend(self.model.as_deref());
        fields.extend(self.warehouse_location.as_deref());
        fields
    }

    fn location(&self) -> Option<&str> {
        self.warehouse_location.as_deref()
    }

    fn stock_quantity(&self) -> Option<i64> {
        Some(self.stock_quantity)
    }

    fn unit_cost(&self) -> Option<f64> {
        Some(self.unit_cost)
    }

    fn is_low_stock(&self) -> bool {
        self.is_low_stock
    }

    fn is_out_of_stock(&self) -> bool {
        self.is_out_of_stock
    }
}

impl Sortable for InventoryItem {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "name" => SortValue::Text(&self.name),
            "code" => SortValue::Text(&self.code),
            "model" => self.model.as_deref().into(),
            "warehouseLocation" => self.warehouse_location.as_deref().into(),
            "stockQuantity" => SortValue::Number(self.stock_quantity as f64),
            "unitCost" => SortValue::Number(self.unit_cost),
            "stockValue" => SortValue::Number(self.stock_value()),
            _ => SortValue::Missing,
        }
    }
}

/// Summary cards above the inventory table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InventorySummary {
    pub total_items: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_value: f64,
}

impl InventorySummary {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.total_items += 1;
            if item.is_out_of_stock {
                acc.out_of_stock += 1;
            }
            if item.is_low_stock {
                acc.low_stock += 1;
            }
            acc.total_value += item.stock_value();
            acc
        })
    }
}

/// Sorted distinct warehouse locations for the location filter.
pub fn distinct_locations(items: &[InventoryItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|i| i.warehouse_location.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::{apply_filters, FilterState, ListQuery, StockStatus};

    fn item(id: i64, name: &str, location: Option<&str>, qty: i64, cost: f64) -> InventoryItem {
        InventoryItem {
            id,
            name: name.into(),
            model: None,
            code: format!("P-{id}"),
            category: None,
            warehouse_location: location.map(String::from),
            stock_quantity: qty,
            unit_cost: cost,
            min_stock_level: Some(10),
            is_low_stock: qty > 0 && qty < 10,
            is_out_of_stock: qty == 0,
        }
    }

    fn items() -> Vec<InventoryItem> {
        vec![
            item(1, "Toner cartridge", Some("WH-A"), 5, 30.0),
            item(2, "Imaging drum", Some("WH-B"), 0, 120.0),
            item(3, "Fuser unit", None, 50, 75.5),
        ]
    }

    #[test]
    fn test_low_stock_scenario() {
        let filters = FilterState {
            stock_status: StockStatus::LowStock,
            ..FilterState::default()
        };
        let result = apply_filters(&items(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_decode_with_server_flags() {
        let item: InventoryItem = serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "Roller",
            "code": "R-9",
            "stockQuantity": 3,
            "unitCost": 4.25,
            "isLowStock": true
        }))
        .unwrap();
        assert!(item.is_low_stock);
        assert!(!item.is_out_of_stock);
        assert_eq!(item.warehouse_location, None);
    }

    #[test]
    fn test_summary_and_locations() {
        let summary = InventorySummary::from_items(&items());
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.out_of_stock, 1);
        assert!((summary.total_value - (150.0 + 3775.0)).abs() < 1e-9);
        assert_eq!(distinct_locations(&items()), vec!["WH-A", "WH-B"]);
    }

    #[test]
    fn test_every_location_option_keeps_its_items() {
        let items = vec![
            item(1, "Toner cartridge", Some("A1 "), 5, 30.0),
            item(2, "Imaging drum", Some("  B2"), 0, 120.0),
            item(3, "Fuser unit", Some("A1"), 50, 75.5),
        ];
        let options = distinct_locations(&items);
        assert_eq!(options, vec!["A1", "B2"]);

        for option in options {
            let filters = FilterState {
                location: Some(option.clone()),
                ..FilterState::default()
            };
            let expected = items
                .iter()
                .filter(|i| i.warehouse_location.as_deref().map(str::trim) == Some(option.as_str()))
                .count();
            assert!(expected > 0);
            assert_eq!(apply_filters(&items, &filters).len(), expected);
        }
    }

    #[test]
    fn test_query_sorts_by_cost_desc() {
        let mut query = ListQuery::default();
        query.toggle_sort("unitCost");
        query.toggle_sort("unitCost");
        let page = query.run(&items());
        let ids: Vec<_> = page.content.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
