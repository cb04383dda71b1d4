use serde::{Deserialize, Serialize};

use crate::shared::list_query::{Filterable, SortValue, Sortable};

// ============================================================================
// Canonical type
// ============================================================================

/// Spare part as used everywhere in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    pub id: i64,
    pub name: String,
    pub part_number: String,
    pub compatible_models: Vec<String>,
    pub stock_quantity: i64,
    pub unit_price: f64,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub location: Option<String>,
    pub is_low_stock: bool,
}

impl Filterable for SparePart {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.part_number.as_str()];
        fields.extend(self.compatible_models.iter().map(String::as_str));
        fields.extend(self.supplier_name.as_deref());
        fields
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn stock_quantity(&self) -> Option<i64> {
        Some(self.stock_quantity)
    }

    fn unit_cost(&self) -> Option<f64> {
        Some(self.unit_price)
    }

    fn is_low_stock(&self) -> bool {
        self.is_low_stock
    }

    fn is_out_of_stock(&self) -> bool {
        self.stock_quantity <= 0
    }
}

impl Sortable for SparePart {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "name" => SortValue::Text(&self.name),
            "partNumber" => SortValue::Text(&self.part_number),
            "supplierName" => self.supplier_name.as_deref().into(),
            "stockQuantity" => SortValue::Number(self.stock_quantity as f64),
            "unitPrice" => SortValue::Number(self.unit_price),
            _ => SortValue::Missing,
        }
    }
}

// ============================================================================
// Wire shape
// ============================================================================

/// `compatibleModels` arrives either as a list or as one comma separated
/// string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModelList {
    List(Vec<String>),
    Joined(String),
}

impl ModelList {
    fn into_vec(self) -> Vec<String> {
        match self {
            ModelList::List(models) => models,
            ModelList::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

/// Spare part exactly as the spare-parts and supplier services send it.
/// Different endpoints use different field names for the same data; every
/// alternative is captured here and resolved once by [`RawSparePart::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSparePart {
    pub spare_part_id: Option<i64>,
    pub id: Option<i64>,
    pub part_name: Option<String>,
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub code: Option<String>,
    pub compatible_models: Option<ModelList>,
    pub stock_quantity: Option<i64>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub price: Option<f64>,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub warehouse_location: Option<String>,
    pub location: Option<String>,
    pub min_stock_level: Option<i64>,
    pub is_low_stock: Option<bool>,
}

impl RawSparePart {
    /// Map onto the canonical type. Records without any id are dropped.
    pub fn normalize(self) -> Option<SparePart> {
        let id = self.spare_part_id.or(self.id)?;
        let stock_quantity = self.stock_quantity.or(self.quantity).unwrap_or(0);
        let is_low_stock = self.is_low_stock.unwrap_or_else(|| {
            self.min_stock_level
                .is_some_and(|min| stock_quantity > 0 && stock_quantity <= min)
        });
        let part_number = self.part_number.or(self.code).unwrap_or_default();
        let name = self
            .part_name
            .or(self.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| part_number.clone());

        Some(SparePart {
            id,
            name,
            part_number,
            compatible_models: self
                .compatible_models
                .map(ModelList::into_vec)
                .unwrap_or_default(),
            stock_quantity,
            unit_price: self.unit_price.or(self.price).unwrap_or(0.0),
            supplier_id: self.supplier_id,
            supplier_name: self.supplier_name,
            location: self.warehouse_location.or(self.location),
            is_low_stock,
        })
    }
}

/// Normalise a whole response, dropping records without an id.
pub fn normalize_all(raw: Vec<RawSparePart>) -> Vec<SparePart> {
    raw.into_iter().filter_map(RawSparePart::normalize).collect()
}

// ============================================================================
// Export
// ============================================================================

/// Column selectable in the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportColumn {
    PartNumber,
    Name,
    CompatibleModels,
    StockQuantity,
    UnitPrice,
    Supplier,
    Location,
}

impl ExportColumn {
    pub const ALL: [ExportColumn; 7] = [
        ExportColumn::PartNumber,
        ExportColumn::Name,
        ExportColumn::CompatibleModels,
        ExportColumn::StockQuantity,
        ExportColumn::UnitPrice,
        ExportColumn::Supplier,
        ExportColumn::Location,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            ExportColumn::PartNumber => "Part number",
            ExportColumn::Name => "Name",
            ExportColumn::CompatibleModels => "Compatible models",
            ExportColumn::StockQuantity => "Stock",
            ExportColumn::UnitPrice => "Unit price",
            ExportColumn::Supplier => "Supplier",
            ExportColumn::Location => "Location",
        }
    }

    pub fn value(&self, part: &SparePart) -> String {
        match self {
            ExportColumn::PartNumber => part.part_number.clone(),
            ExportColumn::Name => part.name.clone(),
            ExportColumn::CompatibleModels => part.compatible_models.join(", "),
            ExportColumn::StockQuantity => part.stock_quantity.to_string(),
            ExportColumn::UnitPrice => format!("{:.2}", part.unit_price),
            ExportColumn::Supplier => part.supplier_name.clone().unwrap_or_default(),
            ExportColumn::Location => part.location.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_alternate_field_names() {
        let raw: Vec<RawSparePart> = serde_json::from_value(serde_json::json!([
            {
                "sparePartId": 7,
                "partName": "Paper feed roller",
                "partNumber": "PFR-7",
                "compatibleModels": ["LX-200", "LX-300"],
                "stockQuantity": 12,
                "unitPrice": 8.5,
                "warehouseLocation": "WH-A"
            },
            {
                "id": 8,
                "name": "Belt",
                "code": "BLT-8",
                "compatibleModels": "LX-200, MX-10 ,",
                "quantity": 2,
                "price": 31.0,
                "location": "WH-C",
                "minStockLevel": 5
            },
            { "name": "orphan" }
        ]))
        .unwrap();

        let parts = normalize_all(raw);
        assert_eq!(parts.len(), 2);

        assert_eq!(parts[0].id, 7);
        assert_eq!(parts[0].name, "Paper feed roller");
        assert_eq!(parts[0].location.as_deref(), Some("WH-A"));
        assert!(!parts[0].is_low_stock);

        assert_eq!(parts[1].id, 8);
        assert_eq!(parts[1].part_number, "BLT-8");
        assert_eq!(parts[1].compatible_models, vec!["LX-200", "MX-10"]);
        assert_eq!(parts[1].stock_quantity, 2);
        assert_eq!(parts[1].unit_price, 31.0);
        assert!(parts[1].is_low_stock);
    }

    #[test]
    fn test_name_falls_back_to_part_number() {
        let raw = RawSparePart {
            id: Some(1),
            part_number: Some("X-1".into()),
            name: Some("  ".into()),
            ..RawSparePart::default()
        };
        let part = raw.normalize().unwrap();
        assert_eq!(part.name, "X-1");
        assert!(part.is_out_of_stock());
    }

    #[test]
    fn test_export_values() {
        let part = RawSparePart {
            id: Some(3),
            name: Some("Gear".into()),
            unit_price: Some(2.0),
            ..RawSparePart::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(ExportColumn::UnitPrice.value(&part), "2.00");
        assert_eq!(ExportColumn::Supplier.value(&part), "");
    }
}
