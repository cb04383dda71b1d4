use serde::{Deserialize, Serialize};

use crate::shared::list_query::{Filterable, SortValue, Sortable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// 0..=5, absent for suppliers never rated.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub parts_count: u32,
}

fn default_active() -> bool {
    true
}

impl Supplier {
    /// Rating rendered as five stars, e.g. `★★★☆☆`.
    pub fn rating_stars(&self) -> String {
        let filled = self
            .rating
            .map(|r| r.clamp(0.0, 5.0).round() as usize)
            .unwrap_or(0);
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl Filterable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.contact_name.as_deref());
        fields.extend(self.email.as_deref());
        fields.extend(self.country.as_deref());
        fields
    }

    fn location(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

impl Sortable for Supplier {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "name" => SortValue::Text(&self.name),
            "contactName" => self.contact_name.as_deref().into(),
            "country" => self.country.as_deref().into(),
            "rating" => self.rating.into(),
            "partsCount" => SortValue::Number(f64::from(self.parts_count)),
            "active" => SortValue::Bool(self.active),
            _ => SortValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_stars() {
        let s: Supplier = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Acme Parts",
            "rating": 3.6
        }))
        .unwrap();
        assert!(s.active);
        assert_eq!(s.rating_stars(), "★★★★☆");

        let unrated = Supplier { rating: None, ..s };
        assert_eq!(unrated.rating_stars(), "☆☆☆☆☆");
    }
}
