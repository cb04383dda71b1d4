use serde::{Deserialize, Serialize};

use crate::shared::list_query::{Filterable, SortValue, Sortable};
use crate::shared::validation::{FieldFormat, ValidationRules};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub devices_count: u32,
    #[serde(default)]
    pub active_contracts: u32,
}

impl Filterable for Customer {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.phone.as_deref());
        fields.extend(self.city.as_deref());
        fields
    }

    fn location(&self) -> Option<&str> {
        self.city.as_deref()
    }
}

impl Sortable for Customer {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "name" => SortValue::Text(&self.name),
            "email" => self.email.as_deref().into(),
            "city" => self.city.as_deref().into(),
            "devicesCount" => SortValue::Number(f64::from(self.devices_count)),
            "activeContracts" => SortValue::Number(f64::from(self.active_contracts)),
            _ => SortValue::Missing,
        }
    }
}

/// Create/update form payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl CustomerDto {
    pub fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_length(2, 200)
            .validate_string(&self.name, "Name")?;
        ValidationRules::required()
            .with_format(FieldFormat::Email)
            .validate_string(&self.email, "Email")?;
        ValidationRules::none()
            .with_format(FieldFormat::Phone)
            .validate_string(&self.phone, "Phone")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_search_fields_skip_missing() {
        let c = Customer {
            id: 1,
            name: "Harbor Dental".into(),
            email: None,
            phone: Some("+1 555 0100".into()),
            address: None,
            city: Some("Porto".into()),
            devices_count: 3,
            active_contracts: 1,
        };
        assert_eq!(c.search_fields(), vec!["Harbor Dental", "+1 555 0100", "Porto"]);
    }

    #[test]
    fn test_dto_validation() {
        let dto = CustomerDto {
            name: "Harbor Dental".into(),
            email: "desk@harbor.example".into(),
            ..CustomerDto::default()
        };
        assert!(dto.validate().is_ok());
        let bad = CustomerDto {
            phone: "call me".into(),
            ..dto
        };
        assert!(bad.validate().is_err());
    }
}
