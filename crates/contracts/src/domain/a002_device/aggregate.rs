use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::list_query::{Filterable, SortValue, Sortable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Active,
    InRepair,
    Decommissioned,
    #[serde(other)]
    Unknown,
}

impl DeviceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::InRepair => "In repair",
            DeviceStatus::Decommissioned => "Decommissioned",
            DeviceStatus::Unknown => "Unknown",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "success",
            DeviceStatus::InRepair => "warning",
            DeviceStatus::Decommissioned => "neutral",
            DeviceStatus::Unknown => "neutral",
        }
    }
}

/// Device installed at (or sold to) a customer, optionally covered by a
/// service contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub serial_number: String,
    pub model: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub contract_id: Option<i64>,
    #[serde(default)]
    pub contract_number: Option<String>,
    pub status: DeviceStatus,
    #[serde(default)]
    pub installed_at: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Filterable for Device {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.serial_number.as_str(), self.model.as_str()];
        fields.extend(self.manufacturer.as_deref());
        fields.extend(self.customer_name.as_deref());
        fields.extend(self.location.as_deref());
        fields
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl Sortable for Device {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "serialNumber" => SortValue::Text(&self.serial_number),
            "model" => SortValue::Text(&self.model),
            "customerName" => self.customer_name.as_deref().into(),
            "status" => SortValue::Text(self.status.label()),
            "installedAt" => self.installed_at.map_or(SortValue::Missing, SortValue::Date),
            _ => SortValue::Missing,
        }
    }
}

/// Heading of a contract group in the device list.
pub fn contract_group_title(contract_id: Option<i64>, sample: Option<&Device>) -> String {
    match contract_id {
        Some(id) => match sample.and_then(|d| d.contract_number.as_deref()) {
            Some(number) => format!("Contract {number}"),
            None => format!("Contract #{id}"),
        },
        None => "No contract".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_query::group_by_key;

    fn device(id: i64, contract_id: Option<i64>) -> Device {
        Device {
            id,
            serial_number: format!("SN-{id:04}"),
            model: "LX-200".into(),
            manufacturer: None,
            customer_id: Some(1),
            customer_name: None,
            contract_id,
            contract_number: contract_id.map(|c| format!("SC-{c}")),
            status: DeviceStatus::Active,
            installed_at: None,
            location: None,
        }
    }

    #[test]
    fn test_group_devices_by_contract() {
        let devices = vec![
            device(1, Some(2)),
            device(2, None),
            device(3, Some(1)),
            device(4, Some(2)),
        ];
        let groups = group_by_key(&devices, |d| d.contract_id);
        let titles: Vec<_> = groups
            .iter()
            .map(|g| contract_group_title(g.key, g.items.first()))
            .collect();
        assert_eq!(titles, vec!["Contract SC-1", "Contract SC-2", "No contract"]);
    }

    #[test]
    fn test_decode_minimal_device() {
        let d: Device = serde_json::from_value(serde_json::json!({
            "id": 5,
            "serialNumber": "SN-5",
            "model": "LX-200",
            "status": "IN_REPAIR"
        }))
        .unwrap();
        assert_eq!(d.status, DeviceStatus::InRepair);
        assert_eq!(d.contract_id, None);
    }
}
