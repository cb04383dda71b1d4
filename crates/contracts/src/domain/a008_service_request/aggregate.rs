use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a007_task::aggregate::Priority;
use crate::shared::list_query::{Filterable, SortValue, Sortable};
use crate::shared::validation::ValidationRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceRequestStatus {
    New,
    InReview,
    Scheduled,
    InProgress,
    Resolved,
    Closed,
    #[serde(other)]
    Unknown,
}

impl ServiceRequestStatus {
    pub const FILTERABLE: [ServiceRequestStatus; 6] = [
        ServiceRequestStatus::New,
        ServiceRequestStatus::InReview,
        ServiceRequestStatus::Scheduled,
        ServiceRequestStatus::InProgress,
        ServiceRequestStatus::Resolved,
        ServiceRequestStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRequestStatus::New => "NEW",
            ServiceRequestStatus::InReview => "IN_REVIEW",
            ServiceRequestStatus::Scheduled => "SCHEDULED",
            ServiceRequestStatus::InProgress => "IN_PROGRESS",
            ServiceRequestStatus::Resolved => "RESOLVED",
            ServiceRequestStatus::Closed => "CLOSED",
            ServiceRequestStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::FILTERABLE.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceRequestStatus::New => "New",
            ServiceRequestStatus::InReview => "In review",
            ServiceRequestStatus::Scheduled => "Scheduled",
            ServiceRequestStatus::InProgress => "In progress",
            ServiceRequestStatus::Resolved => "Resolved",
            ServiceRequestStatus::Closed => "Closed",
            ServiceRequestStatus::Unknown => "Unknown",
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(
            self,
            ServiceRequestStatus::Resolved | ServiceRequestStatus::Closed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub device_serial: Option<String>,
    pub description: String,
    pub status: ServiceRequestStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Filterable for ServiceRequest {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        fields.extend(self.customer_name.as_deref());
        fields.extend(self.device_serial.as_deref());
        fields
    }
}

impl Sortable for ServiceRequest {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "customerName" => self.customer_name.as_deref().into(),
            "status" => SortValue::Text(self.status.as_str()),
            "priority" => SortValue::Number(self.priority as u8 as f64),
            "createdAt" => self.created_at.map_or(SortValue::Missing, SortValue::DateTime),
            _ => SortValue::Missing,
        }
    }
}

/// Form payload for opening a service request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestDto {
    pub customer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<i64>,
    pub description: String,
    pub priority: Priority,
}

impl ServiceRequestDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.customer_id.is_none() {
            return Err("Customer is required".into());
        }
        ValidationRules::required()
            .with_length(10, 2000)
            .validate_string(&self.description, "Description")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_validation() {
        let mut dto = ServiceRequestDto::default();
        assert_eq!(dto.validate().unwrap_err(), "Customer is required");

        dto.customer_id = Some(4);
        dto.description = "jam".into();
        assert!(dto.validate().is_err());

        dto.description = "Paper jams on every second sheet".into();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_decode_and_unknown_status() {
        let req: ServiceRequest = serde_json::from_value(serde_json::json!({
            "id": 1,
            "customerId": 4,
            "description": "Noise from drum",
            "status": "ESCALATED",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(req.status, ServiceRequestStatus::Unknown);
        assert_eq!(req.priority, Priority::Medium);
        assert!(req.status.is_open());
    }
}
