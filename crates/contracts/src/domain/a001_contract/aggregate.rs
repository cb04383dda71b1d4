use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::list_query::{Filterable, SortValue, Sortable};
use crate::shared::validation::ValidationRules;

// ============================================================================
// Status
// ============================================================================

/// Lifecycle state of a service contract, as tracked by the contract service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Draft,
    PendingSignature,
    Active,
    Expired,
    Terminated,
    #[serde(other)]
    Unknown,
}

impl ContractStatus {
    pub const FILTERABLE: [ContractStatus; 5] = [
        ContractStatus::Draft,
        ContractStatus::PendingSignature,
        ContractStatus::Active,
        ContractStatus::Expired,
        ContractStatus::Terminated,
    ];

    /// Wire value, also used as the `status` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "DRAFT",
            ContractStatus::PendingSignature => "PENDING_SIGNATURE",
            ContractStatus::Active => "ACTIVE",
            ContractStatus::Expired => "EXPIRED",
            ContractStatus::Terminated => "TERMINATED",
            ContractStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::FILTERABLE.into_iter().find(|s| s.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "Draft",
            ContractStatus::PendingSignature => "Pending signature",
            ContractStatus::Active => "Active",
            ContractStatus::Expired => "Expired",
            ContractStatus::Terminated => "Terminated",
            ContractStatus::Unknown => "Unknown",
        }
    }

    /// Badge variant for list rendering.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            ContractStatus::Active => "success",
            ContractStatus::PendingSignature => "warning",
            ContractStatus::Expired | ContractStatus::Terminated => "error",
            ContractStatus::Draft => "primary",
            ContractStatus::Unknown => "neutral",
        }
    }

    /// Transitions the UI offers. The contract service has the final word.
    pub fn allowed_transitions(&self) -> &'static [ContractStatus] {
        match self {
            ContractStatus::Draft => &[ContractStatus::PendingSignature, ContractStatus::Terminated],
            ContractStatus::PendingSignature => &[ContractStatus::Draft, ContractStatus::Terminated],
            ContractStatus::Active => &[ContractStatus::Terminated],
            ContractStatus::Expired | ContractStatus::Terminated | ContractStatus::Unknown => &[],
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, ContractStatus::Draft)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignatureStatus {
    #[default]
    Unsigned,
    Pending,
    Signed,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl SignatureStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SignatureStatus::Unsigned => "Not signed",
            SignatureStatus::Pending => "Awaiting signature",
            SignatureStatus::Signed => "Signed",
            SignatureStatus::Rejected => "Rejected",
            SignatureStatus::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Service/sales contract between the company and a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    pub contract_number: String,
    pub customer_id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub status: ContractStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub signature_status: SignatureStatus,
    #[serde(default)]
    pub description: Option<String>,
}

impl Contract {
    /// Days left until `end_date`; negative once expired.
    pub fn days_until_end(&self, today: NaiveDate) -> Option<i64> {
        self.end_date.map(|end| (end - today).num_days())
    }

    /// Active contracts ending within `window_days` from `today`.
    pub fn is_expiring_soon(&self, today: NaiveDate, window_days: i64) -> bool {
        self.status == ContractStatus::Active
            && self
                .days_until_end(today)
                .is_some_and(|days| (0..=window_days).contains(&days))
    }

    pub fn can_request_signature(&self) -> bool {
        matches!(
            self.status,
            ContractStatus::Draft | ContractStatus::PendingSignature
        ) && !matches!(self.signature_status, SignatureStatus::Signed)
    }
}

impl Filterable for Contract {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.contract_number.as_str()];
        fields.extend(self.customer_name.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }
}

impl Sortable for Contract {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "contractNumber" => SortValue::Text(&self.contract_number),
            "customerName" => self.customer_name.as_deref().into(),
            "status" => SortValue::Text(self.status.label()),
            "startDate" => self.start_date.map_or(SortValue::Missing, SortValue::Date),
            "endDate" => self.end_date.map_or(SortValue::Missing, SortValue::Date),
            "totalValue" => self.total_value.into(),
            _ => SortValue::Missing,
        }
    }
}

// ============================================================================
// DTOs
// ============================================================================

/// Create/update form payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub contract_number: String,
    pub customer_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_value: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ContractDto {
    pub fn from_contract(c: &Contract) -> Self {
        Self {
            id: Some(c.id),
            contract_number: c.contract_number.clone(),
            customer_id: Some(c.customer_id),
            start_date: c.start_date,
            end_date: c.end_date,
            total_value: c.total_value,
            description: c.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_length(3, 40)
            .validate_string(&self.contract_number, "Contract number")?;
        if self.customer_id.is_none() {
            return Err("Customer is required".into());
        }
        match (self.start_date, self.end_date) {
            (None, _) => return Err("Start date is required".into()),
            (Some(start), Some(end)) if end < start => {
                return Err("End date must not be before start date".into())
            }
            _ => {}
        }
        if let Some(value) = self.total_value {
            ValidationRules::none()
                .with_range(0.0, 1e12)
                .validate_number(value, "Total value")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: ContractStatus,
}

/// Ask the signature service to collect a signature for a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    pub contract_id: i64,
    pub signer_name: String,
    pub signer_email: String,
}

impl SignatureRequest {
    pub fn validate(&self) -> Result<(), String> {
        ValidationRules::required()
            .with_length(2, 120)
            .validate_string(&self.signer_name, "Signer name")?;
        ValidationRules::required()
            .with_format(crate::shared::validation::FieldFormat::Email)
            .validate_string(&self.signer_email, "Signer email")
    }
}

/// Result of verifying the digital signature on a contract. Verification is
/// done by the signature service; the client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureVerification {
    pub valid: bool,
    #[serde(default)]
    pub signer_name: Option<String>,
    #[serde(default)]
    pub signed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub certificate_issuer: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> Contract {
        serde_json::from_value(serde_json::json!({
            "id": 11,
            "contractNumber": "SC-2024-011",
            "customerId": 4,
            "customerName": "Northwind Clinic",
            "status": "ACTIVE",
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "totalValue": 12000.0,
            "signatureStatus": "SIGNED"
        }))
        .unwrap()
    }

    #[test]
    fn test_decode_contract() {
        let c = contract();
        assert_eq!(c.status, ContractStatus::Active);
        assert_eq!(c.signature_status, SignatureStatus::Signed);
        assert!(!c.can_request_signature());
    }

    #[test]
    fn test_unknown_status_does_not_fail_decoding() {
        let c: Contract = serde_json::from_value(serde_json::json!({
            "id": 1,
            "contractNumber": "X",
            "customerId": 1,
            "status": "ARCHIVED"
        }))
        .unwrap();
        assert_eq!(c.status, ContractStatus::Unknown);
        assert_eq!(c.signature_status, SignatureStatus::Unsigned);
        assert!(c.status.allowed_transitions().is_empty());
    }

    #[test]
    fn test_expiring_soon() {
        let c = contract();
        let today = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        assert_eq!(c.days_until_end(today), Some(21));
        assert!(c.is_expiring_soon(today, 30));
        assert!(!c.is_expiring_soon(today, 7));
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = ContractDto::from_contract(&contract());
        assert!(dto.validate().is_ok());

        dto.end_date = NaiveDate::from_ymd_opt(2023, 6, 1);
        assert_eq!(
            dto.validate().unwrap_err(),
            "End date must not be before start date"
        );

        dto.contract_number = "X".into();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_status_parse_roundtrip() {
        for status in ContractStatus::FILTERABLE {
            assert_eq!(ContractStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ContractStatus::parse("nope"), None);
    }

    #[test]
    fn test_signature_request_validation() {
        let req = SignatureRequest {
            contract_id: 1,
            signer_name: "Dana Reyes".into(),
            signer_email: "dana@northwind.example".into(),
        };
        assert!(req.validate().is_ok());
        let bad = SignatureRequest {
            signer_email: "dana".into(),
            ..req
        };
        assert!(bad.validate().is_err());
    }
}
