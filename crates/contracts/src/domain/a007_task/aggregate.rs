use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::shared::list_query::{locale_compare, Filterable, SortValue, Sortable};

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Priority::Low => "neutral",
            Priority::Medium => "primary",
            Priority::High => "warning",
            Priority::Urgent => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::Assigned => "Assigned",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Task
// ============================================================================

/// Field task for a technician, usually spawned from a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub service_request_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub required_skill: Option<String>,
    #[serde(default)]
    pub technician_id: Option<i64>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TechnicianTask {
    pub fn is_unassigned(&self) -> bool {
        self.technician_id.is_none()
            && matches!(self.status, TaskStatus::Open | TaskStatus::Unknown)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !matches!(self.status, TaskStatus::Completed | TaskStatus::Cancelled)
            && self.due_date.is_some_and(|due| due < today)
    }
}

impl Filterable for TechnicianTask {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.customer_name.as_deref());
        fields.extend(self.technician_name.as_deref());
        fields
    }
}

impl Sortable for TechnicianTask {
    fn sort_value(&self, field: &str) -> SortValue<'_> {
        match field {
            "title" => SortValue::Text(&self.title),
            "priority" => SortValue::Number(self.priority as u8 as f64),
            "dueDate" => self.due_date.map_or(SortValue::Missing, SortValue::Date),
            "customerName" => self.customer_name.as_deref().into(),
            _ => SortValue::Missing,
        }
    }
}

// ============================================================================
// Technician
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub active_tasks: u32,
    pub max_tasks: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Technician {
    /// Share of capacity in use, 0..=100. A technician with no capacity is
    /// reported as fully loaded.
    pub fn workload_percent(&self) -> u32 {
        if self.max_tasks == 0 {
            return 100;
        }
        (self.active_tasks.saturating_mul(100) / self.max_tasks).min(100)
    }

    pub fn has_capacity(&self) -> bool {
        self.available && self.active_tasks < self.max_tasks
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    pub fn workload_variant(&self) -> &'static str {
        match self.workload_percent() {
            0..=59 => "success",
            60..=89 => "warning",
            _ => "error",
        }
    }
}

/// Order technicians for the assignment picker: those able to take the
/// task first (matching skill before others), then by lowest workload, then
/// by name. Technicians without capacity go last.
pub fn rank_technicians(technicians: &[Technician], required_skill: Option<&str>) -> Vec<Technician> {
    let mut ranked = technicians.to_vec();
    ranked.sort_by(|a, b| {
        b.has_capacity()
            .cmp(&a.has_capacity())
            .then_with(|| match required_skill {
                Some(skill) => b.has_skill(skill).cmp(&a.has_skill(skill)),
                None => Ordering::Equal,
            })
            .then_with(|| a.workload_percent().cmp(&b.workload_percent()))
            .then_with(|| locale_compare(&a.name, &b.name))
    });
    ranked
}

/// POST body for assigning a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    pub task_id: i64,
    pub technician_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech(id: i64, name: &str, active: u32, max: u32, skills: &[&str]) -> Technician {
        Technician {
            id,
            name: name.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            active_tasks: active,
            max_tasks: max,
            available: true,
        }
    }

    #[test]
    fn test_workload() {
        assert_eq!(tech(1, "a", 3, 4, &[]).workload_percent(), 75);
        assert_eq!(tech(1, "a", 9, 4, &[]).workload_percent(), 100);
        assert_eq!(tech(1, "a", 0, 0, &[]).workload_percent(), 100);
        assert!(!tech(1, "a", 4, 4, &[]).has_capacity());
    }

    #[test]
    fn test_rank_technicians() {
        let techs = vec![
            tech(1, "Full", 5, 5, &["printers"]),
            tech(2, "Busy", 3, 4, &["printers"]),
            tech(3, "Idle", 0, 4, &["scanners"]),
            tech(4, "Also idle", 0, 4, &["Printers"]),
        ];
        let ids: Vec<_> = rank_technicians(&techs, Some("printers"))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);

        let ids: Vec<_> = rank_technicians(&techs, None).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_task_flags() {
        let task: TechnicianTask = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Replace fuser",
            "status": "OPEN",
            "priority": "HIGH",
            "dueDate": "2024-05-01"
        }))
        .unwrap();
        assert!(task.is_unassigned());
        assert!(task.is_overdue(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()));
        assert!(!task.is_overdue(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        assert_eq!(Priority::parse("URGENT"), Some(Priority::Urgent));
    }
}
