use contracts::domain::a007_task::aggregate::{TaskAssignment, Technician, TechnicianTask};
use contracts::shared::config::Service;
use contracts::shared::ApiResult;

use crate::shared::api_utils::{get_json, post_json, service_url};

pub async fn fetch_tasks() -> ApiResult<Vec<TechnicianTask>> {
    get_json(&service_url(Service::Task, "tasks")).await
}

pub async fn fetch_technicians() -> ApiResult<Vec<Technician>> {
    get_json(&service_url(Service::Task, "technicians")).await
}

/// Returns the task as stored after the assignment.
pub async fn assign_task(assignment: &TaskAssignment) -> ApiResult<TechnicianTask> {
    post_json(&service_url(Service::Task, "assignments"), assignment).await
}
