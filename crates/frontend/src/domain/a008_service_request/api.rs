use contracts::domain::a008_service_request::aggregate::{ServiceRequest, ServiceRequestDto};
use contracts::shared::config::Service;
use contracts::shared::ApiResult;

use crate::shared::api_utils::{get_json, post_json, service_url};

pub async fn fetch_requests() -> ApiResult<Vec<ServiceRequest>> {
    get_json(&service_url(Service::ServiceRequest, "service-requests")).await
}

pub async fn create_request(dto: &ServiceRequestDto) -> ApiResult<ServiceRequest> {
    post_json(&service_url(Service::ServiceRequest, "service-requests"), dto).await
}
