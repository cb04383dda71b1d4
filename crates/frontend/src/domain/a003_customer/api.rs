use contracts::domain::a003_customer::aggregate::{Customer, CustomerDto};
use contracts::shared::config::Service;
use contracts::shared::list_query::PageResponse;
use contracts::shared::ApiResult;
use serde::Serialize;

use crate::shared::api_utils::{get_json, post_json, service_url, service_url_with_query};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerListQuery {
    pub page: usize,
    pub size: usize,
    pub sort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

pub async fn fetch_customers(query: &CustomerListQuery) -> ApiResult<PageResponse<Customer>> {
    get_json(&service_url_with_query(Service::Customer, "customers", query)).await
}

pub async fn create_customer(dto: &CustomerDto) -> ApiResult<Customer> {
    post_json(&service_url(Service::Customer, "customers"), dto).await
}
