use contracts::domain::a001_contract::aggregate::{
    Contract, SignatureRequest, SignatureVerification, StatusChangeRequest,
};
use contracts::shared::config::Service;
use contracts::shared::list_query::PageResponse;
use contracts::shared::ApiResult;
use serde::Serialize;

use crate::shared::api_utils::{
    get_json, post_no_content, send_json, service_url, service_url_with_query, Method,
};

/// Query string of the paged contract list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractListQuery {
    pub page: usize,
    pub size: usize,
    /// `field,asc` / `field,desc`
    pub sort: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

pub async fn fetch_contracts(query: &ContractListQuery) -> ApiResult<PageResponse<Contract>> {
    get_json(&service_url_with_query(Service::Contract, "contracts", query)).await
}

pub async fn fetch_contract(id: i64) -> ApiResult<Contract> {
    get_json(&service_url(Service::Contract, &format!("contracts/{}", id))).await
}

pub async fn change_status(id: i64, request: &StatusChangeRequest) -> ApiResult<Contract> {
    let url = service_url(Service::Contract, &format!("contracts/{}/status", id));
    send_json(Method::Patch, &url, request).await
}

/// Signature collection happens in the signature service; this only starts it.
pub async fn request_signature(request: &SignatureRequest) -> ApiResult<()> {
    let url = service_url(
        Service::Contract,
        &format!("contracts/{}/signature-requests", request.contract_id),
    );
    post_no_content(&url, request).await
}

pub async fn verify_signature(id: i64) -> ApiResult<SignatureVerification> {
    get_json(&service_url(
        Service::Contract,
        &format!("contracts/{}/signature/verification", id),
    ))
    .await
}
