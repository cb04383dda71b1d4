use contracts::domain::a005_spare_part::aggregate::{normalize_all, RawSparePart, SparePart};
use contracts::shared::config::Service;
use contracts::shared::ApiResult;

use crate::shared::api_utils::{get_json, service_url};

/// Spare parts in canonical form. Records the service sends without an id
/// are dropped here.
pub async fn fetch_parts() -> ApiResult<Vec<SparePart>> {
    let raw: Vec<RawSparePart> = get_json(&service_url(Service::SpareParts, "spare-parts")).await?;
    let total = raw.len();
    let parts = normalize_all(raw);
    if parts.len() < total {
        log::warn!("spare parts: {} records without id skipped", total - parts.len());
    }
    Ok(parts)
}
