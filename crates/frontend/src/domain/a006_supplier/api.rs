use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::shared::config::Service;
use contracts::shared::ApiResult;

use crate::shared::api_utils::{get_json, service_url};

pub async fn fetch_suppliers() -> ApiResult<Vec<Supplier>> {
    get_json(&service_url(Service::Suppliers, "suppliers")).await
}
