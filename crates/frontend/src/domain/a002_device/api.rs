use contracts::domain::a002_device::aggregate::Device;
use contracts::shared::config::Service;
use contracts::shared::ApiResult;

use crate::shared::api_utils::{get_json, service_url};

pub async fn fetch_devices() -> ApiResult<Vec<Device>> {
    get_json(&service_url(Service::Device, "devices")).await
}
