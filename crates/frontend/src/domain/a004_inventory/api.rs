use contracts::domain::a004_inventory::aggregate::InventoryItem;
use contracts::shared::config::Service;
use contracts::shared::ApiResult;

use crate::shared::api_utils::{get_json, service_url};

/// The whole stock list; filtering and paging happen on the client.
pub async fn fetch_items() -> ApiResult<Vec<InventoryItem>> {
    get_json(&service_url(Service::Inventory, "items")).await
}
