//! Tab key → view. Every tab key the shell can open is listed here.

use super::tab_labels::CONTRACT_DETAIL_PREFIX;
use crate::domain::a001_contract::ui::details::ContractDetails;
use crate::domain::a001_contract::ui::list::ContractList;
use crate::domain::a002_device::ui::list::DeviceList;
use crate::domain::a003_customer::ui::list::CustomerList;
use crate::domain::a004_inventory::ui::list::InventoryList;
use crate::domain::a005_spare_part::ui::list::SparePartList;
use crate::domain::a006_supplier::ui::list::SupplierList;
use crate::domain::a007_task::ui::board::TaskAssignmentBoard;
use crate::domain::a008_service_request::ui::form::ServiceRequestForm;
use crate::domain::a008_service_request::ui::list::ServiceRequestList;
use crate::domain::a009_chat::ui::ChatSupport;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

/// Render the content of the tab `key`.
///
/// `tabs_store` lets detail views close their own tab. Unknown keys render a
/// placeholder.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close_self = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        "a001_contract" => view! { <ContractList /> }.into_any(),
        k if k.starts_with(CONTRACT_DETAIL_PREFIX) => {
            match k
                .strip_prefix(CONTRACT_DETAIL_PREFIX)
                .and_then(|id| id.parse::<i64>().ok())
            {
                Some(id) => view! { <ContractDetails id=id on_close=close_self /> }.into_any(),
                None => unknown_tab(k),
            }
        }
        "a002_device" => view! { <DeviceList /> }.into_any(),
        "a003_customer" => view! { <CustomerList /> }.into_any(),
        "a004_inventory" => view! { <InventoryList /> }.into_any(),
        "a005_spare_part" => view! { <SparePartList /> }.into_any(),
        "a006_supplier" => view! { <SupplierList /> }.into_any(),
        "a007_task" => view! { <TaskAssignmentBoard /> }.into_any(),
        "a008_service_request" => view! { <ServiceRequestList /> }.into_any(),
        "a008_service_request_new" => view! {
            <ServiceRequestForm on_saved=close_self on_cancel=close_self />
        }
        .into_any(),
        "a009_chat" => view! { <ChatSupport /> }.into_any(),
        other => unknown_tab(other),
    }
}

fn unknown_tab(key: &str) -> AnyView {
    log!("unknown tab key: '{}'", key);
    let key = key.to_string();
    view! {
        <div class="placeholder">
            {format!("Nothing is registered for '{}'", key)}
        </div>
    }
    .into_any()
}
