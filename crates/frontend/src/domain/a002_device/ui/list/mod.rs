pub mod state;

use self::state::create_state;
use crate::domain::a002_device::api;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_opt_date, EMPTY_CELL};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a002_device::aggregate::{contract_group_title, Device};
use contracts::shared::list_query::SortOrder;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const COLUMN_COUNT: &str = "6";

/// Devices grouped by the service contract that covers them.
#[component]
pub fn DeviceList() -> impl IntoView {
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let load_items = move || {
        let ticket = guard.get_value().begin();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_devices().await;
            ticket.commit(move || {
                match result {
                    Ok(devices) => {
                        log::debug!("devices loaded: {}", devices.len());
                        state.update(|s| {
                            s.devices = devices;
                            s.is_loaded = true;
                        });
                    }
                    Err(e) => set_error.set(Some(e.to_string())),
                }
                set_loading.set(false);
            });
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_items();
        }
    });

    let search_value = Signal::derive(move || state.with(|s| s.filters.search_term.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.filters.sort_by.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.filters.sort_order));
    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| {
            if s.filters.sort_by == field {
                s.filters.sort_order = s.filters.sort_order.toggled();
            } else {
                s.filters.sort_by = field.to_string();
                s.filters.sort_order = SortOrder::Asc;
            }
        })
    });
    let groups = Memo::new(move |_| state.with(|s| s.groups()));

    view! {
        <PageFrame page_id="a002_device--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Devices"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.with(|s| s.devices.len()).to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=search_value
                        on_change=Callback::new(move |v: String| state.update(|s| s.filters.search_term = v))
                        placeholder="Serial, model, customer..."
                    />
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load_items()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorPanel error=error on_retry=Callback::new(move |_| load_items()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 800px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>
                                    <SortableHeader label="Serial number" field="serialNumber" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=140.0>
                                    <SortableHeader label="Model" field="model" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=200.0>
                                    <SortableHeader label="Customer" field="customerName" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    <SortableHeader label="Status" field="status" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="Installed" field="installedAt" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Location"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || groups.get().into_iter().map(|group| {
                                let key = group.key;
                                let title = contract_group_title(key, group.items.first());
                                let count = group.len();
                                let is_collapsed = move || state.with(|s| s.collapsed.contains(&key));
                                let rows = group.items;
                                view! {
                                    <TableRow class="table__group-row">
                                        <TableCell attr:colspan=COLUMN_COUNT>
                                            <div
                                                class="table__group-header"
                                                on:click=move |_| state.update(|s| s.toggle_group(key))
                                            >
                                                {move || if is_collapsed() { icon("chevron-right") } else { icon("chevron-down") }}
                                                <span class="table__group-title">{title}</span>
                                                <UiBadge>{count.to_string()}</UiBadge>
                                            </div>
                                        </TableCell>
                                    </TableRow>
                                    <Show when=move || !is_collapsed()>
                                        {rows.iter().cloned().map(|device| view! {
                                            <DeviceRow device=device search=search_value />
                                        }).collect_view()}
                                    </Show>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && groups.with(|g| g.is_empty())>
                        <div class="table__empty">"No devices found."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn DeviceRow(device: Device, search: Signal<String>) -> impl IntoView {
    let serial = device.serial_number.clone();
    let model = device.model.clone();
    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout truncate=true>
                    {move || highlight_matches(&serial, &search.get())}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {move || highlight_matches(&model, &search.get())}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout truncate=true>
                    {device.customer_name.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <UiBadge variant=device.status.badge_variant().to_string()>{device.status.label()}</UiBadge>
            </TableCell>
            <TableCell>{format_opt_date(device.installed_at)}</TableCell>
            <TableCell>{device.location.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</TableCell>
        </TableRow>
    }
}
