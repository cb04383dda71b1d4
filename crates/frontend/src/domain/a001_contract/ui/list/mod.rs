pub mod state;

use self::state::create_state;
use crate::domain::a001_contract::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::CONTRACT_DETAIL_PREFIX;
use crate::layout::tabs::detail_tab_label;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_money, format_opt_date, EMPTY_CELL};
use crate::shared::list_utils::{highlight_matches, row_key, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a001_contract::aggregate::ContractStatus;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Active contracts ending within this many days are highlighted.
const EXPIRY_WARNING_DAYS: i64 = 30;

#[component]
pub fn ContractList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let open_detail = move |id: i64, number: String| {
        tabs_store.open_tab(
            &format!("{}{}", CONTRACT_DETAIL_PREFIX, id),
            &detail_tab_label("Contract", &number),
        );
    };

    let load_items = move || {
        let ticket = guard.get_value().begin();
        let query = state.with_untracked(|s| s.to_query());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_contracts(&query).await;
            ticket.commit(move || {
                match result {
                    Ok(page) => {
                        log!("contracts: page {} of {}", page.number + 1, page.total_pages);
                        state.update(|s| s.apply_page(page));
                    }
                    Err(e) => {
                        log::warn!("contracts load failed: {}", e);
                        set_error.set(Some(e.to_string()));
                    }
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

    // Status select -> state.status and reload
    let status_filter = RwSignal::new(String::new());
    let status_first_run = StoredValue::new(true);
    Effect::new(move |_| {
        let value = status_filter.get();
        if status_first_run.get_value() {
            status_first_run.set_value(false);
            return;
        }
        state.update(|s| {
            s.status = ContractStatus::parse(&value);
            s.page = 0;
        });
        load_items();
    });

    let on_search = Callback::new(move |value: String| {
        state.update(|s| {
            s.search = value;
            s.page = 0;
        });
        load_items();
    });

    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| s.toggle_sort(field));
        load_items();
    });

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page);
        load_items();
    };

    let change_page_size = move |size: usize| {
        state.update(|s| {
            s.page_size = size;
            s.page = 0;
        });
        load_items();
    };

    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));
    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.sort_order));
    let search_value = Signal::derive(move || state.with(|s| s.search.clone()));
    let today = chrono::Local::now().date_naive();

    view! {
        <PageFrame page_id="a001_contract--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Contracts"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.with(|s| s.total_count).to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
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
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=active_filters_count
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                            total_count=Signal::derive(move || state.with(|s| s.total_count))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 360px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <SearchInput
                                        value=search_value
                                        on_change=on_search
                                        placeholder="Number, customer..."
                                    />
                                </Flex>
                            </div>
                            <div style="min-width: 200px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Status:"</Label>
                                    <Select value=status_filter>
                                        <option value="">"All statuses"</option>
                                        {ContractStatus::FILTERABLE.into_iter().map(|status| view! {
                                            <option value=status.as_str()>{status.label()}</option>
                                        }).collect_view()}
                                    </Select>
                                </Flex>
                            </div>
                        </Flex>
                    }
                    filter_tags=move || view! {
                        <div class="filter-tags">
                            {move || state.with(|s| s.status).map(|status| view! {
                                <FilterTag
                                    label=format!("Status: {}", status.label())
                                    on_remove=Callback::new(move |_| status_filter.set(String::new()))
                                />
                            })}
                        </div>
                    }
                />

                <ErrorPanel error=error on_retry=Callback::new(move |_| load_items()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>
                                    <SortableHeader label="Number" field="contractNumber" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=220.0>
                                    <SortableHeader label="Customer" field="customerName" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=140.0>
                                    <SortableHeader label="Status" field="status" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="Start" field="startDate" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="End" field="endDate" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    <SortableHeader label="Value" field="totalValue" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Signature"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.with(|s| s.contracts.clone())
                                key=|contract| row_key(contract.id, contract)
                                children=move |contract| {
                                    let id = contract.id;
                                    let number = contract.contract_number.clone();
                                    let number_for_link = number.clone();
                                    let expiring = contract.is_expiring_soon(today, EXPIRY_WARNING_DAYS);
                                    view! {
                                        <TableRow class=if expiring { "table__row--warning".to_string() } else { String::new() }>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id, number_for_link.clone());
                                                        }
                                                    >
                                                        {move || highlight_matches(&number, &search_value.get())}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {contract.customer_name.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <UiBadge variant=contract.status.badge_variant().to_string()>
                                                    {contract.status.label()}
                                                </UiBadge>
                                            </TableCell>
                                            <TableCell>{format_opt_date(contract.start_date)}</TableCell>
                                            <TableCell>
                                                {format_opt_date(contract.end_date)}
                                                {expiring.then(|| view! {
                                                    <span class="table__hint">" (ending soon)"</span>
                                                })}
                                            </TableCell>
                                            <TableCell class="table__cell--number">
                                                {contract.total_value.map(format_money).unwrap_or_else(|| EMPTY_CELL.to_string())}
                                            </TableCell>
                                            <TableCell>{contract.signature_status.label()}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded && s.contracts.is_empty()) && !loading.get()>
                        <div class="table__empty">"No contracts match the current filters."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
