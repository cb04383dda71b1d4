pub mod state;

use self::state::{create_state, parse_bound};
use crate::domain::a004_inventory::api;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_money, EMPTY_CELL};
use crate::shared::list_utils::{highlight_matches, row_key, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a004_inventory::aggregate::{distinct_locations, InventorySummary};
use contracts::shared::list_query::{count_active_filters, FilterDimension, StockStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn InventoryList() -> impl IntoView {
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(false);

    let load_items = move || {
        let ticket = guard.get_value().begin();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_items().await;
            ticket.commit(move || {
                match result {
                    Ok(items) => {
                        log::debug!("inventory loaded: {} items", items.len());
                        state.update(|s| s.replace_items(items));
                    }
                    Err(e) => {
                        log::warn!("inventory load failed: {}", e);
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

    // Filter form fields. Ranges apply on "Apply"; selects apply on change.
    let stock_status_sel = RwSignal::new(StockStatus::All.as_str().to_string());
    let location_sel = RwSignal::new(String::new());
    let min_stock = RwSignal::new(String::new());
    let max_stock = RwSignal::new(String::new());
    let min_cost = RwSignal::new(String::new());
    let max_cost = RwSignal::new(String::new());

    let status_first_run = StoredValue::new(true);
    Effect::new(move |_| {
        let value = stock_status_sel.get();
        if status_first_run.get_value() {
            status_first_run.set_value(false);
            return;
        }
        state.update(|s| s.edit_filters(|f| f.stock_status = StockStatus::parse(&value)));
    });

    let location_first_run = StoredValue::new(true);
    Effect::new(move |_| {
        let value = location_sel.get();
        if location_first_run.get_value() {
            location_first_run.set_value(false);
            return;
        }
        state.update(|s| s.edit_filters(|f| f.location = (!value.is_empty()).then_some(value)));
    });

    let apply_ranges = move || {
        state.update(|s| {
            s.edit_filters(|f| {
                f.min_stock = parse_bound(&min_stock.get_untracked());
                f.max_stock = parse_bound(&max_stock.get_untracked());
                f.min_cost = parse_bound(&min_cost.get_untracked());
                f.max_cost = parse_bound(&max_cost.get_untracked());
            })
        });
    };

    let clear_inputs_for = move |dim: FilterDimension| match dim {
        FilterDimension::Search => {}
        FilterDimension::StockStatus => stock_status_sel.set(StockStatus::All.as_str().to_string()),
        FilterDimension::Location => location_sel.set(String::new()),
        FilterDimension::StockRange => {
            min_stock.set(String::new());
            max_stock.set(String::new());
        }
        FilterDimension::CostRange => {
            min_cost.set(String::new());
            max_cost.set(String::new());
        }
    };

    let reset_filters = move || {
        state.update(|s| s.edit_filters(|f| f.reset()));
        for dim in [
            FilterDimension::StockStatus,
            FilterDimension::Location,
            FilterDimension::StockRange,
            FilterDimension::CostRange,
        ] {
            clear_inputs_for(dim);
        }
    };

    let remove_tag = move |dim: FilterDimension| {
        state.update(|s| s.clear_dimension(dim));
        clear_inputs_for(dim);
    };

    let page = Memo::new(move |_| state.with(|s| s.visible_page()));
    let locations = Memo::new(move |_| state.with(|s| distinct_locations(&s.items)));
    let summary = Memo::new(move |_| state.with(|s| InventorySummary::from_items(&s.items)));

    let active_filters_count = Signal::derive(move || state.with(|s| count_active_filters(&s.query.filters)));
    let search_value = Signal::derive(move || state.with(|s| s.query.filters.search_term.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.query.filters.sort_by.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.query.filters.sort_order));
    let toggle_sort = Callback::new(move |field: &'static str| state.update(|s| s.query.toggle_sort(field)));

    view! {
        <PageFrame page_id="a004_inventory--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Inventory"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || summary.get().total_items.to_string()}
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

            <div class="summary-row">
                <div class="summary-card">
                    <span class="summary-card__label">"Items"</span>
                    <span class="summary-card__value">{move || summary.get().total_items}</span>
                </div>
                <div class="summary-card summary-card--warning">
                    <span class="summary-card__label">"Low stock"</span>
                    <span class="summary-card__value">{move || summary.get().low_stock}</span>
                </div>
                <div class="summary-card summary-card--error">
                    <span class="summary-card__label">"Out of stock"</span>
                    <span class="summary-card__value">{move || summary.get().out_of_stock}</span>
                </div>
                <div class="summary-card">
                    <span class="summary-card__label">"Stock value"</span>
                    <span class="summary-card__value">{move || format_money(summary.get().total_value)}</span>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=active_filters_count
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || page.with(|p| p.number))
                            total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                            total_count=Signal::derive(move || page.with(|p| p.total_elements))
                            page_size=Signal::derive(move || state.with(|s| s.query.page_size))
                            on_page_change=Callback::new(move |p: usize| state.update(|s| s.query.page = p))
                            on_page_size_change=Callback::new(move |size: usize| state.update(|s| s.query.set_page_size(size)))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End style="flex-wrap: wrap;">
                            <div style="flex: 1; min-width: 240px; max-width: 360px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <SearchInput
                                        value=search_value
                                        on_change=Callback::new(move |v: String| state.update(|s| s.edit_filters(|f| f.search_term = v)))
                                        placeholder="Name, model, code, location..."
                                    />
                                </Flex>
                            </div>
                            <div style="min-width: 160px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Stock status:"</Label>
                                    <Select value=stock_status_sel>
                                        {StockStatus::ALL.into_iter().map(|status| view! {
                                            <option value=status.as_str()>{status.label()}</option>
                                        }).collect_view()}
                                    </Select>
                                </Flex>
                            </div>
                            <div style="min-width: 160px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Location:"</Label>
                                    <Select value=location_sel>
                                        <option value="">"All locations"</option>
                                        <For
                                            each=move || locations.get()
                                            key=|l| l.clone()
                                            children=move |l| view! { <option value=l.clone()>{l.clone()}</option> }
                                        />
                                    </Select>
                                </Flex>
                            </div>
                            <div style="width: 90px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Stock from"</Label>
                                    <Input value=min_stock />
                                </Flex>
                            </div>
                            <div style="width: 90px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"to"</Label>
                                    <Input value=max_stock />
                                </Flex>
                            </div>
                            <div style="width: 100px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Cost from"</Label>
                                    <Input value=min_cost />
                                </Flex>
                            </div>
                            <div style="width: 100px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"to"</Label>
                                    <Input value=max_cost />
                                </Flex>
                            </div>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| apply_ranges()>
                                "Apply"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| reset_filters()
                                disabled=Signal::derive(move || active_filters_count.get() == 0)
                            >
                                "Reset"
                            </Button>
                        </Flex>
                    }
                    filter_tags=move || view! {
                        <div class="filter-tags">
                            {move || {
                                let filters = state.with(|s| s.query.filters.clone());
                                filters.active_dimensions().into_iter().map(|dim| view! {
                                    <FilterTag
                                        label=filters.label(dim)
                                        on_remove=Callback::new(move |_| remove_tag(dim))
                                    />
                                }).collect_view()
                            }}
                        </div>
                    }
                />

                <ErrorPanel error=error on_retry=Callback::new(move |_| load_items()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="Code" field="code" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=220.0>
                                    <SortableHeader label="Name" field="name" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    <SortableHeader label="Model" field="model" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    <SortableHeader label="Location" field="warehouseLocation" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=130.0>
                                    <SortableHeader label="Stock" field="stockQuantity" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="Unit cost" field="unitCost" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>
                                    <SortableHeader label="Value" field="stockValue" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.get().content
                                key=|item| row_key(item.id, item)
                                children=move |item| {
                                    let (variant, stock_label) = item.stock_badge();
                                    let name = item.name.clone();
                                    let code = item.code.clone();
                                    let model = item.model.clone().unwrap_or_else(|| EMPTY_CELL.to_string());
                                    let location = item.warehouse_location.clone().unwrap_or_else(|| EMPTY_CELL.to_string());
                                    let stock_quantity = item.stock_quantity;
                                    let unit_cost = format_money(item.unit_cost);
                                    let stock_value = format_money(item.stock_value());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&code, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&name, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{model}</TableCell>
                                            <TableCell>{location}</TableCell>
                                            <TableCell>
                                                <span class="table__cell--number">{stock_quantity}</span>
                                                " "
                                                <UiBadge variant=variant.to_string()>{stock_label}</UiBadge>
                                            </TableCell>
                                            <TableCell class="table__cell--number">{unit_cost}</TableCell>
                                            <TableCell class="table__cell--number">{stock_value}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && page.with(|p| p.total_elements == 0)>
                        <div class="table__empty">"No items match the current filters."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
