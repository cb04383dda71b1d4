pub mod state;

use self::state::create_state;
use super::export::SparePartExport;
use crate::domain::a005_spare_part::api;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_money, EMPTY_CELL};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, row_key, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use contracts::shared::list_query::{count_active_filters, StockStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn SparePartList() -> impl IntoView {
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(true);
    let show_export = RwSignal::new(false);

    let load_items = move || {
        let ticket = guard.get_value().begin();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_parts().await;
            ticket.commit(move || {
                match result {
                    Ok(parts) => state.update(|s| s.replace_parts(parts)),
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

    let stock_status_sel = RwSignal::new(StockStatus::All.as_str().to_string());
    let first_run = StoredValue::new(true);
    Effect::new(move |_| {
        let value = stock_status_sel.get();
        if first_run.get_value() {
            first_run.set_value(false);
            return;
        }
        state.update(|s| s.set_stock_status(StockStatus::parse(&value)));
    });

    let page = Memo::new(move |_| state.with(|s| s.visible_page()));
    let search_value = Signal::derive(move || state.with(|s| s.query.filters.search_term.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.query.filters.sort_by.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.query.filters.sort_order));
    let active_filters_count = Signal::derive(move || state.with(|s| count_active_filters(&s.query.filters)));
    let toggle_sort = Callback::new(move |field: &'static str| state.update(|s| s.query.toggle_sort(field)));

    view! {
        <PageFrame page_id="a005_spare_part--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Spare parts"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.with(|s| s.parts.len()).to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| show_export.set(true)
                        disabled=Signal::derive(move || page.with(|p| p.total_elements == 0))
                    >
                        {icon("download")}
                        " Export"
                    </Button>
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
                            current_page=Signal::derive(move || page.with(|p| p.number))
                            total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                            total_count=Signal::derive(move || page.with(|p| p.total_elements))
                            page_size=Signal::derive(move || state.with(|s| s.query.page_size))
                            on_page_change=Callback::new(move |p: usize| state.update(|s| s.query.page = p))
                            on_page_size_change=Callback::new(move |size: usize| state.update(|s| s.query.set_page_size(size)))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 360px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Search:"</Label>
                                    <SearchInput
                                        value=search_value
                                        on_change=Callback::new(move |v: String| state.update(|s| s.set_search(v)))
                                        placeholder="Name, part number, model, supplier..."
                                    />
                                </Flex>
                            </div>
                            <div style="min-width: 160px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Stock:"</Label>
                                    <Select value=stock_status_sel>
                                        {StockStatus::ALL.into_iter().map(|status| view! {
                                            <option value=status.as_str()>{status.label()}</option>
                                        }).collect_view()}
                                    </Select>
                                </Flex>
                            </div>
                        </Flex>
                    }
                />

                <ErrorPanel error=error on_retry=Callback::new(move |_| load_items()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=120.0>
                                    <SortableHeader label="Part number" field="partNumber" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=200.0>
                                    <SortableHeader label="Name" field="name" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=180.0>"Compatible models"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortableHeader label="Stock" field="stockQuantity" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=100.0>
                                    <SortableHeader label="Price" field="unitPrice" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=150.0>
                                    <SortableHeader label="Supplier" field="supplierName" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Location"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.get().content
                                key=|part| row_key(part.id, part)
                                children=move |part| {
                                    let number = part.part_number.clone();
                                    let name = part.name.clone();
                                    let models = part.compatible_models.join(", ");
                                    let row_class = if part.is_low_stock { "table__row--warning" } else { "" };
                                    view! {
                                        <TableRow class=row_class.to_string()>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&number, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&name, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{models}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="table__cell--number">{part.stock_quantity}</TableCell>
                                            <TableCell class="table__cell--number">{format_money(part.unit_price)}</TableCell>
                                            <TableCell>{part.supplier_name.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</TableCell>
                                            <TableCell>{part.location.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && page.with(|p| p.total_elements == 0)>
                        <div class="table__empty">"No spare parts found."</div>
                    </Show>
                </div>
            </div>

            <Show when=move || show_export.get()>
                <SparePartExport
                    parts=state.with_untracked(|s| s.filtered())
                    on_close=Callback::new(move |_| show_export.set(false))
                />
            </Show>
        </PageFrame>
    }
}
