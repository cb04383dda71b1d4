pub mod state;

use self::state::create_state;
use crate::domain::a006_supplier::api;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::EMPTY_CELL;
use crate::shared::list_utils::{highlight_matches, row_key, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn SupplierList() -> impl IntoView {
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(true);
    let active_only = RwSignal::new(false);

    let load_items = move || {
        let ticket = guard.get_value().begin();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_suppliers().await;
            ticket.commit(move || {
                match result {
                    Ok(suppliers) => state.update(|s| s.replace_suppliers(suppliers)),
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

    let first_run = StoredValue::new(true);
    Effect::new(move |_| {
        let value = active_only.get();
        if first_run.get_value() {
            first_run.set_value(false);
            return;
        }
        state.update(|s| s.set_active_only(value));
    });

    let page = Memo::new(move |_| state.with(|s| s.visible_page()));
    let search_value = Signal::derive(move || state.with(|s| s.query.filters.search_term.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.query.filters.sort_by.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.query.filters.sort_order));
    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));
    let toggle_sort = Callback::new(move |field: &'static str| state.update(|s| s.query.toggle_sort(field)));

    view! {
        <PageFrame page_id="a006_supplier--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Suppliers"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || page.with(|p| p.total_elements).to_string()}
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
                            current_page=Signal::derive(move || page.with(|p| p.number))
                            total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                            total_count=Signal::derive(move || page.with(|p| p.total_elements))
                            page_size=Signal::derive(move || state.with(|s| s.query.page_size))
                            on_page_change=Callback::new(move |p: usize| state.update(|s| s.query.page = p))
                            on_page_size_change=Callback::new(move |size: usize| state.update(|s| s.query.set_page_size(size)))
                        />
                    }
                    filter_content=move || view! {
                        <Flex gap=FlexGap::Medium align=FlexAlign::Center>
                            <div style="flex: 1; max-width: 360px;">
                                <SearchInput
                                    value=search_value
                                    on_change=Callback::new(move |v: String| state.update(|s| s.set_search(v)))
                                    placeholder="Name, contact, email, country..."
                                />
                            </div>
                            <Switch checked=active_only label="Active only"/>
                        </Flex>
                    }
                />

                <ErrorPanel error=error on_retry=Callback::new(move |_| load_items()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 800px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=200.0>
                                    <SortableHeader label="Name" field="name" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=160.0>
                                    <SortableHeader label="Contact" field="contactName" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=180.0>"Email / phone"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>
                                    <SortableHeader label="Country" field="country" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="Rating" field="rating" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=80.0>
                                    <SortableHeader label="Parts" field="partsCount" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.get().content
                                key=|supplier| row_key(supplier.id, supplier)
                                children=move |supplier| {
                                    let name = supplier.name.clone();
                                    let contact = [supplier.email.clone(), supplier.phone.clone()]
                                        .into_iter()
                                        .flatten()
                                        .collect::<Vec<_>>()
                                        .join(" / ");
                                    let (variant, status) = if supplier.active {
                                        ("success", "Active")
                                    } else {
                                        ("neutral", "Inactive")
                                    };
                                    let contact_name = supplier.contact_name.clone().unwrap_or_else(|| EMPTY_CELL.to_string());
                                    let country = supplier.country.clone().unwrap_or_else(|| EMPTY_CELL.to_string());
                                    let rating_title = supplier.rating.map(|r| format!("{r:.1}")).unwrap_or_default();
                                    let rating_stars = supplier.rating_stars();
                                    let parts_count = supplier.parts_count;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&name, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{contact_name}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {if contact.is_empty() { EMPTY_CELL.to_string() } else { contact }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{country}</TableCell>
                                            <TableCell>
                                                <span class="rating" title=rating_title>
                                                    {rating_stars}
                                                </span>
                                            </TableCell>
                                            <TableCell class="table__cell--number">{parts_count}</TableCell>
                                            <TableCell>
                                                <UiBadge variant=variant.to_string()>{status}</UiBadge>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && page.with(|p| p.total_elements == 0)>
                        <div class="table__empty">"No suppliers found."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
