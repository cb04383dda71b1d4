pub mod state;

use self::state::create_state;
use super::form::CustomerForm;
use crate::domain::a003_customer::api;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::EMPTY_CELL;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, row_key, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a003_customer::aggregate::Customer;
use contracts::shared::list_query::SortOrder;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn CustomerList() -> impl IntoView {
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(true);
    let show_form = RwSignal::new(false);

    let load_items = move || {
        let ticket = guard.get_value().begin();
        let query = state.with_untracked(|s| s.to_query());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_customers(&query).await;
            ticket.commit(move || {
                match result {
                    Ok(page) => state.update(|s| s.apply_page(page)),
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

    let on_search = Callback::new(move |value: String| {
        state.update(|s| {
            s.search = value;
            s.page = 0;
        });
        load_items();
    });

    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_order = s.sort_order.toggled();
            } else {
                s.sort_field = field.to_string();
                s.sort_order = SortOrder::Asc;
            }
            s.page = 0;
        });
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

    let on_saved = Callback::new(move |_: Customer| {
        show_form.set(false);
        load_items();
    });

    let search_value = Signal::derive(move || state.with(|s| s.search.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.sort_field.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.sort_order));
    let active_filters_count =
        Signal::derive(move || usize::from(!state.with(|s| s.search.trim().is_empty())));

    view! {
        <PageFrame page_id="a003_customer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Customers"</h1>
                    <UiBadge variant="primary".to_string()>
                        {move || state.with(|s| s.total_count).to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| show_form.set(true)>
                        {icon("plus")}
                        " New customer"
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
                            current_page=Signal::derive(move || state.with(|s| s.page))
                            total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                            total_count=Signal::derive(move || state.with(|s| s.total_count))
                            page_size=Signal::derive(move || state.with(|s| s.page_size))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                        />
                    }
                    filter_content=move || view! {
                        <div style="max-width: 360px;">
                            <SearchInput
                                value=search_value
                                on_change=on_search
                                placeholder="Name, email, phone, city..."
                            />
                        </div>
                    }
                />

                <ErrorPanel error=error on_retry=Callback::new(move |_| load_items()) />

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 800px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=220.0>
                                    <SortableHeader label="Name" field="name" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=200.0>
                                    <SortableHeader label="Email" field="email" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Phone"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>
                                    <SortableHeader label="City" field="city" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortableHeader label="Devices" field="devicesCount" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortableHeader label="Contracts" field="activeContracts" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.customers.clone())
                                key=|customer| row_key(customer.id, customer)
                                children=move |customer| {
                                    let name = customer.name.clone();
                                    let email = customer.email.clone().unwrap_or_else(|| EMPTY_CELL.to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&name, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&email, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{customer.phone.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</TableCell>
                                            <TableCell>{customer.city.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</TableCell>
                                            <TableCell class="table__cell--number">{customer.devices_count}</TableCell>
                                            <TableCell class="table__cell--number">{customer.active_contracts}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>

            <Show when=move || show_form.get()>
                <CustomerForm on_saved=on_saved on_cancel=Callback::new(move |_| show_form.set(false)) />
            </Show>
        </PageFrame>
    }
}
