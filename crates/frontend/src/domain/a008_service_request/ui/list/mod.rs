pub mod state;

use self::state::create_state;
use crate::domain::a008_service_request::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_opt_datetime, EMPTY_CELL};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, row_key, SearchInput, SortableHeader};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a008_service_request::aggregate::ServiceRequestStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const NEW_REQUEST_TAB: &str = "a008_service_request_new";

fn status_variant(status: ServiceRequestStatus) -> &'static str {
    match status {
        ServiceRequestStatus::New => "primary",
        ServiceRequestStatus::InReview
        | ServiceRequestStatus::Scheduled
        | ServiceRequestStatus::InProgress => "warning",
        ServiceRequestStatus::Resolved => "success",
        ServiceRequestStatus::Closed | ServiceRequestStatus::Unknown => "neutral",
    }
}

#[component]
pub fn ServiceRequestList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = create_state();
    let guard = use_request_guard();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let is_filter_expanded = RwSignal::new(true);

    let load_items = move || {
        let ticket = guard.get_value().begin();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_requests().await;
            ticket.commit(move || {
                match result {
                    Ok(requests) => state.update(|s| s.replace_requests(requests)),
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

    let status_sel = RwSignal::new(String::new());
    let first_run = StoredValue::new(true);
    Effect::new(move |_| {
        let value = status_sel.get();
        if first_run.get_value() {
            first_run.set_value(false);
            return;
        }
        state.update(|s| s.set_status(ServiceRequestStatus::parse(&value)));
    });

    let page = Memo::new(move |_| state.with(|s| s.visible_page()));
    let search_value = Signal::derive(move || state.with(|s| s.query.filters.search_term.clone()));
    let sort_field = Signal::derive(move || state.with(|s| s.query.filters.sort_by.clone()));
    let sort_order = Signal::derive(move || state.with(|s| s.query.filters.sort_order));
    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filters_count()));
    let toggle_sort = Callback::new(move |field: &'static str| state.update(|s| s.query.toggle_sort(field)));

    view! {
        <PageFrame page_id="a008_service_request--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Service requests"</h1>
                    <UiBadge variant="warning".to_string()>
                        {move || format!("{} open", state.with(|s| s.open_count()))}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| tabs_store.open_tab(NEW_REQUEST_TAB, tab_label_for_key(NEW_REQUEST_TAB))
                    >
                        {icon("plus")}
                        " New request"
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
                                        placeholder="Description, customer, serial..."
                                    />
                                </Flex>
                            </div>
                            <div style="min-width: 160px;">
                                <Flex vertical=true gap=FlexGap::Small>
                                    <Label>"Status:"</Label>
                                    <Select value=status_sel>
                                        <option value="">"All"</option>
                                        {ServiceRequestStatus::FILTERABLE.into_iter().map(|status| view! {
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
                                <TableHeaderCell min_width=70.0>"#"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>
                                    <SortableHeader label="Created" field="createdAt" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=180.0>
                                    <SortableHeader label="Customer" field="customerName" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Device"</TableHeaderCell>
                                <TableHeaderCell min_width=260.0>"Description"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>
                                    <SortableHeader label="Priority" field="priority" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortableHeader label="Status" field="status" sort_field=sort_field sort_order=sort_order on_sort=toggle_sort />
                                </TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.get().content
                                key=|request| row_key(request.id, request)
                                children=move |request| {
                                    let customer = request.customer_name.clone().unwrap_or_else(|| EMPTY_CELL.to_string());
                                    let description = request.description.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell class="table__cell--number">{request.id}</TableCell>
                                            <TableCell>{format_opt_datetime(request.created_at)}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&customer, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{request.device_serial.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&description, &search_value.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <UiBadge variant=request.priority.badge_variant().to_string()>{request.priority.label()}</UiBadge>
                                            </TableCell>
                                            <TableCell>
                                                <UiBadge variant=status_variant(request.status).to_string()>{request.status.label()}</UiBadge>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && page.with(|p| p.total_elements == 0)>
                        <div class="table__empty">"No service requests."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}
