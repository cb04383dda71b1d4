use crate::domain::a002_device::api as device_api;
use crate::domain::a003_customer::api::{self as customer_api, CustomerListQuery};
use crate::domain::a008_service_request::api;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a002_device::aggregate::Device;
use contracts::domain::a003_customer::aggregate::Customer;
use contracts::domain::a007_task::aggregate::Priority;
use contracts::domain::a008_service_request::aggregate::ServiceRequestDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Customers offered in the picker; larger customer bases are searched on
/// the customers page.
const CUSTOMER_PICKER_SIZE: usize = 200;

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Request payload from the raw form values.
pub fn build_dto(customer: &str, device: &str, priority: &str, description: &str) -> ServiceRequestDto {
    ServiceRequestDto {
        customer_id: parse_id(customer),
        device_id: parse_id(device),
        description: description.trim().to_string(),
        priority: Priority::parse(priority).unwrap_or_default(),
    }
}

/// Devices registered to `customer_id`, for the device picker.
pub fn devices_of(devices: &[Device], customer_id: Option<i64>) -> Vec<Device> {
    match customer_id {
        Some(id) => devices.iter().filter(|d| d.customer_id == Some(id)).cloned().collect(),
        None => Vec::new(),
    }
}

#[component]
pub fn ServiceRequestForm(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let guard = use_request_guard();
    let customers = RwSignal::new(Vec::<Customer>::new());
    let devices = RwSignal::new(Vec::<Device>::new());
    let customer_sel = RwSignal::new(String::new());
    let device_sel = RwSignal::new(String::new());
    let priority_sel = RwSignal::new(Priority::default().as_str().to_string());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        let ticket = guard.get_value().begin();
        spawn_local(async move {
            let query = CustomerListQuery {
                page: 0,
                size: CUSTOMER_PICKER_SIZE,
                sort: "name,asc".to_string(),
                search: None,
            };
            let loaded_customers = customer_api::fetch_customers(&query).await;
            let loaded_devices = device_api::fetch_devices().await;
            ticket.commit(move || {
                match loaded_customers {
                    Ok(page) => customers.set(page.content),
                    Err(e) => error.set(Some(format!("Customers could not be loaded: {}", e))),
                }
                match loaded_devices {
                    Ok(list) => devices.set(list),
                    Err(e) => log::warn!("devices for request form: {}", e),
                }
            });
        });
    });

    // A device picked for another customer must not stay selected.
    Effect::new(move |prev: Option<String>| {
        let customer = customer_sel.get();
        if prev.is_some_and(|p| p != customer) {
            device_sel.set(String::new());
        }
        customer
    });

    let customer_devices = Memo::new(move |_| {
        let customer_id = parse_id(&customer_sel.get());
        devices.with(|d| devices_of(d, customer_id))
    });

    let save = move |_| {
        let dto = build_dto(
            &customer_sel.get_untracked(),
            &device_sel.get_untracked(),
            &priority_sel.get_untracked(),
            &description.get_untracked(),
        );
        if let Err(msg) = dto.validate() {
            error.set(Some(msg));
            return;
        }
        let guard = guard.get_value();
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            let result = api::create_request(&dto).await;
            if guard.is_disposed() {
                return;
            }
            match result {
                Ok(request) => {
                    log::info!("service request {} created", request.id);
                    on_saved.run(());
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    view! {
        <PageFrame page_id="a008_service_request--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"New service request"</h1>
                </div>
            </div>
            <div class="page__content" style="max-width: 640px;">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Customer"</Label>
                    <Select value=customer_sel>
                        <option value="">"Select a customer"</option>
                        <For
                            each=move || customers.get()
                            key=|c| c.id
                            children=move |c| view! { <option value=c.id.to_string()>{c.name}</option> }
                        />
                    </Select>

                    <Label>"Device"</Label>
                    <Select value=device_sel>
                        <option value="">
                            {move || if customer_devices.with(|d| d.is_empty()) { "No device" } else { "Not device specific" }}
                        </option>
                        <For
                            each=move || customer_devices.get()
                            key=|d| d.id
                            children=move |d| view! {
                                <option value=d.id.to_string()>{format!("{} · {}", d.serial_number, d.model)}</option>
                            }
                        />
                    </Select>

                    <Label>"Priority"</Label>
                    <Select value=priority_sel>
                        {Priority::ALL.into_iter().map(|p| view! {
                            <option value=p.as_str()>{p.label()}</option>
                        }).collect_view()}
                    </Select>

                    <Label>"Description"</Label>
                    <Textarea value=description placeholder="What is wrong with the device?" attr:rows=5 />
                </Flex>
                <div class="form__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Submitting..." } else { "Submit request" }}
                    </Button>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dto_from_form_values() {
        let dto = build_dto("4", "", "HIGH", "  Paper jams on every second sheet ");
        assert_eq!(dto.customer_id, Some(4));
        assert_eq!(dto.device_id, None);
        assert_eq!(dto.priority, Priority::High);
        assert_eq!(dto.description, "Paper jams on every second sheet");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_missing_customer_fails_validation() {
        let dto = build_dto("", "9", "bogus", "Paper jams on every second sheet");
        assert_eq!(dto.priority, Priority::Medium);
        assert_eq!(dto.validate().unwrap_err(), "Customer is required");
    }
}
