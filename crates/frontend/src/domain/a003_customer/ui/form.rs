use crate::domain::a003_customer::api;
use crate::shared::modal_frame::ModalFrame;
use contracts::domain::a003_customer::aggregate::{Customer, CustomerDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Modal form creating a customer.
#[component]
pub fn CustomerForm(on_saved: Callback<Customer>, on_cancel: Callback<()>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let save = move |_| {
        let dto = CustomerDto {
            id: None,
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            address: optional(address.get_untracked()),
            city: optional(city.get_untracked()),
        };
        if let Err(msg) = dto.validate() {
            error.set(Some(msg));
            return;
        }
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match api::create_customer(&dto).await {
                Ok(customer) => {
                    log::info!("customer {} created", customer.id);
                    on_saved.run(customer);
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    saving.set(false);
                }
            }
        });
    };

    view! {
        <ModalFrame title="New customer" on_close=on_cancel modal_style="width: 480px;".to_string()>
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Name"</Label>
                <Input value=name />
                <Label>"Email"</Label>
                <Input value=email placeholder="name@company.com" />
                <Label>"Phone"</Label>
                <Input value=phone />
                <Label>"City"</Label>
                <Input value=city />
                <Label>"Address"</Label>
                <Input value=address />
            </Flex>
            <div class="modal__footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </ModalFrame>
    }
}
