use super::view_model::ContractDetailsVm;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_money, format_opt_date, format_opt_datetime, EMPTY_CELL};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a001_contract::aggregate::{Contract, SignatureVerification};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ContractDetails(id: i64, on_close: Callback<()>) -> impl IntoView {
    let vm = ContractDetailsVm::new(id, use_request_guard());
    vm.load();

    view! {
        <PageFrame page_id="a001_contract--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || vm.contract.with(|c| c.as_ref().map(|c| c.contract_number.clone()))
                            .unwrap_or_else(|| "Loading...".to_string())}
                    </h1>
                    {move || vm.contract.with(|c| c.as_ref().map(|c| c.status)).map(|status| view! {
                        <UiBadge variant=status.badge_variant().to_string()>{status.label()}</UiBadge>
                    })}
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.load()>
                        {icon("refresh")}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Close"
                    </Button>
                </div>
            </div>

            <ErrorPanel error=vm.error on_retry=Callback::new(move |_| vm.load()) />
            {move || vm.notice.get().map(|text| view! {
                <div class="alert alert--success">{icon("check")}<span>{text}</span></div>
            })}

            {move || vm.contract.get().map(|contract| view! {
                <div class="page__content details-grid">
                    <ContractSummary contract=contract.clone() />
                    <StatusActions vm=vm contract=contract.clone() />
                    <SignatureSection vm=vm contract=contract />
                </div>
            })}
        </PageFrame>
    }
}

#[component]
fn ContractSummary(contract: Contract) -> impl IntoView {
    let today = chrono::Local::now().date_naive();
    let remaining = contract.days_until_end(today).map(|days| {
        if days < 0 {
            format!("ended {} days ago", -days)
        } else {
            format!("{} days left", days)
        }
    });

    view! {
        <section class="details-section">
            <h3 class="details-section__title">"Contract"</h3>
            <dl class="details-list">
                <dt>"Customer"</dt>
                <dd>{contract.customer_name.clone().unwrap_or_else(|| format!("#{}", contract.customer_id))}</dd>
                <dt>"Start"</dt>
                <dd>{format_opt_date(contract.start_date)}</dd>
                <dt>"End"</dt>
                <dd>
                    {format_opt_date(contract.end_date)}
                    {remaining.map(|text| view! { <span class="details-list__hint">{format!(" ({})", text)}</span> })}
                </dd>
                <dt>"Total value"</dt>
                <dd>{contract.total_value.map(format_money).unwrap_or_else(|| EMPTY_CELL.to_string())}</dd>
                <dt>"Description"</dt>
                <dd>{contract.description.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</dd>
            </dl>
        </section>
    }
}

#[component]
fn StatusActions(vm: ContractDetailsVm, contract: Contract) -> impl IntoView {
    let transitions = contract.status.allowed_transitions();

    view! {
        <section class="details-section">
            <h3 class="details-section__title">"Status"</h3>
            {if transitions.is_empty() {
                view! { <p class="details-section__empty">"No further status changes."</p> }.into_any()
            } else {
                view! {
                    <Flex gap=FlexGap::Small>
                        {transitions.iter().map(|&next| view! {
                            <Button
                                appearance=ButtonAppearance::Secondary
                                disabled=Signal::derive(move || vm.busy.get())
                                on_click=move |_| vm.change_status(next)
                            >
                                {format!("Mark as {}", next.label().to_lowercase())}
                            </Button>
                        }).collect_view()}
                    </Flex>
                }.into_any()
            }}
        </section>
    }
}

#[component]
fn SignatureSection(vm: ContractDetailsVm, contract: Contract) -> impl IntoView {
    let can_request = contract.can_request_signature();

    view! {
        <section class="details-section">
            <h3 class="details-section__title">"Digital signature"</h3>
            <p>{contract.signature_status.label()}</p>

            <Show when=move || can_request>
                <Flex vertical=true gap=FlexGap::Small style="max-width: 420px;">
                    <Label>"Signer name"</Label>
                    <Input value=vm.signer_name placeholder="Full name" />
                    <Label>"Signer email"</Label>
                    <Input value=vm.signer_email placeholder="name@company.com" />
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.busy.get())
                        on_click=move |_| vm.request_signature()
                    >
                        {icon("pen")}
                        " Request signature"
                    </Button>
                </Flex>
            </Show>

            <Flex gap=FlexGap::Small style="margin-top: 12px;">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.busy.get())
                    on_click=move |_| vm.verify()
                >
                    "Verify signature"
                </Button>
            </Flex>

            {move || vm.verification.get().map(|v| view! { <VerificationResult verification=v /> })}
        </section>
    }
}

#[component]
fn VerificationResult(verification: SignatureVerification) -> impl IntoView {
    let (variant, title) = if verification.valid {
        ("success", "Signature is valid")
    } else {
        ("error", "Signature is not valid")
    };

    view! {
        <div class="signature-verification">
            <UiBadge variant=variant.to_string()>{title}</UiBadge>
            <dl class="details-list">
                <dt>"Signer"</dt>
                <dd>{verification.signer_name.unwrap_or_else(|| EMPTY_CELL.to_string())}</dd>
                <dt>"Signed at"</dt>
                <dd>{format_opt_datetime(verification.signed_at)}</dd>
                <dt>"Certificate issuer"</dt>
                <dd>{verification.certificate_issuer.unwrap_or_else(|| EMPTY_CELL.to_string())}</dd>
            </dl>
            {verification.message.map(|m| view! { <p class="signature-verification__message">{m}</p> })}
        </div>
    }
}
