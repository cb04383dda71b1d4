use crate::domain::a001_contract::api;
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a001_contract::aggregate::{
    Contract, ContractStatus, SignatureRequest, SignatureStatus, SignatureVerification,
    StatusChangeRequest,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct ContractDetailsVm {
    pub id: i64,
    pub contract: RwSignal<Option<Contract>>,
    pub verification: RwSignal<Option<SignatureVerification>>,
    pub signer_name: RwSignal<String>,
    pub signer_email: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub busy: RwSignal<bool>,
    guard: StoredValue<RequestGuard>,
}

impl ContractDetailsVm {
    pub fn new(id: i64, guard: StoredValue<RequestGuard>) -> Self {
        Self {
            id,
            contract: RwSignal::new(None),
            verification: RwSignal::new(None),
            signer_name: RwSignal::new(String::new()),
            signer_email: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            loading: RwSignal::new(false),
            busy: RwSignal::new(false),
            guard,
        }
    }

    pub fn load(&self) {
        let vm = *self;
        let ticket = vm.guard.get_value().begin();
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = api::fetch_contract(vm.id).await;
            let signed = matches!(
                result.as_ref().map(|c| c.signature_status),
                Ok(SignatureStatus::Signed)
            );
            let committed = ticket.commit(move || {
                match result {
                    Ok(contract) => vm.contract.set(Some(contract)),
                    Err(e) => vm.error.set(Some(e.to_string())),
                }
                vm.loading.set(false);
            });
            if committed && signed {
                vm.verify();
            }
        });
    }

    /// Ask the contract service to verify the stored signature.
    pub fn verify(&self) {
        let vm = *self;
        let guard = vm.guard.get_value();
        vm.busy.set(true);
        spawn_local(async move {
            let result = api::verify_signature(vm.id).await;
            if guard.is_disposed() {
                return;
            }
            match result {
                Ok(verification) => vm.verification.set(Some(verification)),
                Err(e) => vm.error.set(Some(format!("Verification failed: {}", e))),
            }
            vm.busy.set(false);
        });
    }

    pub fn request_signature(&self) {
        let vm = *self;
        let request = SignatureRequest {
            contract_id: vm.id,
            signer_name: vm.signer_name.get_untracked().trim().to_string(),
            signer_email: vm.signer_email.get_untracked().trim().to_string(),
        };
        if let Err(msg) = request.validate() {
            vm.error.set(Some(msg));
            return;
        }

        let guard = vm.guard.get_value();
        vm.busy.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = api::request_signature(&request).await;
            if guard.is_disposed() {
                return;
            }
            vm.busy.set(false);
            match result {
                Ok(()) => {
                    log::info!("signature requested for contract {}", vm.id);
                    vm.notice.set(Some(format!(
                        "Signature request sent to {}",
                        request.signer_email
                    )));
                    vm.signer_name.set(String::new());
                    vm.signer_email.set(String::new());
                    vm.load();
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }

    pub fn change_status(&self, status: ContractStatus) {
        let vm = *self;
        let guard = vm.guard.get_value();
        vm.busy.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = api::change_status(vm.id, &StatusChangeRequest { status }).await;
            if guard.is_disposed() {
                return;
            }
            vm.busy.set(false);
            match result {
                Ok(contract) => {
                    vm.notice.set(Some(format!("Status changed to {}", status.label())));
                    vm.contract.set(Some(contract));
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }
}
