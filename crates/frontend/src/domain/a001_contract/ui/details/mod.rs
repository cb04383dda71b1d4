//! Contract details (MVVM):
//! - view_model.rs: ContractDetailsVm, signals and commands
//! - view.rs: ContractDetails component

mod view;
mod view_model;

pub use view::ContractDetails;
pub use view_model::ContractDetailsVm;
