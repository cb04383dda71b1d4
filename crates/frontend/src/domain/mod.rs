pub mod a001_contract;
pub mod a002_device;
pub mod a003_customer;
pub mod a004_inventory;
pub mod a005_spare_part;
pub mod a006_supplier;
pub mod a007_task;
pub mod a008_service_request;
pub mod a009_chat;
