pub mod error_panel;
pub mod filter_panel;
pub mod pagination_controls;
pub mod table_checkbox;
pub mod ui;
