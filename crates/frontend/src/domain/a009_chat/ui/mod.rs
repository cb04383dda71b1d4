mod link_preview;
mod view;
pub mod view_model;

pub use view::ChatSupport;
