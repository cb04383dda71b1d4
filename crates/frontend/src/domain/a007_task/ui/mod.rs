pub mod board;
pub mod view_model;
