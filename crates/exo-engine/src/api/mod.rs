pub mod types;
pub mod viewer;
