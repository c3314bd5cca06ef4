pub mod batch;
pub mod list;
