pub mod api;
pub mod csv_import;
pub mod ui;
