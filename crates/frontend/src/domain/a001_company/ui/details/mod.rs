//! Диалог создания/редактирования компании
//!
//! - view_model.rs: состояние формы и команды (load, save)
//! - view.rs: Leptos-компонент

mod view;
mod view_model;

pub use view::CompanyDetails;
pub use view_model::CompanyDetailsViewModel;
