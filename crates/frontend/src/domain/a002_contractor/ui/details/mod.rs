mod view;
mod view_model;

pub use view::ContractorDetails;
pub use view_model::ContractorDetailsViewModel;
