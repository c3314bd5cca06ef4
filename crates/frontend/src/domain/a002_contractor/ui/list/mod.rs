mod state;
mod view;

pub use state::{course_stats, list_config, stats_config};
pub use view::ContractorList;
