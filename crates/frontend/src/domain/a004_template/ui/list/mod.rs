mod state;
mod view;

pub use state::{list_config, stats_config};
pub use view::TemplateCatalog;
