mod state;
mod view;

pub use state::{list_config, status_options, stats_config};
pub use view::InvitationCodeList;
