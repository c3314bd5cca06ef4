mod state;
mod view;

pub use state::{available_actions, build_request, status_after};
pub use view::MassInvitationDialog;
