pub mod error_banner;
pub mod export_buttons;
pub mod filter_panel;
pub mod letter_index;
pub mod modal;
pub mod pagination_controls;
pub mod stat_card;
