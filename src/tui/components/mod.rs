pub mod campaign_bar;
pub mod closed_modal;
pub mod contact_pane;
pub mod conversation_list;
pub mod empty_state;
pub mod status_bar;
