pub mod dashboard;
pub mod setup;
pub mod lead_form;
pub mod followups;
pub mod lead_list;
pub mod message_log;
