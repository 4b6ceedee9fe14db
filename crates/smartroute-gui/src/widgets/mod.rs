//! UI widgets for the SmartRoute GUI

pub mod home_cards;
pub mod login;
pub mod markdown;
pub mod prospect_form;
pub mod result_display;
pub mod route_form;
pub mod saved_routes;
pub mod technical_log;
