pub mod booking;
pub mod models;
pub mod registration;
pub mod request;
pub mod ui;
