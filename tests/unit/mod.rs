pub mod booking_rules;
pub mod registration_rules;
pub mod request_rules;
