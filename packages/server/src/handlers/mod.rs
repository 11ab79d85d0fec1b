pub mod auth;
pub mod dashboard;
pub mod event;
pub mod registration;
pub mod winner;
