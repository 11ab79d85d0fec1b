pub mod auth;
pub mod event;
pub mod registration;
pub mod shared;
pub mod winner;
