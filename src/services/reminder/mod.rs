//! Periodic reminder broadcast.

mod service;

pub use service::ReminderService;
