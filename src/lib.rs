//! Buy alert monitor.
//!
//! Watches an EVM-compatible chain for payments to one contract address and
//! announces every payment at or above a minimum value in a Telegram channel. A
//! second loop broadcasts a periodic reminder. Both loops are started and stopped
//! through a lifecycle controller, driven from chat commands or at startup.
//!
//! # Modules
//! - `bootstrap`: Service wiring
//! - `models`: Configuration and domain types
//! - `services`: Node client, poll loop, filtering, notifications, lifecycle control
//! - `utils`: Logging, metrics, backoff and HTTP helpers

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
