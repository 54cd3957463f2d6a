//! Mock implementations for testing purposes.
//!
//! - `clients`: mock node client
//! - `services`: mock notifier and update source
//! - `models`: builders for blocks, transactions and configuration

mod clients;
mod models;
mod services;

#[allow(unused_imports)]
pub use clients::*;
#[allow(unused_imports)]
pub use models::*;
#[allow(unused_imports)]
pub use services::*;
