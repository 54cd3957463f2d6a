//! Start/stop management for the long-running loops.
//!
//! - `CancellationToken`: cooperative cancellation shared with a running loop
//! - `sleep_or_cancel`: a sleep that ends early on cancellation
//! - `ManagedLoop`: the interface every startable loop implements
//! - `TaskLifecycleController`: owns one handle per loop identity

mod controller;
mod token;

pub use controller::{ManagedLoop, TaskLifecycleController};
pub use token::{sleep_or_cancel, CancellationToken};
