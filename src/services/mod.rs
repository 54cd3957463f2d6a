//! Core services implementing the business logic.
//!
//! This module contains the main service implementations:
//! - `blockchain`: Node client interfaces and the EVM JSON-RPC client
//! - `blockwatcher`: Poll loop following the chain head
//! - `filter`: Payment matching
//! - `notification`: Alert rendering and delivery
//! - `reminder`: Periodic reminder broadcast
//! - `lifecycle`: Start/stop control of the loops
//! - `control`: Chat commands driving the lifecycle controller

pub mod blockchain;
pub mod blockwatcher;
pub mod control;
pub mod filter;
pub mod lifecycle;
pub mod notification;
pub mod reminder;
