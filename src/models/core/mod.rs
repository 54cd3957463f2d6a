//! Core domain models for the buy alert monitor.
//!
//! This module contains the fundamental data structures that represent:
//! - Match criteria: which transactions count as a qualifying payment
//! - Alert events: a matched payment ready to be announced
//! - Notification content: what is sent to the messaging channel
//! - Loop control: identities and status strings of the managed loops

mod alert;
mod control;
mod criteria;
mod notification;

pub use alert::{to_display_value, AlertEvent, DISPLAY_DECIMALS};
pub use control::{ControlStatus, LoopExit, LoopId};
pub use criteria::MatchCriteria;
pub use notification::{LinkButton, NotificationContent};
