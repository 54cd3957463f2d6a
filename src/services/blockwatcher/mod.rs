//! Block watcher service implementation.
//!
//! Follows the chain head one block at a time and hands every matching transaction
//! to the event dispatcher.

mod cursor;
mod error;
mod service;

pub use cursor::ChainCursor;
pub use error::BlockWatcherError;
pub use service::BlockWatcherService;
