//! Chat control surface.
//!
//! Lets operators start and stop the managed loops from Telegram:
//!
//! - `ControlCommand`: parsed chat command or menu button
//! - `ControlSurface`: maps commands to lifecycle operations and reply texts
//! - `ControlListener`: long-polls the Bot API for updates
//! - `UpdateSource`: the update channel, implemented by `TelegramNotifier`

mod command;
mod listener;
mod surface;
mod updates;

pub use command::{CommandParseError, ControlCommand};
pub use listener::{ControlListener, UpdateSource};
pub use surface::{ControlReply, ControlSurface};
pub use updates::{CallbackQuery, Chat, Message, Update};
