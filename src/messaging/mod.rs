// Messaging module - transport commands and user-facing notifications

pub mod channels;
pub mod command;
pub mod notification;

pub use channels::{create_command_channel, create_notification_channel};
pub use command::TransportCommand;
pub use notification::{Notification, NotificationCategory, NotificationLevel};
