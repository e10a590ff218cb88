//! # IO Module
//!
//! The boundary between the domain and whatever presents it.
//!
//! - **notifications**: turns operation results into short success/error
//!   messages for the user
//! - **display**: date, record type and advice formatting
//! - **log_host**: a [`NotificationHost`](crate::backend::domain::NotificationHost)
//!   that writes reminders to the log, used by the daemon

pub mod display;
pub mod log_host;
pub mod notifications;

pub use log_host::LogNotificationHost;
pub use notifications::{report, report_profile, Action, NotificationKind, UserNotification};
