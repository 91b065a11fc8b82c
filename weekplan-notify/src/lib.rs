//! Reminder scheduling and notification delivery.
//!
//! This crate owns everything between a validated schedule and a message
//! arriving on a device: the per-user reminder table with its periodic
//! tick, and the push/SMS/local transports the dispatcher fans out to.

pub mod dispatch;
pub mod local;
pub mod push;
pub mod scheduler;
pub mod sms;

pub use dispatch::{Dispatcher, UserContext};
pub use push::FcmClient;
pub use scheduler::ReminderScheduler;
pub use sms::{SmsClient, validate_phone_number};
