//! Record models for message delivery logs.

mod log_record;

pub use log_record::{DeliveryStatus, LogRecord, MessageType};
