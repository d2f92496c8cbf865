pub mod client;
pub mod template;

pub use client::{DispatchService, HttpDispatcher};
pub use template::{compose, render_message, OutgoingMessage, DEFAULT_SUBJECT, DEFAULT_TEMPLATE};
