//! Core types for Responses API requests, responses and stream events.

pub mod event;
pub mod request;
pub mod response;

pub use event::StreamEvent;
pub use request::{ResponseInput, ResponseRequest, Role, Turn, TurnContent};
pub use response::{OutputContent, OutputItem, ResponseObject, ResponseUsage};
