//! Event listing over a built-in catalog.

pub mod catalog;
pub mod list;

pub use catalog::{EVENTS, Event, EventCategory};
pub use list::{EventFilter, ListEventsTool};
