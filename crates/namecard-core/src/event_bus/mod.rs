//! # Event Bus Module
//!
//! Typed notifications from the editor core to its host.
//!
//! ## Overview
//!
//! - The editor publishes `EditorEvent`s without knowing who listens
//! - Hosts subscribe with a category filter, or poll a broadcast receiver
//! - Each editor owns its bus; there is no global instance
//!
//! ## Usage
//!
//! ```rust
//! use namecard_core::event_bus::{EditorEvent, EventBus, EventCategory, EventFilter, SelectionEvent};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Selection]),
//!     |event| {
//!         if let EditorEvent::Selection(selection) = event {
//!             println!("{}", selection.description());
//!         }
//!     },
//! );
//!
//! bus.publish(EditorEvent::Selection(SelectionEvent::Cleared));
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
