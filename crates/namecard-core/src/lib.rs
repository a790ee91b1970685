//! # Namecard Core
//!
//! Core types and utilities shared by the namecard editor crates:
//! error taxonomy, paper/pixel units, property values and the typed
//! event bus the editor uses to talk to its host.

pub mod error;
pub mod event_bus;
pub mod properties;
pub mod units;

pub use error::{DocumentError, Error, ObjectError, Result, TemplateError};

pub use event_bus::{
    ContextMenuEvent, DocumentEvent, EditorEvent, EventBus, EventBusConfig, EventCategory,
    EventFilter, PropertyEvent, SelectionEvent, SubscriptionId, TemplateEvent,
};

pub use properties::{find_property, Property, PropertyValue};
pub use units::{cm_to_px, format_cm, px_to_cm, PaperSize, PX_PER_CM};
