//! Event type definitions for the editor event bus.
//!
//! The editor core never calls host callbacks directly; every observable
//! change is published as one of these typed notifications. Events are
//! cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

use crate::properties::Property;

/// Root event enum for all editor notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// Active object changes
    Selection(SelectionEvent),
    /// Live property updates for the property panel
    Property(PropertyEvent),
    /// Document lifecycle and redraw requests
    Document(DocumentEvent),
    /// Right-click menu
    ContextMenu(ContextMenuEvent),
    /// Template import and profile binding
    Template(TemplateEvent),
}

impl EditorEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            EditorEvent::Selection(_) => EventCategory::Selection,
            EditorEvent::Property(_) => EventCategory::Property,
            EditorEvent::Document(_) => EventCategory::Document,
            EditorEvent::ContextMenu(_) => EventCategory::ContextMenu,
            EditorEvent::Template(_) => EventCategory::Template,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            EditorEvent::Selection(e) => e.description(),
            EditorEvent::Property(e) => e.description(),
            EditorEvent::Document(e) => e.description(),
            EditorEvent::ContextMenu(e) => e.description(),
            EditorEvent::Template(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Selection events.
    Selection,
    /// Property change events.
    Property,
    /// Document events.
    Document,
    /// Context menu events.
    ContextMenu,
    /// Template events.
    Template,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Selection => write!(f, "Selection"),
            EventCategory::Property => write!(f, "Property"),
            EventCategory::Document => write!(f, "Document"),
            EventCategory::ContextMenu => write!(f, "ContextMenu"),
            EventCategory::Template => write!(f, "Template"),
        }
    }
}

/// Selection events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionEvent {
    /// A new object became active.
    Changed {
        /// Id of the active object.
        id: u64,
        /// Kind tag of the active object (`text`, `image`, ...).
        kind: String,
    },
    /// Nothing is active any more.
    Cleared,
}

impl SelectionEvent {
    pub fn description(&self) -> String {
        match self {
            SelectionEvent::Changed { id, kind } => format!("Selected {} #{}", kind, id),
            SelectionEvent::Cleared => "Selection cleared".to_string(),
        }
    }
}

/// Property events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyEvent {
    /// One or more properties of an object changed.
    Changed {
        /// Id of the changed object.
        id: u64,
        /// Full property snapshot after the change.
        properties: Vec<Property>,
    },
}

impl PropertyEvent {
    pub fn description(&self) -> String {
        match self {
            PropertyEvent::Changed { id, properties } => {
                format!("Object #{} changed ({} properties)", id, properties.len())
            }
        }
    }
}

/// Document events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentEvent {
    /// The host surface should redraw.
    Dirty,
    /// The whole document was swapped for a new one.
    Replaced {
        /// Load generation that produced the document.
        generation: u64,
        /// Number of objects in the new document.
        object_count: usize,
    },
    /// All objects were removed.
    Cleared,
    /// The paper/canvas size changed.
    Resized {
        /// New canvas width in pixels.
        width_px: f64,
        /// New canvas height in pixels.
        height_px: f64,
    },
}

impl DocumentEvent {
    pub fn description(&self) -> String {
        match self {
            DocumentEvent::Dirty => "Document dirty".to_string(),
            DocumentEvent::Replaced {
                generation,
                object_count,
            } => format!(
                "Document replaced (load {}, {} objects)",
                generation, object_count
            ),
            DocumentEvent::Cleared => "Document cleared".to_string(),
            DocumentEvent::Resized {
                width_px,
                height_px,
            } => format!("Document resized to {}x{}px", width_px, height_px),
        }
    }
}

/// Context menu events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContextMenuEvent {
    /// The menu opened over a target.
    Opened {
        /// Object under the pointer, if any.
        target: Option<u64>,
        /// Pointer x in canvas pixels.
        x: f64,
        /// Pointer y in canvas pixels.
        y: f64,
        /// The platform's own menu must not be shown.
        suppress_native: bool,
    },
    /// The menu closed without an action.
    Closed,
    /// An action was picked from the menu.
    ActionInvoked {
        /// Action name (`duplicate`, `delete`, ...).
        action: String,
        /// Object the action applied to.
        target: u64,
    },
}

impl ContextMenuEvent {
    pub fn description(&self) -> String {
        match self {
            ContextMenuEvent::Opened { target, x, y, .. } => {
                format!("Context menu at ({}, {}) target {:?}", x, y, target)
            }
            ContextMenuEvent::Closed => "Context menu closed".to_string(),
            ContextMenuEvent::ActionInvoked { action, target } => {
                format!("Context action {} on #{}", action, target)
            }
        }
    }
}

/// Template events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateEvent {
    /// An object in the payload was skipped.
    ObjectSkipped {
        /// Index in the payload's `objects` array.
        index: usize,
        /// Why it was skipped.
        reason: String,
    },
    /// Import finished and the document was swapped.
    ImportFinished {
        /// Load generation.
        generation: u64,
        /// Number of per-object warnings.
        warnings: usize,
    },
    /// Import failed; the previous document is untouched.
    ImportFailed {
        /// Failure reason.
        reason: String,
    },
    /// A profile was bound onto the text fields.
    ProfileBound {
        /// Number of text fields rewritten.
        updated: usize,
    },
}

impl TemplateEvent {
    pub fn description(&self) -> String {
        match self {
            TemplateEvent::ObjectSkipped { index, reason } => {
                format!("Skipped object {}: {}", index, reason)
            }
            TemplateEvent::ImportFinished {
                generation,
                warnings,
            } => format!("Import {} finished with {} warnings", generation, warnings),
            TemplateEvent::ImportFailed { reason } => format!("Import failed: {}", reason),
            TemplateEvent::ProfileBound { updated } => {
                format!("Profile bound to {} fields", updated)
            }
        }
    }
}
