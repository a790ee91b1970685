//! Typed commands the host sends to the editor.
//!
//! The host surface never mutates the document directly. Pointer input,
//! transform ticks and menu picks arrive as [`EditorCommand`]s, and the
//! editor answers with events on its bus.

use namecard_core::error::DocumentError;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::model::{Point, SceneElement};

/// Offset applied to a duplicated object on both axes.
pub const DUPLICATE_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    /// Lets a pointer-down pick background images.
    pub alt: bool,
}

impl Modifiers {
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }
}

/// Actions offered by the right-click menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextAction {
    Duplicate,
    Delete,
    BringToFront,
    SendToBack,
    BringForward,
    SendBackward,
}

impl ContextAction {
    pub const ALL: [ContextAction; 6] = [
        ContextAction::Duplicate,
        ContextAction::Delete,
        ContextAction::BringToFront,
        ContextAction::SendToBack,
        ContextAction::BringForward,
        ContextAction::SendBackward,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContextAction::Duplicate => "duplicate",
            ContextAction::Delete => "delete",
            ContextAction::BringToFront => "bring_to_front",
            ContextAction::SendToBack => "send_to_back",
            ContextAction::BringForward => "bring_forward",
            ContextAction::SendBackward => "send_backward",
        }
    }

    /// Applies the action to `target`.
    pub fn apply(self, doc: &mut Document, target: u64) -> Result<ActionOutcome, DocumentError> {
        match self {
            ContextAction::Duplicate => {
                let source = doc
                    .get(target)
                    .ok_or(DocumentError::ObjectNotFound { id: target })?;
                let name = format!("{} copy", source.name);
                let mut object = source.object.clone();
                object.translate(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
                let id = doc.add_named(name, object);
                Ok(ActionOutcome::Duplicated { id })
            }
            ContextAction::Delete => {
                doc.remove_object(target)?;
                Ok(ActionOutcome::Deleted)
            }
            ContextAction::BringToFront => doc.bring_to_front(target).map(ActionOutcome::Reordered),
            ContextAction::SendToBack => doc.send_to_back(target).map(ActionOutcome::Reordered),
            ContextAction::BringForward => doc.bring_forward(target).map(ActionOutcome::Reordered),
            ContextAction::SendBackward => doc.send_backward(target).map(ActionOutcome::Reordered),
        }
    }
}

impl std::fmt::Display for ContextAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a context action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Duplicated { id: u64 },
    Deleted,
    /// Whether the stacking order actually changed.
    Reordered(bool),
}

/// Commands accepted by `NamecardEditor::handle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorCommand {
    PointerDown {
        point: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerUp {
        point: Point,
    },
    /// Drag tick on the active object.
    Move { dx: f64, dy: f64 },
    /// Scale tick; factors are relative to the object's last settled size.
    Scale { scale_x: f64, scale_y: f64 },
    /// Rotation tick; absolute angle in degrees.
    Rotate { angle: f64 },
    /// End of a move/scale/rotate gesture.
    Commit,
    ContextAction(ContextAction),
    CloseContextMenu,
    ClearSelection,
    SelectBackground,
}

impl EditorCommand {
    pub fn click(x: f64, y: f64) -> Self {
        EditorCommand::PointerDown {
            point: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
        }
    }

    pub fn right_click(x: f64, y: f64) -> Self {
        EditorCommand::PointerDown {
            point: Point::new(x, y),
            button: PointerButton::Secondary,
            modifiers: Modifiers::default(),
        }
    }

    pub fn release(x: f64, y: f64) -> Self {
        EditorCommand::PointerUp {
            point: Point::new(x, y),
        }
    }
}
