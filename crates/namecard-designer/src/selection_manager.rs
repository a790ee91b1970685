use namecard_core::error::DocumentError;
use namecard_core::event_bus::{ContextMenuEvent, EditorEvent, PropertyEvent, SelectionEvent};

use crate::commands::{ActionOutcome, ContextAction, Modifiers, PointerButton};
use crate::document::Document;
use crate::model::{Point, SceneElement};
use crate::scale::{settle, SettleMode};

/// Hit-test slop in canvas pixels.
pub const HIT_TOLERANCE: f64 = 3.0;

/// Pointer interaction state of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected(u64),
    Moving(u64),
    Scaling(u64),
    Rotating(u64),
}

impl InteractionState {
    /// The object the state refers to, if any.
    pub fn target(self) -> Option<u64> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Selected(id)
            | InteractionState::Moving(id)
            | InteractionState::Scaling(id)
            | InteractionState::Rotating(id) => Some(id),
        }
    }

    pub fn is_transforming(self) -> bool {
        matches!(
            self,
            InteractionState::Moving(_) | InteractionState::Scaling(_) | InteractionState::Rotating(_)
        )
    }
}

/// An open right-click menu. Independent of the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenu {
    pub target: Option<u64>,
    pub position: Point,
}

type Events = Vec<EditorEvent>;

/// Drives selection, transform gestures and the context menu.
///
/// Every method returns the events the host should see; the caller
/// publishes them. The document is passed in, never owned.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    state: InteractionState,
    menu: Option<ContextMenu>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.state.target()
    }

    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.menu
    }

    /// Topmost object under `point`.
    ///
    /// Guides are never hit. Background images are only hit when
    /// `include_background` is set, so text over a background wins.
    pub fn hit_test(doc: &Document, point: Point, include_background: bool) -> Option<u64> {
        doc.objects()
            .iter()
            .rev()
            .filter(|o| {
                o.object.is_selectable() || (include_background && o.object.is_background())
            })
            .find(|o| o.object.contains_point(point, HIT_TOLERANCE))
            .map(|o| o.id)
    }

    pub fn pointer_down(
        &mut self,
        doc: &mut Document,
        point: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Events {
        let hit = Self::hit_test(doc, point, modifiers.alt);

        if button == PointerButton::Secondary {
            self.menu = Some(ContextMenu {
                target: hit,
                position: point,
            });
            tracing::debug!(target_id = ?hit, x = point.x, y = point.y, "Context menu opened");
            return vec![EditorEvent::ContextMenu(ContextMenuEvent::Opened {
                target: hit,
                x: point.x,
                y: point.y,
                suppress_native: true,
            })];
        }

        let mut events = self.close_menu();
        if let Some(id) = hit {
            // Hit came from the document, so it exists.
            if let Ok(selected) = self.select(doc, id) {
                events.extend(selected);
            }
        }
        events
    }

    /// Releasing over empty canvas outside a gesture drops the selection.
    pub fn pointer_up(&mut self, doc: &mut Document, point: Point) -> Events {
        if self.state.is_transforming() || self.state == InteractionState::Idle {
            return Vec::new();
        }
        let active_is_background = doc
            .active_object()
            .is_some_and(|o| o.object.is_background());
        if Self::hit_test(doc, point, active_is_background).is_none() {
            return self.clear(doc);
        }
        Vec::new()
    }

    pub fn select(&mut self, doc: &mut Document, id: u64) -> Result<Events, DocumentError> {
        doc.set_active(id)?;
        let changed = self.state.target() != Some(id);
        self.state = InteractionState::Selected(id);
        if !changed {
            return Ok(Vec::new());
        }
        let kind = doc
            .get(id)
            .map(|o| o.object.kind().tag().to_string())
            .unwrap_or_default();
        Ok(vec![EditorEvent::Selection(SelectionEvent::Changed { id, kind })])
    }

    /// Makes the topmost background image active.
    pub fn select_background(&mut self, doc: &mut Document) -> Events {
        let background = doc
            .objects()
            .iter()
            .rev()
            .find(|o| o.object.is_background())
            .map(|o| o.id);
        match background {
            Some(id) => self.select(doc, id).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    pub fn clear(&mut self, doc: &mut Document) -> Events {
        doc.clear_active();
        if self.state == InteractionState::Idle {
            return Vec::new();
        }
        self.state = InteractionState::Idle;
        vec![EditorEvent::Selection(SelectionEvent::Cleared)]
    }

    /// Drag tick on the active object.
    pub fn move_by(&mut self, doc: &mut Document, dx: f64, dy: f64) -> Result<Events, DocumentError> {
        let Some(id) = self.state.target() else {
            return Ok(Vec::new());
        };
        self.state = InteractionState::Moving(id);
        doc.modify(id, |o| o.translate(dx, dy))?;
        Ok(vec![property_event(doc, id)])
    }

    /// Scale tick on the active object. Text is settled on every tick.
    pub fn scale_to(
        &mut self,
        doc: &mut Document,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<Events, DocumentError> {
        let Some(id) = self.state.target() else {
            return Ok(Vec::new());
        };
        self.state = InteractionState::Scaling(id);
        doc.modify(id, |o| {
            o.set_scale(scale_x, scale_y);
            settle(o, SettleMode::Interactive);
        })?;
        Ok(vec![property_event(doc, id)])
    }

    pub fn rotate_to(&mut self, doc: &mut Document, angle: f64) -> Result<Events, DocumentError> {
        let Some(id) = self.state.target() else {
            return Ok(Vec::new());
        };
        self.state = InteractionState::Rotating(id);
        doc.modify(id, |o| o.set_angle(angle))?;
        Ok(vec![property_event(doc, id)])
    }

    /// Ends the current gesture and settles the object.
    pub fn commit(&mut self, doc: &mut Document) -> Result<Events, DocumentError> {
        if !self.state.is_transforming() {
            return Ok(Vec::new());
        }
        let Some(id) = self.state.target() else {
            return Ok(Vec::new());
        };
        self.state = InteractionState::Selected(id);
        doc.modify(id, |o| settle(o, SettleMode::Commit))?;
        Ok(vec![property_event(doc, id)])
    }

    pub fn close_menu(&mut self) -> Events {
        match self.menu.take() {
            Some(_) => vec![EditorEvent::ContextMenu(ContextMenuEvent::Closed)],
            None => Vec::new(),
        }
    }

    /// Runs a menu action on the menu's target and closes the menu.
    ///
    /// With no open menu, or a menu over empty canvas, nothing happens.
    pub fn invoke_action(
        &mut self,
        doc: &mut Document,
        action: ContextAction,
    ) -> Result<Events, DocumentError> {
        let Some(target) = self.menu.and_then(|m| m.target) else {
            return Ok(self.close_menu());
        };
        self.menu = None;

        let outcome = action.apply(doc, target)?;
        tracing::debug!(action = %action, target, ?outcome, "Context action applied");

        let mut events = vec![EditorEvent::ContextMenu(ContextMenuEvent::ActionInvoked {
            action: action.name().to_string(),
            target,
        })];
        match outcome {
            ActionOutcome::Duplicated { id } => events.extend(self.select(doc, id)?),
            ActionOutcome::Deleted if self.state.target() == Some(target) => {
                events.extend(self.clear(doc));
            }
            ActionOutcome::Deleted | ActionOutcome::Reordered(_) => {}
        }
        Ok(events)
    }

    /// Forgets everything; used when the document is replaced.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.menu = None;
    }
}

fn property_event(doc: &Document, id: u64) -> EditorEvent {
    let properties = doc
        .get(id)
        .map(|o| o.object.properties())
        .unwrap_or_default();
    EditorEvent::Property(PropertyEvent::Changed { id, properties })
}
