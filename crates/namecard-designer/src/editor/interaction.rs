//! Command dispatch for pointer, transform and context menu input.

use namecard_core::error::DocumentError;

use super::NamecardEditor;
use crate::commands::EditorCommand;

impl NamecardEditor {
    /// Applies one host command and publishes the resulting events.
    ///
    /// A command aimed at an object that no longer exists fails with
    /// `ObjectNotFound` and changes nothing.
    pub fn handle(&mut self, command: EditorCommand) -> Result<(), DocumentError> {
        let doc = &mut self.document;
        let events = match command {
            EditorCommand::PointerDown {
                point,
                button,
                modifiers,
            } => self.selection.pointer_down(doc, point, button, modifiers),
            EditorCommand::PointerUp { point } => self.selection.pointer_up(doc, point),
            EditorCommand::Move { dx, dy } => self.selection.move_by(doc, dx, dy)?,
            EditorCommand::Scale { scale_x, scale_y } => {
                self.selection.scale_to(doc, scale_x, scale_y)?
            }
            EditorCommand::Rotate { angle } => self.selection.rotate_to(doc, angle)?,
            EditorCommand::Commit => self.selection.commit(doc)?,
            EditorCommand::ContextAction(action) => self.selection.invoke_action(doc, action)?,
            EditorCommand::CloseContextMenu => self.selection.close_menu(),
            EditorCommand::ClearSelection => self.selection.clear(doc),
            EditorCommand::SelectBackground => self.selection.select_background(doc),
        };
        self.publish(events);
        self.flush();
        Ok(())
    }

    /// Makes the topmost background image active.
    pub fn select_background(&mut self) -> Option<u64> {
        let events = self.selection.select_background(&mut self.document);
        self.publish(events);
        self.document
            .active_object()
            .filter(|o| o.object.is_background())
            .map(|o| o.id)
    }

    /// Makes `id` the active object.
    pub fn select(&mut self, id: u64) -> Result<(), DocumentError> {
        let events = self.selection.select(&mut self.document, id)?;
        self.publish(events);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        let events = self.selection.clear(&mut self.document);
        self.publish(events);
    }
}
