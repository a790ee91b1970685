//! Scene document: the ordered object list of one badge.
//!
//! Objects are kept in stacking order (bottom first). The list is always
//! partitioned by [`ZBand`], so every reorder is clamped to the object's
//! own band segment and band membership never changes.

use namecard_core::error::DocumentError;
use namecard_core::units::PaperSize;
use serde::{Deserialize, Serialize};

use crate::model::{SceneElement, SceneObject, TextField, ZBand};

/// An object owned by a document, with its stable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: u64,
    pub name: String,
    pub object: SceneObject,
}

impl CanvasObject {
    pub fn new(id: u64, object: SceneObject) -> Self {
        Self {
            id,
            name: object.default_name().to_string(),
            object,
        }
    }

    pub fn band(&self) -> ZBand {
        self.object.band()
    }
}

type DocResult<T> = std::result::Result<T, DocumentError>;

/// The live badge document.
#[derive(Debug, Clone)]
pub struct Document {
    objects: Vec<CanvasObject>,
    next_id: u64,
    paper: PaperSize,
    width_px: f64,
    height_px: f64,
    background_color: String,
    show_guides: bool,
    active: Option<u64>,
    dirty: bool,
}

impl Document {
    /// Creates an empty document sized for `paper`.
    pub fn new(paper: PaperSize) -> Self {
        let (width_px, height_px) = paper.to_px();
        Self {
            objects: Vec::new(),
            next_id: 1,
            paper,
            width_px,
            height_px,
            background_color: "#ffffff".to_string(),
            show_guides: true,
            active: None,
            dirty: false,
        }
    }

    /// Creates an empty document with an explicit pixel frame.
    ///
    /// Used by the codec, where the saved canvas size wins over the
    /// rounded paper size.
    pub fn with_frame(paper: PaperSize, width_px: f64, height_px: f64) -> Self {
        let mut doc = Self::new(paper);
        doc.width_px = width_px;
        doc.height_px = height_px;
        doc
    }

    pub fn paper(&self) -> PaperSize {
        self.paper
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    /// Sets the paper and the pixel frame derived from it.
    ///
    /// Object positions are left alone; see `refresh_coords`.
    pub fn set_paper(&mut self, paper: PaperSize) {
        let (w, h) = paper.to_px();
        self.paper = paper;
        self.width_px = w;
        self.height_px = h;
        self.dirty = true;
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = color.into();
        self.dirty = true;
    }

    pub fn show_guides(&self) -> bool {
        self.show_guides
    }

    pub(crate) fn set_show_guides(&mut self, show: bool) {
        self.show_guides = show;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.index_of(id).is_some()
    }

    /// Objects in stacking order, bottom first.
    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    /// Owned copy of the object list in stacking order.
    pub fn snapshot(&self) -> Vec<CanvasObject> {
        self.objects.clone()
    }

    pub fn get(&self, id: u64) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Position of `id` in the stacking order.
    pub fn stacking_index(&self, id: u64) -> Option<usize> {
        self.index_of(id)
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    fn require(&self, id: u64) -> DocResult<usize> {
        self.index_of(id)
            .ok_or(DocumentError::ObjectNotFound { id })
    }

    fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Range of stacking indices occupied by `band`.
    fn band_range(&self, band: ZBand) -> std::ops::Range<usize> {
        let start = self.objects.partition_point(|o| o.band() < band);
        let end = self.objects.partition_point(|o| o.band() <= band);
        start..end
    }

    /// Adds an object on top of its band and returns its id.
    pub fn add_object(&mut self, object: SceneObject) -> u64 {
        let id = self.generate_id();
        self.insert(CanvasObject::new(id, object));
        id
    }

    /// Adds an object with an explicit display name.
    pub fn add_named(&mut self, name: impl Into<String>, object: SceneObject) -> u64 {
        let id = self.generate_id();
        let mut entry = CanvasObject::new(id, object);
        entry.name = name.into();
        self.insert(entry);
        id
    }

    /// New objects go above everything already in their band, so insertion
    /// order within a band is paint order and no band is ever crossed.
    fn insert(&mut self, entry: CanvasObject) {
        let band = entry.band();
        let at = self.objects.partition_point(|o| o.band() <= band);
        self.objects.insert(at, entry);
        self.dirty = true;
    }

    /// Removes an object. Clears the active object if it was the one removed.
    pub fn remove_object(&mut self, id: u64) -> DocResult<CanvasObject> {
        let idx = self.require(id)?;
        let removed = self.objects.remove(idx);
        if self.active == Some(id) {
            self.active = None;
        }
        self.dirty = true;
        Ok(removed)
    }

    /// Removes every object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.active = None;
        self.dirty = true;
    }

    /// Applies `f` to one object's content and marks the document dirty.
    pub fn modify<R>(&mut self, id: u64, f: impl FnOnce(&mut SceneObject) -> R) -> DocResult<R> {
        let idx = self.require(id)?;
        let band = self.objects[idx].band();
        let result = f(&mut self.objects[idx].object);
        // Content edits may not move an object to another band.
        debug_assert_eq!(band, self.objects[idx].band());
        self.dirty = true;
        Ok(result)
    }

    pub fn rename(&mut self, id: u64, name: impl Into<String>) -> DocResult<()> {
        let idx = self.require(id)?;
        self.objects[idx].name = name.into();
        self.dirty = true;
        Ok(())
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active
    }

    pub fn active_object(&self) -> Option<&CanvasObject> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn set_active(&mut self, id: u64) -> DocResult<()> {
        self.require(id)?;
        self.active = Some(id);
        Ok(())
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Moves an object to the top of its band. Returns whether it moved.
    pub fn bring_to_front(&mut self, id: u64) -> DocResult<bool> {
        let idx = self.require(id)?;
        let range = self.band_range(self.objects[idx].band());
        let target = range.end - 1;
        Ok(self.move_to(idx, target))
    }

    /// Moves an object to the bottom of its band.
    pub fn send_to_back(&mut self, id: u64) -> DocResult<bool> {
        let idx = self.require(id)?;
        let range = self.band_range(self.objects[idx].band());
        Ok(self.move_to(idx, range.start))
    }

    /// Moves an object one step up, staying inside its band.
    pub fn bring_forward(&mut self, id: u64) -> DocResult<bool> {
        let idx = self.require(id)?;
        let range = self.band_range(self.objects[idx].band());
        if idx + 1 >= range.end {
            return Ok(false);
        }
        Ok(self.move_to(idx, idx + 1))
    }

    /// Moves an object one step down, staying inside its band.
    pub fn send_backward(&mut self, id: u64) -> DocResult<bool> {
        let idx = self.require(id)?;
        let range = self.band_range(self.objects[idx].band());
        if idx <= range.start {
            return Ok(false);
        }
        Ok(self.move_to(idx, idx - 1))
    }

    fn move_to(&mut self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        let entry = self.objects.remove(from);
        self.objects.insert(to, entry);
        self.dirty = true;
        true
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns and resets the redraw flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Recomputes cached geometry on every object after a frame change.
    pub fn refresh_coords(&mut self) {
        for entry in &mut self.objects {
            if let SceneObject::Text(text) = &mut entry.object {
                text.refresh_layout();
            }
        }
        self.dirty = true;
    }

    /// Removes every guide. Returns how many were removed.
    pub fn remove_guides(&mut self) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !o.object.is_guide());
        let removed = before - self.objects.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn guide_count(&self) -> usize {
        self.objects.iter().filter(|o| o.object.is_guide()).count()
    }

    /// Text fields in stacking order.
    pub fn text_fields(&self) -> impl Iterator<Item = (u64, &TextField)> {
        self.objects
            .iter()
            .filter_map(|o| o.object.as_text().map(|t| (o.id, t)))
    }

    pub(crate) fn text_field_mut(&mut self, id: u64) -> Option<&mut TextField> {
        self.objects
            .iter_mut()
            .find(|o| o.id == id)
            .and_then(|o| o.object.as_text_mut())
    }

    /// Non-guide objects with their positions, for comparisons across resizes.
    pub fn content_positions(&self) -> Vec<(u64, f64, f64)> {
        self.objects
            .iter()
            .filter(|o| !o.object.is_guide())
            .map(|o| {
                let p = o.object.position();
                (o.id, p.x, p.y)
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(PaperSize::BADGE)
    }
}
