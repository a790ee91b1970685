//! Editor facade for host integration.
//! Owns the live document and routes host commands into it.
//!
//! This module is split into submodules:
//! - `interaction`: pointer/transform/context menu commands
//! - `properties`: property setters for the property panel
//! - `file_io`: template save/load on disk

mod file_io;
mod interaction;
mod properties;

use std::sync::Arc;

use namecard_core::error::{Error, ObjectError, TemplateError};
use namecard_core::event_bus::{DocumentEvent, EditorEvent, EventBus, SelectionEvent, TemplateEvent};
use namecard_core::units::PaperSize;
use namecard_settings::Config;

use crate::assets::{apply_assets, load_assets, ImageDecoder, LoadGeneration};
use crate::binding::{bind_profile, BindingOutcome, BindingReport, Profile};
use crate::document::{CanvasObject, Document};
use crate::geometry::{regenerate_guides, GuideOptions};
use crate::model::{ImageAsset, ImageRole, SceneObject};
use crate::selection_manager::{ContextMenu, InteractionState, SelectionManager};
use crate::serialization::{
    export_template, parse_template, ImportOptions, PayloadFormat, StagedTemplate, TemplateFile,
    TemplateMetadata,
};
use crate::templates::{default_document, TemplateStyle};

/// Summary of a committed template import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub generation: u64,
    pub object_count: usize,
    pub warnings: Vec<ObjectError>,
    pub format: PayloadFormat,
}

/// A parsed template whose image assets have not been decoded yet.
///
/// Holds no borrow of the editor, so the host can await `resolve` while
/// still handling input.
pub struct PendingImport {
    staged: StagedTemplate,
    generation: u64,
    decoder: Arc<dyn ImageDecoder>,
}

impl PendingImport {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn staged(&self) -> &StagedTemplate {
        &self.staged
    }

    /// Decodes every image the template references.
    pub async fn resolve(mut self) -> Result<ResolvedImport, TemplateError> {
        let loaded = load_assets(self.decoder, &self.staged.pending_assets).await?;
        apply_assets(&mut self.staged.document, &loaded);
        self.staged.document.take_dirty();
        Ok(ResolvedImport {
            staged: self.staged,
            generation: self.generation,
        })
    }
}

impl std::fmt::Debug for PendingImport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingImport")
            .field("generation", &self.generation)
            .field("pending_assets", &self.staged.pending_assets.len())
            .finish()
    }
}

/// A fully loaded template, ready to replace the live document.
#[derive(Debug)]
pub struct ResolvedImport {
    staged: StagedTemplate,
    generation: u64,
}

impl ResolvedImport {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The namecard editor.
pub struct NamecardEditor {
    document: Document,
    selection: SelectionManager,
    events: Arc<EventBus>,
    decoder: Arc<dyn ImageDecoder>,
    loads: LoadGeneration,
    config: Config,
    /// Whether guides carry the paper size label.
    size_label: bool,
    pub template_name: String,
    metadata: Option<TemplateMetadata>,
    pub current_file_path: Option<std::path::PathBuf>,
}

impl NamecardEditor {
    /// Creates an editor with an empty document at the configured paper size.
    pub fn new(config: Config, decoder: Arc<dyn ImageDecoder>) -> Self {
        Self::with_event_bus(config, decoder, Arc::new(EventBus::new()))
    }

    pub fn with_event_bus(config: Config, decoder: Arc<dyn ImageDecoder>, events: Arc<EventBus>) -> Self {
        let mut document = Document::new(config.paper.size());
        document.set_background_color(config.canvas.background_color.clone());
        document.set_show_guides(config.guides.show);
        document.take_dirty();
        Self {
            document,
            selection: SelectionManager::new(),
            events,
            decoder,
            loads: LoadGeneration::new(),
            config,
            size_label: false,
            template_name: "Untitled".to_string(),
            metadata: None,
            current_file_path: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.selection.state()
    }

    pub fn active_id(&self) -> Option<u64> {
        self.document.active_id()
    }

    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.selection.context_menu()
    }

    /// Current load generation token.
    pub fn generation(&self) -> u64 {
        self.loads.current()
    }

    fn guide_options(&self, show: bool) -> GuideOptions {
        GuideOptions {
            margin_cm: self.config.paper.margin_cm,
            show,
            size_label: self.size_label,
        }
    }

    pub(crate) fn publish(&self, events: Vec<EditorEvent>) {
        for event in events {
            self.events.publish(event);
        }
    }

    /// Tells the host to redraw if anything changed.
    pub(crate) fn flush(&mut self) {
        if self.document.take_dirty() {
            self.events.publish(EditorEvent::Document(DocumentEvent::Dirty));
        }
    }

    fn replace_document(&mut self, document: Document, generation: u64) {
        self.document = document;
        self.selection.reset();
        self.document.mark_dirty();
        let object_count = self.document.len();
        tracing::info!(generation, object_count, "Document replaced");
        self.events.publish(EditorEvent::Document(DocumentEvent::Replaced {
            generation,
            object_count,
        }));
        self.events.publish(EditorEvent::Selection(SelectionEvent::Cleared));
    }

    /// Replaces the document with the built-in three-field badge.
    pub fn load_default_template(&mut self) {
        let generation = self.loads.invalidate();
        self.size_label = self.config.guides.show_size_label;
        let guides = self.guide_options(self.document.show_guides());
        let document = default_document(
            self.config.paper.size(),
            &TemplateStyle::from(&self.config),
            &guides,
        );
        self.metadata = None;
        self.replace_document(document, generation);
        self.flush();
    }

    /// Parses a payload and starts a new load generation.
    ///
    /// Any load started earlier is superseded from this point on.
    pub fn prepare_import(&self, payload: &str) -> Result<PendingImport, TemplateError> {
        let generation = self.loads.begin();
        let options = ImportOptions {
            fallback_paper: self.config.paper.size(),
        };
        let staged = parse_template(payload, &options).inspect_err(|e| self.report_failure(e))?;
        Ok(PendingImport {
            staged,
            generation,
            decoder: Arc::clone(&self.decoder),
        })
    }

    /// Swaps in a resolved import unless a newer load or a clear happened.
    pub fn commit_import(&mut self, resolved: ResolvedImport) -> Result<ImportReport, TemplateError> {
        let ResolvedImport { staged, generation } = resolved;
        if !self.loads.is_current(generation) {
            tracing::debug!(generation, current = self.loads.current(), "Dropping superseded load");
            return Err(TemplateError::Superseded { generation });
        }

        let StagedTemplate {
            mut document,
            warnings,
            format,
            metadata,
            ..
        } = staged;

        self.size_label = false;
        let guides = self.guide_options(self.document.show_guides());
        regenerate_guides(&mut document, &guides);

        for warning in &warnings {
            self.events.publish(EditorEvent::Template(TemplateEvent::ObjectSkipped {
                index: warning.index(),
                reason: warning.to_string(),
            }));
        }

        if let Some(meta) = &metadata {
            self.template_name = meta.name.clone();
        }
        self.metadata = metadata;
        self.replace_document(document, generation);

        let report = ImportReport {
            generation,
            object_count: self
                .document
                .objects()
                .iter()
                .filter(|o| !o.object.is_guide())
                .count(),
            warnings,
            format,
        };
        self.events.publish(EditorEvent::Template(TemplateEvent::ImportFinished {
            generation,
            warnings: report.warnings.len(),
        }));
        self.flush();
        Ok(report)
    }

    /// Loads a template payload, replacing the document on success.
    ///
    /// On any failure the current document is left as it was.
    pub async fn load_template(&mut self, payload: &str) -> Result<ImportReport, TemplateError> {
        let pending = self.prepare_import(payload)?;
        let resolved = pending
            .resolve()
            .await
            .inspect_err(|e| self.report_failure(e))?;
        self.commit_import(resolved)
    }

    fn report_failure(&self, error: &TemplateError) {
        tracing::warn!(error = %error, "Template import failed");
        self.events.publish(EditorEvent::Template(TemplateEvent::ImportFailed {
            reason: error.to_string(),
        }));
    }

    /// Serializes the document in the versioned template format.
    pub fn export_template(&self) -> TemplateFile {
        let metadata = match &self.metadata {
            Some(meta) => meta.touched(),
            None => TemplateMetadata::new(self.template_name.clone()),
        };
        export_template(&self.document, Some(metadata))
    }

    pub fn export_json(&self) -> Result<String, Error> {
        Ok(self.export_template().to_json()?)
    }

    /// Rewrites text fields for `profile`. Geometry is untouched.
    pub fn bind_profile(&mut self, profile: &Profile) -> BindingReport {
        let report = bind_profile(&mut self.document, profile);
        match report.outcome {
            BindingOutcome::Bound { updated } => {
                self.events
                    .publish(EditorEvent::Template(TemplateEvent::ProfileBound { updated }));
            }
            BindingOutcome::Ungrounded => {
                tracing::debug!("Profile matched no text fields");
            }
        }
        self.flush();
        report
    }

    /// Removes every object and abandons in-flight loads.
    pub fn clear(&mut self) {
        let generation = self.loads.invalidate();
        tracing::debug!(generation, "Clearing document");
        self.document.clear();
        self.selection.reset();
        self.size_label = false;
        let guides = self.guide_options(self.document.show_guides());
        regenerate_guides(&mut self.document, &guides);
        self.events.publish(EditorEvent::Document(DocumentEvent::Cleared));
        self.events.publish(EditorEvent::Selection(SelectionEvent::Cleared));
        self.flush();
    }

    /// Changes the paper size. Object positions stay in pixel space.
    pub fn resize(&mut self, width_cm: f64, height_cm: f64) -> Result<(), Error> {
        let paper = PaperSize::new(width_cm, height_cm);
        if !paper.is_valid() {
            return Err(Error::other(format!(
                "paper size must be positive, got {}x{}",
                width_cm, height_cm
            )));
        }
        self.document.resize_paper(paper, self.config.paper.margin_cm);
        self.events.publish(EditorEvent::Document(DocumentEvent::Resized {
            width_px: self.document.width_px(),
            height_px: self.document.height_px(),
        }));
        self.flush();
        Ok(())
    }

    /// Shows or hides the guides. Returns the number of guides present.
    pub fn toggle_guides(&mut self, show: bool) -> usize {
        let guides = self.guide_options(show);
        let count = regenerate_guides(&mut self.document, &guides);
        self.flush();
        count
    }

    /// Decodes an image and adds it to the document.
    ///
    /// Backgrounds are stretched over the frame; editable images become
    /// the active object. A failed decode leaves the document untouched.
    pub async fn add_image(&mut self, source_ref: &str, role: ImageRole) -> Result<u64, TemplateError> {
        let decoded = self
            .decoder
            .decode(source_ref)
            .await
            .map_err(|e| TemplateError::AssetLoadFailed {
                source_ref: source_ref.to_string(),
                reason: format!("{:#}", e),
            })?;

        let mut image = ImageAsset::new(source_ref, role)
            .with_size(f64::from(decoded.width), f64::from(decoded.height));
        if role == ImageRole::Background {
            image.fit_to(self.document.width_px(), self.document.height_px());
        }
        let id = self.document.add_object(SceneObject::Image(image));
        tracing::debug!(id, source_ref, ?role, "Image added");

        if role == ImageRole::Editable {
            let events = self.selection.select(&mut self.document, id).unwrap_or_default();
            self.publish(events);
        }
        self.flush();
        Ok(id)
    }

    /// Objects that go on the printed badge, in stacking order.
    pub fn print_objects(&self) -> Vec<CanvasObject> {
        self.document
            .objects()
            .iter()
            .filter(|o| o.object.is_printable())
            .cloned()
            .collect()
    }
}

impl std::fmt::Debug for NamecardEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamecardEditor")
            .field("template_name", &self.template_name)
            .field("objects", &self.document.len())
            .field("state", &self.selection.state())
            .field("generation", &self.loads.current())
            .finish()
    }
}
