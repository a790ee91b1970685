//! # Namecard Designer
//!
//! Scene model and editing logic for a fixed-size printable badge: text
//! fields, images, a background preview image and decorative shapes,
//! saved as templates and re-bound to different people's data.
//!
//! ## Core Components
//!
//! - **Document**: ordered object list with z-bands (guide < background < content < text)
//! - **Geometry**: paper frame, cm/px conversion and guide generation
//! - **Scale normalization**: text scale is always converted into font size
//! - **Profile binding**: keyword, current-value and positional slot matching
//! - **Serialization**: versioned template codec with legacy import
//! - **Assets**: concurrent image decoding with load generations
//! - **Selection**: pointer-driven state machine and context menu
//!
//! ## Architecture
//!
//! ```text
//! Host surface ──EditorCommand──▶ NamecardEditor ──EditorEvent──▶ EventBus
//!                                    │
//!                                    ├── SelectionManager
//!                                    ├── Document (SceneObjects)
//!                                    ├── serialization / assets
//!                                    └── binding / geometry / scale
//! ```
//!
//! Rendering is left to the host; this crate never rasterizes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use namecard_designer::{FileImageDecoder, NamecardEditor, Profile};
//!
//! let mut editor = NamecardEditor::new(Config::default(), Arc::new(FileImageDecoder::new()));
//! editor.load_default_template();
//! editor.bind_profile(&Profile::new("Acme", "Jane Doe", "CSO"));
//! let json = editor.export_json()?;
//! ```

pub mod assets;
pub mod binding;
pub mod commands;
pub mod document;
pub mod editor;
pub mod geometry;
pub mod model;
pub mod scale;
pub mod selection_manager;
pub mod serialization;
pub mod templates;

pub use assets::{DecodedImage, FileImageDecoder, ImageDecoder, LoadGeneration, LoadedAsset};
pub use binding::{
    bind_profile, BindingOutcome, BindingReport, BindingRule, FieldBinding, Profile, ProfileSlot,
};
pub use commands::{ActionOutcome, ContextAction, EditorCommand, Modifiers, PointerButton};
pub use document::{CanvasObject, Document};
pub use editor::{ImportReport, NamecardEditor, PendingImport, ResolvedImport};
pub use geometry::{regenerate_guides, GuideOptions};
pub use model::{
    Guide, GuideKind, ImageAsset, ImageRole, ObjectKind, Point, SceneElement, SceneObject,
    ShapeGeometry, ShapeKind, ShapeObject, TextAlign, TextField, ZBand,
};
pub use scale::{settle, settle_text, SettleMode, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use selection_manager::{ContextMenu, InteractionState, SelectionManager};
pub use serialization::{
    export_template, parse_template, stage_template, ImportOptions, ObjectData, PayloadFormat,
    PendingAsset, StagedTemplate, TemplateFile, TemplateMetadata, FORMAT_VERSION,
};
pub use templates::{default_document, TemplateStyle};

pub use namecard_core::{DocumentError, Error, ObjectError, Result, TemplateError};
