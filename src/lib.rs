//! # Namecard
//!
//! A badge and business-card template editor. Templates hold text fields,
//! images, a background preview image and decorative shapes on a fixed
//! paper frame, and are re-bound to different people's data.
//!
//! ## Architecture
//!
//! Namecard is organized as a workspace with multiple crates:
//!
//! 1. **namecard-core** - Errors, paper/pixel units, property values, editor events
//! 2. **namecard-settings** - Configuration loading, validation and persistence
//! 3. **namecard-designer** - Scene document, template codec, binding, selection
//! 4. **namecard** - Command-line host that integrates all crates
//!
//! ## Features
//!
//! - **Z-banded scene**: guides, background, content and text never interleave
//! - **Profile binding**: keyword, current-value and positional slot matching
//! - **Template import**: versioned format plus older canvas-library exports
//! - **Async assets**: concurrent image decoding with superseded-load detection

pub mod cli;

pub use namecard_core::{
    cm_to_px, px_to_cm, DocumentError, EditorEvent, Error, EventBus, ObjectError, PaperSize,
    Result, TemplateError,
};

pub use namecard_designer as designer;
pub use namecard_designer::{
    BindingOutcome, BindingReport, Document, FileImageDecoder, ImageDecoder, ImportReport,
    NamecardEditor, Profile, TemplateFile,
};

pub use namecard_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, so command output stays clean on stdout
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
