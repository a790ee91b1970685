//! Asynchronous image asset loading.
//!
//! Decoding is delegated to an [`ImageDecoder`]. A template import spawns
//! one task per image and waits for all of them; the first failure fails
//! the import and aborts the rest. Results are only applied if the load's
//! generation is still current when they arrive.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use namecard_core::error::TemplateError;
use tokio::task::JoinSet;

use crate::document::Document;
use crate::model::SceneObject;
use crate::serialization::PendingAsset;

/// Natural size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
}

/// Host-provided image decode service.
///
/// Implementations surface their own fetch timeouts as errors.
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    async fn decode(&self, source_ref: &str) -> anyhow::Result<DecodedImage>;
}

/// Decodes images from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileImageDecoder {
    base_dir: Option<PathBuf>,
}

impl FileImageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative references resolve against `dir`.
    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(dir.into()),
        }
    }

    fn resolve(&self, source_ref: &str) -> PathBuf {
        let path = Path::new(source_ref);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ImageDecoder for FileImageDecoder {
    async fn decode(&self, source_ref: &str) -> anyhow::Result<DecodedImage> {
        if source_ref.contains("://") || source_ref.starts_with("data:") {
            anyhow::bail!("only local files can be decoded");
        }
        let path = self.resolve(source_ref);
        let shown = path.display().to_string();
        let (width, height) = tokio::task::spawn_blocking(move || image::image_dimensions(&path))
            .await
            .context("Image decode task failed")?
            .with_context(|| format!("Failed to read image {}", shown))?;
        Ok(DecodedImage { width, height })
    }
}

/// A pending asset after a successful decode.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    pub id: u64,
    pub source_ref: String,
    pub image: DecodedImage,
}

/// Decodes every pending asset concurrently.
///
/// Fails fast: the first failed decode aborts the remaining tasks and is
/// returned as `AssetLoadFailed` for that reference.
pub async fn load_assets(
    decoder: Arc<dyn ImageDecoder>,
    assets: &[PendingAsset],
) -> Result<Vec<LoadedAsset>, TemplateError> {
    let mut tasks = JoinSet::new();
    for asset in assets.iter().cloned() {
        let decoder = Arc::clone(&decoder);
        tasks.spawn(async move {
            let result = decoder.decode(&asset.source_ref).await;
            (asset, result)
        });
    }

    let mut loaded = Vec::with_capacity(assets.len());
    while let Some(joined) = tasks.join_next().await {
        let (asset, result) = joined.map_err(|e| TemplateError::AssetLoadFailed {
            source_ref: "<unknown>".to_string(),
            reason: format!("decode task did not complete: {}", e),
        })?;
        match result {
            Ok(image) => {
                tracing::debug!(
                    source_ref = %asset.source_ref,
                    width = image.width,
                    height = image.height,
                    "Asset decoded"
                );
                loaded.push(LoadedAsset {
                    id: asset.id,
                    source_ref: asset.source_ref,
                    image,
                });
            }
            Err(err) => {
                tasks.abort_all();
                tracing::warn!(source_ref = %asset.source_ref, error = %err, "Asset failed to load");
                return Err(TemplateError::AssetLoadFailed {
                    source_ref: asset.source_ref,
                    reason: format!("{:#}", err),
                });
            }
        }
    }

    loaded.sort_by_key(|a| a.id);
    Ok(loaded)
}

/// Writes decoded sizes onto the document's image objects.
pub fn apply_assets(doc: &mut Document, loaded: &[LoadedAsset]) {
    for asset in loaded {
        let result = doc.modify(asset.id, |object| {
            if let SceneObject::Image(img) = object {
                img.natural_width = f64::from(asset.image.width);
                img.natural_height = f64::from(asset.image.height);
            }
        });
        if result.is_err() {
            tracing::debug!(id = asset.id, "Decoded asset no longer in document");
        }
    }
}

/// Monotonic load token. Starting a load or clearing the document bumps
/// it, so late results from an older load can be recognized and dropped.
#[derive(Debug, Default)]
pub struct LoadGeneration {
    current: AtomicU64,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load and returns its token.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidates every outstanding load.
    pub fn invalidate(&self) -> u64 {
        self.begin()
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }
}
