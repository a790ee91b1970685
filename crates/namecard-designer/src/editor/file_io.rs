//! File I/O operations (save, load) for the editor.

use anyhow::Context;

use super::{ImportReport, NamecardEditor};

impl NamecardEditor {
    /// Save the template to a JSON file.
    pub fn save_to_file(&mut self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = self
            .export_template()
            .to_json()
            .context("Failed to serialize template")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write template {}", path.display()))?;

        tracing::info!("Saved template to {}", path.display());
        self.current_file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Load a template from a JSON file, replacing the document.
    pub async fn load_from_file(
        &mut self,
        path: impl AsRef<std::path::Path>,
    ) -> anyhow::Result<ImportReport> {
        let path = path.as_ref();
        let payload = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read template {}", path.display()))?;

        let report = self
            .load_template(&payload)
            .await
            .with_context(|| format!("Failed to load template {}", path.display()))?;

        if self.template_name == "Untitled" {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                self.template_name = stem.to_string();
            }
        }
        self.current_file_path = Some(path.to_path_buf());
        Ok(report)
    }
}
