//! Command-line host for the namecard editor.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use namecard_designer::{
    BindingOutcome, FileImageDecoder, ImportReport, NamecardEditor, Profile, SceneElement,
};
use namecard_settings::{Config, SettingsPersistence};

#[derive(Debug, Parser)]
#[command(name = "namecard")]
#[command(about = "Badge and business-card template editor", version)]
pub struct Cli {
    /// Config file (.toml or .json). Defaults to the platform config dir.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write the default three-field template.
    New {
        #[arg(long)]
        width_cm: Option<f64>,
        #[arg(long)]
        height_cm: Option<f64>,
        /// Template name stored in the file.
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Fill a template's text fields from a profile JSON file.
    Bind {
        #[arg(long, value_name = "FILE")]
        template: PathBuf,
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Print a machine-readable summary of a template.
    Inspect {
        #[arg(long, value_name = "FILE")]
        template: PathBuf,
    },
    /// Change a template's paper size. Objects keep their pixel positions.
    Resize {
        #[arg(long, value_name = "FILE")]
        template: PathBuf,
        #[arg(long)]
        width_cm: f64,
        #[arg(long)]
        height_cm: f64,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    name: String,
    format: String,
    canvas: CanvasOutput,
    objects: Vec<ObjectOutput>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CanvasOutput {
    width_px: f64,
    height_px: f64,
    paper: String,
    background_color: String,
}

#[derive(Debug, Serialize)]
struct ObjectOutput {
    id: u64,
    kind: String,
    name: String,
    left: f64,
    top: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

pub async fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::New {
            width_cm,
            height_cm,
            name,
            out,
        } => run_new(config, width_cm, height_cm, name, &out),
        Commands::Bind {
            template,
            profile,
            out,
        } => run_bind(config, &template, &profile, &out).await,
        Commands::Inspect { template } => run_inspect(config, &template).await,
        Commands::Resize {
            template,
            width_cm,
            height_cm,
            out,
        } => run_resize(config, &template, width_cm, height_cm, &out).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => SettingsPersistence::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .into_config(),
        None => match SettingsPersistence::default_path() {
            Ok(path) => SettingsPersistence::load_or_default(path).into_config(),
            Err(e) => {
                tracing::debug!("No config directory ({}), using defaults", e);
                Config::default()
            }
        },
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Relative image references resolve against the template's directory
/// unless the config names an asset directory.
fn editor_for(config: Config, template: Option<&Path>) -> NamecardEditor {
    let base_dir = config
        .assets
        .base_dir
        .clone()
        .or_else(|| template.and_then(Path::parent).map(Path::to_path_buf));
    let decoder = match base_dir {
        Some(dir) => FileImageDecoder::with_base_dir(dir),
        None => FileImageDecoder::new(),
    };
    NamecardEditor::new(config, Arc::new(decoder))
}

async fn open(config: Config, template: &Path) -> Result<(NamecardEditor, ImportReport)> {
    ensure_file_exists(template)?;
    let mut editor = editor_for(config, Some(template));
    let report = editor.load_from_file(template).await?;
    for warning in &report.warnings {
        tracing::warn!("{}", warning);
    }
    Ok((editor, report))
}

fn run_new(
    mut config: Config,
    width_cm: Option<f64>,
    height_cm: Option<f64>,
    name: Option<String>,
    out: &Path,
) -> Result<()> {
    if let Some(width) = width_cm {
        config.paper.width_cm = width;
    }
    if let Some(height) = height_cm {
        config.paper.height_cm = height;
    }
    config.validate().context("invalid paper size")?;

    let mut editor = editor_for(config, None);
    editor.load_default_template();
    if let Some(name) = name {
        editor.template_name = name;
    }
    editor.save_to_file(out)?;

    println!("{}", out.display());
    Ok(())
}

async fn run_bind(config: Config, template: &Path, profile: &Path, out: &Path) -> Result<()> {
    ensure_file_exists(profile)?;
    let content = tokio::fs::read_to_string(profile)
        .await
        .with_context(|| format!("failed to read profile {}", profile.display()))?;
    let profile: Profile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse profile {}", profile.display()))?;

    let (mut editor, _) = open(config, template).await?;
    let report = editor.bind_profile(&profile);
    match report.outcome {
        BindingOutcome::Bound { updated } => {
            tracing::info!(updated, "Profile bound");
        }
        BindingOutcome::Ungrounded => {
            anyhow::bail!("template {} has no text fields to bind", template.display());
        }
    }
    editor.save_to_file(out)?;

    println!("{}", out.display());
    Ok(())
}

async fn run_inspect(config: Config, template: &Path) -> Result<()> {
    let (editor, report) = open(config, template).await?;
    let doc = editor.document();

    let objects = editor
        .print_objects()
        .into_iter()
        .map(|o| {
            let position = o.object.position();
            ObjectOutput {
                id: o.id,
                kind: o.object.kind().tag().to_string(),
                name: o.name.clone(),
                left: position.x,
                top: position.y,
                text: o.object.as_text().map(|t| t.text.clone()),
            }
        })
        .collect();

    let payload = InspectOutput {
        name: editor.template_name.clone(),
        format: format!("{:?}", report.format),
        canvas: CanvasOutput {
            width_px: doc.width_px(),
            height_px: doc.height_px(),
            paper: doc.paper().label(),
            background_color: doc.background_color().to_string(),
        },
        objects,
        warnings: report.warnings.iter().map(ToString::to_string).collect(),
    };

    let json = serde_json::to_string_pretty(&payload)?;
    println!("{json}");
    Ok(())
}

async fn run_resize(
    config: Config,
    template: &Path,
    width_cm: f64,
    height_cm: f64,
    out: &Path,
) -> Result<()> {
    let (mut editor, _) = open(config, template).await?;
    editor.resize(width_cm, height_cm)?;
    editor.save_to_file(out)?;

    println!("{}", out.display());
    Ok(())
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}
