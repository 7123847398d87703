//! # Card Layout CLI
//!
//! Command-line host for inspecting and scripting card layouts.
//!
//! ## Usage
//!
//! ```bash
//! cardlayout scale card.json --width 343
//! cardlayout render card.json --width 343 --data user.json --surface mini-program
//! cardlayout templates
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `CliConfig` - The resolved task plus renderer configuration
//! - `run` - Executes a task and returns the text to print

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use card_core::templates::{builtin_templates, sample_binding_context};
use card_core::{scale_layout, BindingContext, CardLayoutSchema, LayoutDocument, ScaleOptions};
use card_renderer::{render_layout, HostSurface, RendererConfig};
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for cardlayout.
#[derive(Debug, Clone, Parser)]
#[command(name = "cardlayout")]
#[command(about = "Scale and render card layout schemas")]
#[command(version)]
pub struct CliArgs {
    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the schema rescaled to a new size
    Scale {
        /// Schema JSON file
        file: PathBuf,
        /// Target width in schema units
        #[arg(long)]
        width: f64,
        /// Target height; omit to keep the aspect ratio
        #[arg(long)]
        height: Option<f64>,
    },
    /// Print the resolved render output as JSON
    Render {
        /// Schema JSON file
        file: PathBuf,
        /// Target width
        #[arg(long)]
        width: f64,
        /// Binding context JSON file; defaults to the sample data
        #[arg(long)]
        data: Option<PathBuf>,
        /// Host surface
        #[arg(long, value_enum, env = "CARD_SURFACE", default_value = "web")]
        surface: SurfaceArg,
        /// Reference width for device-relative units
        #[arg(long, env = "CARD_REFERENCE_WIDTH")]
        reference_width: Option<f64>,
    },
    /// List bundled templates
    Templates,
}

/// Host surface as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SurfaceArg {
    /// Pixel units
    Web,
    /// Device-relative rpx units
    MiniProgram,
}

impl From<SurfaceArg> for HostSurface {
    fn from(surface: SurfaceArg) -> Self {
        match surface {
            SurfaceArg::Web => Self::Web,
            SurfaceArg::MiniProgram => Self::MiniProgram,
        }
    }
}

/// A resolved unit of work.
#[derive(Debug, Clone)]
pub enum Task {
    /// Rescale a schema file.
    Scale {
        /// Schema file.
        file: PathBuf,
        /// Scaling target.
        options: ScaleOptions,
    },
    /// Render a schema file.
    Render {
        /// Schema file.
        file: PathBuf,
        /// Binding context file.
        data: Option<PathBuf>,
        /// Target width.
        width: f64,
    },
    /// List templates.
    Templates,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// What to run.
    pub task: Task,
    /// Renderer settings for `Render`.
    pub renderer: RendererConfig,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        match args.command {
            Command::Scale {
                file,
                width,
                height,
            } => {
                let options = ScaleOptions::new(width);
                Self {
                    task: Task::Scale {
                        file,
                        options: match height {
                            Some(height) => options.with_height(height),
                            None => options,
                        },
                    },
                    renderer: RendererConfig::default(),
                }
            }
            Command::Render {
                file,
                width,
                data,
                surface,
                reference_width,
            } => {
                let mut renderer = RendererConfig::default().with_surface(surface.into());
                renderer.reference_width = reference_width;
                Self {
                    task: Task::Render { file, data, width },
                    renderer,
                }
            }
            Command::Templates => Self {
                task: Task::Templates,
                renderer: RendererConfig::default(),
            },
        }
    }
}

/// Run a task and return the text to print.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or parsed, or if the
/// target width is not finite.
pub fn run(config: &CliConfig) -> anyhow::Result<String> {
    match &config.task {
        Task::Scale { file, options } => {
            let schema = load_schema(file)?;
            let scaled = scale_layout(&schema, options)?;
            tracing::info!(
                schema = %scaled.id,
                width = scaled.width,
                height = scaled.height,
                "scaled layout"
            );
            Ok(scaled.to_json()?)
        }
        Task::Render { file, data, width } => {
            let schema = load_schema(file)?;
            let context = match data {
                Some(path) => load_context(path)?,
                None => sample_binding_context(),
            };
            let output = render_layout(Some(&schema), &context, *width, None, &config.renderer)?;
            tracing::info!(
                schema = %schema.id,
                surface = ?config.renderer.surface,
                elements = output.elements.len(),
                "rendered layout"
            );
            Ok(serde_json::to_string_pretty(&output)?)
        }
        Task::Templates => Ok(builtin_templates()
            .iter()
            .map(|t| format!("{}\t{}\t{}", t.id, t.name, t.description))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Read a schema document, honoring a legacy `gridSize`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a layout document.
pub fn load_schema(path: &Path) -> anyhow::Result<CardLayoutSchema> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    let document = LayoutDocument::from_json(&json)
        .with_context(|| format!("Invalid schema document {}", path.display()))?;
    Ok(document.into_schema())
}

/// Read a binding context document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not JSON.
pub fn load_context(path: &Path) -> anyhow::Result<BindingContext> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid data document {}", path.display()))
}
