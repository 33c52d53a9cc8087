//! Command-line front end.
//!
//! [`Args`] is parsed with [`clap`]; [`run`] drives a [`BuilderSession`]
//! headlessly to create, edit, render and inspect site-map documents.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use sitemap_core::Point;
use sitemap_designer::{
    BuilderSession, Catalog, DuplicationGenerator, DuplicationOptions, ElementTemplate,
    MirrorMode, TemplateCategory, TemplateLibrary, ToolbarAction,
};
use sitemap_settings::BuilderConfig;

/// Command-line arguments for the site-map builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (JSON or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to a custom template library (JSON)
    #[arg(short, long, global = true)]
    pub templates: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty site map
    New {
        output: PathBuf,
        #[arg(short, long, default_value = "Untitled")]
        name: String,
    },
    /// Place a catalog template into a site map
    Place {
        input: PathBuf,
        /// Template id (see `catalog`)
        #[arg(long)]
        template: String,
        #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
        x: f64,
        #[arg(short, default_value_t = 0.0, allow_hyphen_values = true)]
        y: f64,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Duplicate every element of a site map in a pattern
    Duplicate {
        input: PathBuf,
        #[command(flatten)]
        pattern: PatternArgs,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a site map to a PNG image
    Render {
        input: PathBuf,
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// Zoom and pan so every element is visible
        #[arg(long)]
        fit: bool,
    },
    /// List catalog templates
    Catalog {
        /// Only templates of this category (e.g. "power", "food-and-drink")
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive search over names, descriptions and tags
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the copy offsets a duplication pattern would produce
    PreviewPattern {
        #[command(flatten)]
        pattern: PatternArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Single,
    Multiple,
    Linear,
    Grid,
    Radial,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorArg {
    None,
    Horizontal,
    Vertical,
    Both,
}

impl From<MirrorArg> for MirrorMode {
    fn from(value: MirrorArg) -> Self {
        match value {
            MirrorArg::None => MirrorMode::None,
            MirrorArg::Horizontal => MirrorMode::Horizontal,
            MirrorArg::Vertical => MirrorMode::Vertical,
            MirrorArg::Both => MirrorMode::Both,
        }
    }
}

/// Duplication pattern options shared by `duplicate` and `preview-pattern`
#[derive(clap::Args, Debug, Clone)]
pub struct PatternArgs {
    #[arg(long = "type", value_enum, default_value = "single")]
    pub kind: PatternKind,
    /// Offset X for single copies, spacing X for multiple copies
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    pub dx: f64,
    /// Offset Y for single copies, spacing Y for multiple copies
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    pub dy: f64,
    #[arg(long, value_enum, default_value = "none")]
    pub mirror: MirrorArg,
    /// Number of copies (multiple)
    #[arg(long, default_value_t = 1)]
    pub count: u32,
    #[arg(long, default_value_t = 1)]
    pub rows: u32,
    #[arg(long, default_value_t = 1)]
    pub columns: u32,
    /// Distance between array copies
    #[arg(long, default_value_t = 50.0)]
    pub spacing: f64,
    /// Radius of a radial array
    #[arg(long, default_value_t = 100.0)]
    pub radius: f64,
    /// Degrees of rotation added to each linear or radial copy
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub angle: f64,
}

impl PatternArgs {
    pub fn to_options(&self) -> DuplicationOptions {
        match self.kind {
            PatternKind::Single => {
                DuplicationOptions::mirrored(self.dx, self.dy, self.mirror.into())
            }
            PatternKind::Multiple => DuplicationOptions::multiple(self.count, self.dx, self.dy),
            PatternKind::Linear => {
                DuplicationOptions::linear(self.rows, self.columns, self.spacing, self.angle)
            }
            PatternKind::Grid => DuplicationOptions::grid(self.rows, self.columns, self.spacing),
            PatternKind::Radial => {
                DuplicationOptions::radial(self.rows, self.columns, self.radius, self.angle)
            }
        }
    }
}

/// Run the site-map builder CLI
///
/// Every command writes its human-readable result to stdout; logs go to
/// stderr.
///
/// # Errors
///
/// Returns an error for:
/// - Configuration or template library loading errors
/// - Unreadable, malformed or unsupported site-map files
/// - Unknown templates or categories
/// - Image encoding and file write errors
pub fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let library = load_library(args.templates.as_deref())?;

    match &args.command {
        Command::New { output, name } => {
            let mut session = BuilderSession::new(config).with_name(name.as_str());
            session.save_to_file(output)?;
            println!("Created '{}' at {}", name, output.display());
        }
        Command::Place {
            input,
            template,
            x,
            y,
            output,
        } => {
            let mut session = open_session(config, library, input)?;
            let id = session
                .insert_template(template, Point::new(*x, *y))
                .with_context(|| format!("Failed to place template '{}'", template))?;
            let element = session
                .scene()
                .get(id)
                .context("Placed element missing from scene")?;
            println!(
                "Placed '{}' as element {} at {}",
                template,
                id,
                element.position()
            );
            session.save_to_file(output.as_deref().unwrap_or(input.as_path()))?;
        }
        Command::Duplicate {
            input,
            pattern,
            output,
        } => {
            let mut session = open_session(config, library, input)?;
            if session.scene().is_empty() {
                bail!("{} has no elements to duplicate", input.display());
            }
            session.execute(ToolbarAction::SelectAll);
            let outcome = session.execute(ToolbarAction::Duplicate(pattern.to_options()));
            println!(
                "Created {} copies ({} elements total)",
                outcome.affected().len(),
                session.scene().len()
            );
            session.save_to_file(output.as_deref().unwrap_or(input.as_path()))?;
        }
        Command::Render {
            input,
            output,
            width,
            height,
            fit,
        } => {
            let mut session = open_session(config, library, input)?;
            if width.is_some() || height.is_some() {
                let current = session.viewport();
                let w = width.map(f64::from).unwrap_or(current.canvas_width());
                let h = height.map(f64::from).unwrap_or(current.canvas_height());
                session.resize_canvas(w, h);
            }
            if *fit {
                session.fit_to_content();
            }
            let image = session.render_image();
            if image.width() == 0 || image.height() == 0 {
                bail!("Canvas is empty: {}x{}", image.width(), image.height());
            }
            image
                .save(output)
                .with_context(|| format!("Failed to write image to {}", output.display()))?;
            println!(
                "Rendered {} elements to {} ({}x{})",
                session.scene().len(),
                output.display(),
                image.width(),
                image.height()
            );
        }
        Command::Catalog { category, search } => {
            for template in list_templates(&library, category.as_deref(), search.as_deref())? {
                println!(
                    "{:<20} {:<28} {:<18} {:>6.0} x {:<6.0}",
                    template.id, template.name, template.category, template.width, template.height
                );
            }
        }
        Command::PreviewPattern { pattern } => {
            let options = pattern.to_options();
            for (i, offset) in DuplicationGenerator::offsets(&options).iter().enumerate() {
                println!("{:>4}: {:>10.2} {:>10.2}", i, offset.x, offset.y);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BuilderConfig> {
    match path {
        Some(path) => BuilderConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(BuilderConfig::load_or_default().unwrap_or_else(|e| {
            tracing::warn!("Using default configuration: {}", e);
            BuilderConfig::default()
        })),
    }
}

fn load_library(path: Option<&Path>) -> anyhow::Result<TemplateLibrary> {
    match path {
        Some(path) => TemplateLibrary::load_from_file(path)
            .with_context(|| format!("Failed to load templates from {}", path.display())),
        None => Ok(TemplateLibrary::with_defaults()),
    }
}

fn open_session(
    config: BuilderConfig,
    library: TemplateLibrary,
    input: &Path,
) -> anyhow::Result<BuilderSession> {
    let mut session = BuilderSession::new(config).with_catalog(Box::new(library));
    session.load_from_file(input)?;
    tracing::info!(
        "Opened '{}' with {} elements",
        session.name(),
        session.scene().len()
    );
    Ok(session)
}

/// Templates matching an optional category and search query, sorted by id.
pub fn list_templates(
    library: &TemplateLibrary,
    category: Option<&str>,
    search: Option<&str>,
) -> anyhow::Result<Vec<ElementTemplate>> {
    let mut templates = match category {
        Some(raw) => {
            let category = TemplateCategory::parse(raw)
                .with_context(|| format!("Unknown category '{}'", raw))?;
            library.by_category(category)
        }
        None => library.list_all().into_iter().cloned().collect(),
    };
    if let Some(query) = search {
        templates.retain(|t| t.matches_search(query));
    }
    templates.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(templates)
}

