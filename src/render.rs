//! Template discovery and rendering.
//!
//! Templates come from explicit paths and/or glob patterns; the discovered
//! set is deduplicated and sorted so output order is deterministic. Each
//! template is registered under its full relative path — templates with
//! equal basenames in different directories never collide.
//!
//! Rendering goes to stdout by default, or into an output directory that
//! mirrors each template's path.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use clap::Args;
use minijinja::Environment;
use minijinja::syntax::SyntaxConfig;
use tracing::{debug, info, warn};

use crate::config::{self, StencilConfig};
use crate::context::{build_context, resolve_value_path};
use crate::error::StencilError;

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// Arguments for `stencil render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template files to render
    pub templates: Vec<PathBuf>,

    /// Value document merged into the context (repeatable, merged in order)
    ///
    /// Takes a file path, or a bare document name resolved against the
    /// context directory.
    #[arg(short = 'f', long = "values", value_name = "FILE")]
    pub values: Vec<String>,

    /// Glob pattern of template files to render (repeatable)
    #[arg(short, long = "pattern", value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Left and right variable delimiters, separated by a space
    #[arg(short, long, value_name = "DELIMS")]
    pub delims: Option<String>,

    /// Write rendered files into this directory instead of stdout
    ///
    /// Each rendered file mirrors its template's relative path.
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Prompt before overwriting existing files
    #[arg(short, long)]
    pub interactive: bool,

    /// Directory where bare value-document names are resolved
    #[arg(long, value_name = "DIR", env = "STENCIL_CONTEXT_DIR")]
    pub context_dir: Option<PathBuf>,
}

/// Run `stencil render`.
///
/// # Errors
/// Fails on config, context, or template errors; an empty template
/// selection is a successful no-op.
pub fn run(args: &RenderArgs) -> anyhow::Result<()> {
    let cfg = StencilConfig::load(Path::new(config::FILE_NAME)).map_err(StencilError::from)?;

    let ctx_dir = resolve_context_dir(args.context_dir.as_deref(), &cfg)?;

    let mut value_paths = Vec::new();
    for spec in cfg.context.values.iter().chain(&args.values) {
        value_paths.push(resolve_value_path(spec, &ctx_dir)?);
    }
    let ctx = build_context(&value_paths)?;

    let delim_spec = args.delims.as_deref().unwrap_or(&cfg.render.delims);
    let delims = parse_delimiters(delim_spec)?;

    let patterns = if args.templates.is_empty() && args.patterns.is_empty() {
        cfg.render.patterns.as_slice()
    } else {
        args.patterns.as_slice()
    };
    let templates = discover_templates(&args.templates, patterns)?;
    if templates.is_empty() {
        warn!("no templates selected, nothing to render");
        return Ok(());
    }

    let env = build_environment(&templates, &delims)?;
    let names: Vec<String> = templates.iter().map(|p| template_name(p)).collect();
    let ctx_value = minijinja::Value::from_serialize(&ctx);

    match &args.out {
        None => {
            let stdout = io::stdout();
            render_to_writer(&env, &names, &ctx_value, &mut stdout.lock())?;
        }
        Some(dir) => render_to_dir(&env, &names, &ctx_value, dir, args.interactive)?,
    }
    Ok(())
}

fn resolve_context_dir(
    flag: Option<&Path>,
    cfg: &StencilConfig,
) -> Result<PathBuf, StencilError> {
    if let Some(dir) = flag {
        return Ok(dir.to_owned());
    }
    if let Some(dir) = &cfg.context.dir {
        return Ok(dir.clone());
    }
    // Only the built-in default is created on demand; explicitly configured
    // directories are the user's responsibility.
    let dir = config::default_context_dir();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

// ---------------------------------------------------------------------------
// Delimiters
// ---------------------------------------------------------------------------

/// Parse a delimiter spec like `"{{ }}"` into a `(left, right)` pair.
///
/// # Errors
/// Returns [`StencilError::BadDelimiters`] unless the spec is exactly two
/// whitespace-separated tokens.
pub fn parse_delimiters(spec: &str) -> Result<(String, String), StencilError> {
    let mut parts = spec.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Ok((left.to_owned(), right.to_owned())),
        _ => Err(StencilError::BadDelimiters {
            spec: spec.to_owned(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Collect template files from explicit paths and glob patterns.
///
/// The result is sorted and deduplicated. Directories and missing explicit
/// paths are skipped with a warning, matching pattern semantics.
///
/// # Errors
/// Returns [`StencilError::BadPattern`] for a malformed glob pattern.
pub fn discover_templates(
    explicit: &[PathBuf],
    patterns: &[String],
) -> Result<Vec<PathBuf>, StencilError> {
    let mut found = BTreeSet::new();

    for path in explicit {
        if path.is_file() {
            found.insert(path.clone());
        } else {
            warn!(path = %path.display(), "template path is not a file, skipping");
        }
    }

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|e| StencilError::BadPattern {
            pattern: pattern.clone(),
            detail: e.to_string(),
        })?;
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    found.insert(path);
                }
                Ok(path) => debug!(path = %path.display(), "glob matched a directory, skipping"),
                Err(e) => warn!(pattern = pattern.as_str(), error = %e, "unreadable glob match, skipping"),
            }
        }
    }

    Ok(found.into_iter().collect())
}

/// The engine-side name of a template: its full path as given.
#[must_use]
pub fn template_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Build a template environment holding every discovered template.
///
/// # Errors
/// Returns [`StencilError::BadDelimiters`] for delimiters the engine
/// rejects, and [`StencilError::Template`] for unreadable or unparsable
/// templates.
pub fn build_environment(
    templates: &[PathBuf],
    delims: &(String, String),
) -> Result<Environment<'static>, StencilError> {
    let mut env = Environment::new();

    let (left, right) = delims.clone();
    let syntax = SyntaxConfig::builder()
        .variable_delimiters(left, right)
        .build()
        .map_err(|_| StencilError::BadDelimiters {
            spec: format!("{} {}", delims.0, delims.1),
        })?;
    env.set_syntax(syntax);

    for path in templates {
        let name = template_name(path);
        let source = fs::read_to_string(path).map_err(|e| StencilError::Template {
            name: name.clone(),
            detail: format!("could not read file: {e}"),
        })?;
        env.add_template_owned(name.clone(), source)
            .map_err(|e| StencilError::Template {
                name,
                detail: e.to_string(),
            })?;
    }

    Ok(env)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Render every named template into `writer`, in order, concatenated.
///
/// # Errors
/// Returns [`StencilError::Template`] on render failures.
pub fn render_to_writer<W: Write>(
    env: &Environment<'_>,
    names: &[String],
    ctx: &minijinja::Value,
    writer: &mut W,
) -> Result<(), StencilError> {
    for name in names {
        render_one(env, name, ctx, &mut *writer)?;
    }
    Ok(())
}

/// Render every named template into `out_dir`, mirroring template paths.
///
/// Destinations never escape `out_dir`: root and parent components of the
/// template path are stripped before joining. Existing destination files
/// are overwritten, unless `interactive` is set and the user declines. A
/// destination that is a directory is skipped.
///
/// # Errors
/// Returns [`StencilError::Template`] on render failures and
/// [`StencilError::Io`] on filesystem failures.
pub fn render_to_dir(
    env: &Environment<'_>,
    names: &[String],
    ctx: &minijinja::Value,
    out_dir: &Path,
    interactive: bool,
) -> Result<(), StencilError> {
    for name in names {
        let dest = dest_path(out_dir, name);
        if dest.is_dir() {
            warn!(dest = %dest.display(), "destination is an existing directory, skipping");
            continue;
        }
        if dest.exists() && interactive && !confirm_overwrite(&dest)? {
            info!(dest = %dest.display(), "skipped at user request");
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&dest)?;
        render_one(env, name, ctx, &mut file)?;
        info!(template = name.as_str(), dest = %dest.display(), "rendered");
    }
    Ok(())
}

/// Destination for a rendered template: `out_dir` plus the normal
/// components of the template path (no root, no `..`).
fn dest_path(out_dir: &Path, name: &str) -> PathBuf {
    let rel: PathBuf = Path::new(name)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    out_dir.join(rel)
}

fn render_one<W: Write>(
    env: &Environment<'_>,
    name: &str,
    ctx: &minijinja::Value,
    writer: &mut W,
) -> Result<(), StencilError> {
    let template_error = |detail: String| StencilError::Template {
        name: name.to_owned(),
        detail,
    };
    let template = env
        .get_template(name)
        .map_err(|e| template_error(e.to_string()))?;
    template
        .render_to_write(ctx.clone(), &mut *writer)
        .map_err(|e| template_error(e.to_string()))?;
    Ok(())
}

fn confirm_overwrite(path: &Path) -> io::Result<bool> {
    print!("file '{}' already exists, overwrite? [y/N] ", path.display());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
