//! The `stencil list` command.

use std::path::PathBuf;

use clap::Args;

use crate::config::{self, StencilConfig};
use crate::context::list_value_documents;
use crate::error::StencilError;

/// Arguments for `stencil list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory to list value documents from
    #[arg(long, value_name = "DIR", env = "STENCIL_CONTEXT_DIR")]
    pub context_dir: Option<PathBuf>,
}

/// Run `stencil list`: print the value documents available in the context
/// directory, one name per line.
///
/// # Errors
/// Fails on config or I/O errors.
pub fn run(args: &ListArgs) -> anyhow::Result<()> {
    let cfg =
        StencilConfig::load(std::path::Path::new(config::FILE_NAME)).map_err(StencilError::from)?;
    let dir = args
        .context_dir
        .clone()
        .or(cfg.context.dir)
        .unwrap_or_else(config::default_context_dir);

    for name in list_value_documents(&dir)? {
        println!("{name}");
    }
    Ok(())
}
