#![doc = include_str!("../README.md")]

pub mod error;
mod plan;
mod templates;
mod writer;

use error::GenerateError;
use many_deps_shared::{DependencyShape, WorkloadConfig, WorkspaceLayout};
use std::path::Path;

pub use plan::{Module, Workspace, plan_workspace};
pub use writer::write_workspace;

/// Plans and writes a workspace of `count` crates into `layout.root()`.
///
/// The output root must not exist; callers wanting a fresh run remove it first.
pub fn generate(
    config: &WorkloadConfig,
    layout: &WorkspaceLayout,
    count: usize,
    shape: DependencyShape,
    manifest_dir: &Path,
) -> Result<Workspace, GenerateError> {
    let workspace = plan_workspace(config, count, shape)?;
    write_workspace(&workspace, layout, manifest_dir, |_| {})?;
    Ok(workspace)
}
