use crate::error::GenerateError;
use crate::plan::{Module, Workspace};
use fs_err as fs;
use many_deps_shared::WorkspaceLayout;
use std::io;
use std::path::Path;

/// Writes a planned workspace under `layout.root()`.
///
/// The output root and every crate directory must not exist yet; the writer
/// never merges into an existing tree. The workspace manifest, when the shape
/// has one, is copied verbatim from `manifest_dir`. `on_written` is called
/// once per crate after its files are on disk.
pub fn write_workspace(
    workspace: &Workspace,
    layout: &WorkspaceLayout,
    manifest_dir: &Path,
    mut on_written: impl FnMut(&Module),
) -> Result<(), GenerateError> {
    let root = layout.root();
    if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    create_fresh_dir(root)?;

    for module in workspace.crates() {
        write_module(module, layout)?;
        on_written(module);
    }

    if let Some(manifest) = &workspace.manifest {
        copy_manifest(manifest_dir, root, manifest)?;
    }

    tracing::info!(
        root = %root.display(),
        crates = workspace.modules.len() + 1,
        "wrote workspace"
    );

    Ok(())
}

fn write_module(module: &Module, layout: &WorkspaceLayout) -> Result<(), GenerateError> {
    create_fresh_dir(&layout.crate_dir(&module.name))?;
    create_fresh_dir(&layout.src_dir(&module.name))?;

    let source_path = layout.source_path(&module.name);
    fs::write(&source_path, &module.source)?;

    if let Some(descriptor) = &module.descriptor {
        fs::write(layout.descriptor_path(&module.name), descriptor)?;
    }

    tracing::debug!(path = %source_path.display(), "wrote crate");
    Ok(())
}

fn copy_manifest(manifest_dir: &Path, root: &Path, file_name: &str) -> Result<(), GenerateError> {
    let source = manifest_dir.join(file_name);
    if !source.is_file() {
        return Err(GenerateError::ManifestNotFound { path: source });
    }

    fs::copy(&source, root.join(file_name))?;
    Ok(())
}

fn create_fresh_dir(path: &Path) -> Result<(), GenerateError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(GenerateError::DirectoryExists {
                path: path.to_path_buf(),
            })
        },
        Err(err) => Err(err.into()),
    }
}
