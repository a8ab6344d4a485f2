use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("refusing to generate into existing directory {}", .path.display())]
    DirectoryExists { path: PathBuf },

    #[error("workspace manifest not found: {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("template rendering error: {0}")]
    Template(#[from] askama::Error),
}
