//! CLI error types using miette for Rust-style diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use many_deps_generate::error::GenerateError;
use many_deps_shared::ConfigError;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error when the compiler or orchestrator executable cannot be spawned.
#[derive(Debug, Diagnostic, Error)]
#[error("`{program}` could not be started")]
#[diagnostic(
    code(many_deps::build::tool_not_found),
    help("Install {program} or point --{flag} at the executable")
)]
pub struct ToolNotFoundError {
    /// The program that was looked up.
    pub program: String,
    /// The CLI flag that overrides the program.
    pub flag: &'static str,
    /// The spawn error.
    #[source]
    pub source: io::Error,
}

/// Error when a compiler or orchestrator invocation exits unsuccessfully.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to build {target}")]
#[diagnostic(
    code(many_deps::build::invocation_failed),
    help("{program} {status}; its diagnostics are printed above")
)]
pub struct InvocationFailedError {
    /// Crate name or orchestrator label being built.
    pub target: String,
    /// The program that failed.
    pub program: String,
    /// Human readable exit status, e.g. `exited with code 1`.
    pub status: String,
}

/// Error when a compiler or orchestrator invocation could not be spawned.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to start {program} for {target}")]
#[diagnostic(
    code(many_deps::build::spawn_failed),
    help("An argument list too long for the OS is avoided with --args-mode param-file")
)]
pub struct SpawnFailedError {
    /// Crate name or orchestrator label being built.
    pub target: String,
    /// The program that could not be started.
    pub program: String,
    /// The spawn error.
    #[source]
    pub source: io::Error,
}

/// Error when the workspace could not be written.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to generate workspace")]
#[diagnostic(code(many_deps::generate::failed))]
pub struct GenerationFailedError {
    #[source]
    pub source: GenerateError,
    #[help]
    pub help: &'static str,
}

impl GenerationFailedError {
    pub fn new(source: GenerateError) -> Self {
        let help = match &source {
            GenerateError::DirectoryExists { .. } => {
                "Two generated crates map to the same directory; check the names in many-deps.toml"
            },
            GenerateError::ManifestNotFound { .. } => {
                "Run from the directory holding the manifest, or set `workspace_manifest` in many-deps.toml"
            },
            GenerateError::Io(_) => {
                "The output directory is wiped before generation; check that it is writable"
            },
            GenerateError::Template(_) => "A generated file could not be rendered",
        };
        Self { source, help }
    }
}

/// Error when the configuration file is missing or invalid.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid configuration")]
#[diagnostic(
    code(many_deps::config::invalid),
    help("Fix or remove many-deps.toml, or pass --config with a valid file")
)]
pub struct InvalidConfigError {
    #[source]
    pub source: ConfigError,
}

/// Error when `build` is run before the workspace was generated.
#[derive(Debug, Diagnostic, Error)]
#[error("no generated workspace at {}", .path.display())]
#[diagnostic(
    code(many_deps::build::workspace_not_found),
    help("Run `many-deps generate` with the same --out first, or use `many-deps run`")
)]
pub struct WorkspaceNotFoundError {
    /// The expected output root.
    pub path: PathBuf,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ToolNotFound(#[from] ToolNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvocationFailed(#[from] InvocationFailedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    SpawnFailed(#[from] SpawnFailedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    WorkspaceNotFound(#[from] WorkspaceNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Generation(#[from] GenerationFailedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] InvalidConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(many_deps::io))]
    Io(#[from] io::Error),

    #[error("{0}")]
    #[diagnostic(code(many_deps::other))]
    Other(String),
}

impl From<GenerateError> for CliError {
    fn from(source: GenerateError) -> Self {
        CliError::Generation(GenerationFailedError::new(source))
    }
}

impl From<ConfigError> for CliError {
    fn from(source: ConfigError) -> Self {
        CliError::Config(InvalidConfigError { source })
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(format!("{:#}", err))
    }
}
