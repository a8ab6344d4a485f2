use fs_err as fs;
use crate::layout::WorkspaceLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the invoking directory when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = "many-deps.toml";

const EDITIONS: &[&str] = &["2015", "2018", "2021", "2024"];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    /// Failed to read configuration file.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse configuration file.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A name fragment would not produce a valid Rust identifier.
    #[error("`{field}` = {value:?} is not a valid Rust identifier fragment")]
    InvalidIdentifier { field: &'static str, value: String },
    /// Two name settings would produce the same name.
    #[error("`{first}` and `{second}` both produce {value:?}")]
    NameCollision {
        first: &'static str,
        second: &'static str,
        value: String,
    },
    /// A name is already taken by the output layout.
    #[error("`{field}` = {value:?} is reserved for the {purpose}")]
    ReservedName {
        field: &'static str,
        value: String,
        purpose: &'static str,
    },
    /// A setting is out of range.
    #[error("`{field}` = {value:?} {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Naming scheme and compiler flags shared by the generator and the driver.
///
/// Every field has a built-in default, so an empty `many-deps.toml` (or none
/// at all) reproduces the stock workload:
///
/// ```toml
/// root_name = "so_many_deps"
/// module_prefix = "some_long_and_annoying_name_"
/// function_prefix = "some_function_"
/// macro_prefix = "some_macro_"
/// edition = "2018"
/// codegen_units = 16
/// workspace_manifest = "MODULE.bazel"
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkloadConfig {
    /// Name of the aggregating root crate.
    pub root_name: String,
    /// Prefix of every generated crate name.
    pub module_prefix: String,
    /// Prefix of the function each generated crate exports.
    pub function_prefix: String,
    /// Prefix of the macro each generated crate exports (chained shapes).
    pub macro_prefix: String,
    /// Rust edition passed to the compiler and written into descriptors.
    pub edition: String,
    /// Value of `-C codegen-units`.
    pub codegen_units: u32,
    /// Orchestrator manifest copied from the invoking directory.
    pub workspace_manifest: String,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            root_name: "so_many_deps".to_string(),
            module_prefix: "some_long_and_annoying_name_".to_string(),
            function_prefix: "some_function_".to_string(),
            macro_prefix: "some_macro_".to_string(),
            edition: "2018".to_string(),
            codegen_units: 16,
            workspace_manifest: "MODULE.bazel".to_string(),
        }
    }
}

impl WorkloadConfig {
    /// Reads and validates the configuration at `path`.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let config: WorkloadConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Resolves the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise `many-deps.toml` in `dir` is used
    /// when present, falling back to the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read_from_path(path),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    Self::read_from_path(candidate)
                } else {
                    Ok(Self::default())
                }
            },
        }
    }

    /// Checks that the settings produce a workspace that can be written and built.
    ///
    /// Every name fragment must yield a valid identifier once a rank is
    /// appended, and no two generated names may collide with each other or
    /// with the output layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("root_name", &self.root_name),
            ("module_prefix", &self.module_prefix),
            ("function_prefix", &self.function_prefix),
            ("macro_prefix", &self.macro_prefix),
        ];

        for (field, value) in fields {
            if !is_identifier_fragment(value) {
                return Err(ConfigError::InvalidIdentifier {
                    field,
                    value: value.clone(),
                });
            }
        }

        // Both are imported from the same crate in one `use` list.
        if self.function_prefix == self.macro_prefix {
            return Err(ConfigError::NameCollision {
                first: "function_prefix",
                second: "macro_prefix",
                value: self.function_name(0),
            });
        }

        if self.is_module_name(&self.root_name) {
            return Err(ConfigError::NameCollision {
                first: "root_name",
                second: "module_prefix",
                value: self.root_name.clone(),
            });
        }

        if self.root_name == WorkspaceLayout::BUILD_DIR {
            return Err(ConfigError::ReservedName {
                field: "root_name",
                value: self.root_name.clone(),
                purpose: "build output directory",
            });
        }

        self.validate_manifest()?;

        if !EDITIONS.contains(&self.edition.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "edition",
                value: self.edition.clone(),
                reason: "is not a Rust edition (2015, 2018, 2021 or 2024)",
            });
        }

        if self.codegen_units == 0 {
            return Err(ConfigError::InvalidValue {
                field: "codegen_units",
                value: self.codegen_units.to_string(),
                reason: "must be at least 1",
            });
        }

        Ok(())
    }

    /// The manifest is copied to the output root, so it must be a plain file name
    /// that no crate directory uses.
    fn validate_manifest(&self) -> Result<(), ConfigError> {
        let manifest = &self.workspace_manifest;
        if manifest.is_empty()
            || manifest == "."
            || manifest == ".."
            || manifest.contains(['/', '\\'])
        {
            return Err(ConfigError::InvalidValue {
                field: "workspace_manifest",
                value: manifest.clone(),
                reason: "must be a plain file name",
            });
        }

        if manifest == WorkspaceLayout::BUILD_DIR
            || *manifest == self.root_name
            || self.is_module_name(manifest)
        {
            return Err(ConfigError::ReservedName {
                field: "workspace_manifest",
                value: manifest.clone(),
                purpose: "generated output",
            });
        }

        Ok(())
    }

    /// Whether `name` is what `module_name` returns for some rank.
    fn is_module_name(&self, name: &str) -> bool {
        name.strip_prefix(self.module_prefix.as_str())
            .and_then(|rank| rank.parse::<usize>().ok().map(|n| n.to_string() == rank))
            .unwrap_or(false)
    }

    pub fn module_name(&self, rank: usize) -> String {
        format!("{}{}", self.module_prefix, rank)
    }

    pub fn function_name(&self, rank: usize) -> String {
        format!("{}{}", self.function_prefix, rank)
    }

    pub fn macro_name(&self, rank: usize) -> String {
        format!("{}{}", self.macro_prefix, rank)
    }

    /// Bazel label of the root target, e.g. `//so_many_deps:so_many_deps`.
    pub fn root_label(&self) -> String {
        format!("//{0}:{0}", self.root_name)
    }

    /// Codegen flags shared by direct `rustc` invocations and build descriptors.
    pub fn codegen_flags(&self) -> Vec<String> {
        vec![
            "--codegen=opt-level=0".to_string(),
            "--codegen=debuginfo=0".to_string(),
            format!("--codegen=codegen-units={}", self.codegen_units),
            "--codegen=debug-assertions=on".to_string(),
            "--codegen=embed-bitcode=no".to_string(),
        ]
    }

    /// The fixed flag set every direct `rustc` invocation starts from.
    pub fn base_rustc_flags(&self) -> Vec<String> {
        let mut flags = vec![
            format!("--edition={}", self.edition),
            "--error-format=human".to_string(),
        ];
        flags.extend(self.codegen_flags());
        flags.push("--emit=dep-info,link".to_string());
        flags.push("--color=always".to_string());
        flags
    }
}

fn is_identifier_fragment(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
