use std::path::{Path, PathBuf};

/// Paths of everything the generator writes and the driver reads under an output root.
///
/// ```text
/// <root>/<crate>/src/lib.rs
/// <root>/<crate>/BUILD.bazel
/// <root>/build/<crate>/lib<crate>.rlib
/// <root>/build/<crate>/<crate>.params
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub const BUILD_DIR: &'static str = "build";
    pub const SOURCE_FILE: &'static str = "lib.rs";
    pub const DESCRIPTOR_FILE: &'static str = "BUILD.bazel";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn crate_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn src_dir(&self, name: &str) -> PathBuf {
        self.crate_dir(name).join("src")
    }

    pub fn source_path(&self, name: &str) -> PathBuf {
        self.src_dir(name).join(Self::SOURCE_FILE)
    }

    pub fn descriptor_path(&self, name: &str) -> PathBuf {
        self.crate_dir(name).join(Self::DESCRIPTOR_FILE)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(Self::BUILD_DIR)
    }

    /// Output directory handed to `--out-dir` for one crate.
    pub fn out_dir(&self, name: &str) -> PathBuf {
        self.build_dir().join(name)
    }

    pub fn rlib_path(&self, name: &str) -> PathBuf {
        self.out_dir(name).join(format!("lib{}.rlib", name))
    }

    pub fn param_file_path(&self, name: &str) -> PathBuf {
        self.out_dir(name).join(format!("{}.params", name))
    }
}
