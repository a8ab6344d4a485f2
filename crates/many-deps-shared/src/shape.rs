use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How the generated crates depend on each other.
///
/// The root crate always depends on every generated crate; the shape only
/// controls the edges between the ranked crates themselves.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ValueEnum, strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DependencyShape {
    /// Independent leaf crates, each printing a literal.
    Flat,
    /// Crate `i` calls every function and macro of crates `0..i`.
    #[default]
    Chained,
    /// Same sources as `Chained`, plus a `BUILD.bazel` per crate so the
    /// workspace can be built by bazel.
    ChainedWithDescriptors,
}

impl DependencyShape {
    /// Ranks the crate at `rank` depends on, in ascending order.
    pub fn dependencies(self, rank: usize) -> Range<usize> {
        match self {
            DependencyShape::Flat => 0..0,
            DependencyShape::Chained | DependencyShape::ChainedWithDescriptors => 0..rank,
        }
    }

    /// Whether every crate exports a `#[macro_export]` macro.
    pub fn exports_macros(self) -> bool {
        !matches!(self, DependencyShape::Flat)
    }

    /// Whether per-crate build descriptors and the workspace manifest are emitted.
    pub fn emits_descriptors(self) -> bool {
        matches!(self, DependencyShape::ChainedWithDescriptors)
    }
}
