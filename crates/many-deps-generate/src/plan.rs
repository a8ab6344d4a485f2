//! Pure rendering of a workspace: names, dependency edges and file contents.
//!
//! Nothing here touches the filesystem, so the same inputs always produce the
//! same `Workspace`.

use crate::error::GenerateError;
use crate::templates::{BuildBazelTemplate, LibRsTemplate};
use askama::Template as _;
use many_deps_shared::{DependencyShape, WorkloadConfig};

/// Literal printed by every generated function.
const MESSAGE: &str = "hello";

/// A generated crate, either ranked or the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Module {
    /// Position in the chain; `None` for the root crate.
    pub rank: Option<usize>,
    pub name: String,
    /// Exported function (`main` for the root).
    pub function: String,
    /// Exported macro, if the shape defines one.
    pub macro_name: Option<String>,
    /// Ranks this crate uses, ascending.
    pub dependencies: Vec<usize>,
    /// Contents of `src/lib.rs`.
    pub source: String,
    /// Contents of `BUILD.bazel`, if the shape emits descriptors.
    pub descriptor: Option<String>,
}

impl Module {
    pub fn is_root(&self) -> bool {
        self.rank.is_none()
    }
}

/// Every crate of a generated workspace, in build order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Workspace {
    pub shape: DependencyShape,
    /// Ranked crates; `modules[i].rank == Some(i)`.
    pub modules: Vec<Module>,
    pub root: Module,
    /// Manifest file copied from the invoking directory, if any.
    pub manifest: Option<String>,
}

impl Workspace {
    /// Ranked crates followed by the root.
    pub fn crates(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter().chain(std::iter::once(&self.root))
    }
}

/// Renders all sources and descriptors for `count` crates of the given shape.
pub fn plan_workspace(
    config: &WorkloadConfig,
    count: usize,
    shape: DependencyShape,
) -> Result<Workspace, GenerateError> {
    let modules = (0..count)
        .map(|rank| plan_module(config, shape, rank))
        .collect::<Result<Vec<_>, _>>()?;
    let root = plan_root(config, shape, count)?;

    tracing::debug!(count, %shape, "planned workspace");

    Ok(Workspace {
        shape,
        modules,
        root,
        manifest: shape
            .emits_descriptors()
            .then(|| config.workspace_manifest.clone()),
    })
}

fn plan_module(
    config: &WorkloadConfig,
    shape: DependencyShape,
    rank: usize,
) -> Result<Module, GenerateError> {
    let name = config.module_name(rank);
    let function = config.function_name(rank);
    let macro_name = shape.exports_macros().then(|| config.macro_name(rank));
    let dependencies: Vec<usize> = shape.dependencies(rank).collect();

    let refs = References::new(config, shape, &dependencies);
    let source = LibRsTemplate {
        imports: &refs.imports,
        exported_macro: macro_name.as_deref(),
        function: &function,
        calls: &refs.calls,
        macro_calls: &refs.macro_calls,
        message: Some(MESSAGE),
    }
    .render()?;

    let descriptor = shape
        .emits_descriptors()
        .then(|| render_descriptor(config, "rust_library", &name, &dependencies))
        .transpose()?;

    Ok(Module {
        rank: Some(rank),
        name,
        function,
        macro_name,
        dependencies,
        source: terminate(source),
        descriptor,
    })
}

fn plan_root(
    config: &WorkloadConfig,
    shape: DependencyShape,
    count: usize,
) -> Result<Module, GenerateError> {
    let dependencies: Vec<usize> = (0..count).collect();
    let refs = References::new(config, shape, &dependencies);
    let function = "main".to_string();

    let source = LibRsTemplate {
        imports: &refs.imports,
        exported_macro: None,
        function: &function,
        calls: &refs.calls,
        macro_calls: &refs.macro_calls,
        message: None,
    }
    .render()?;

    let descriptor = shape
        .emits_descriptors()
        .then(|| {
            render_descriptor(
                config,
                "rust_shared_library",
                &config.root_name,
                &dependencies,
            )
        })
        .transpose()?;

    Ok(Module {
        rank: None,
        name: config.root_name.clone(),
        function,
        macro_name: None,
        dependencies,
        source: terminate(source),
        descriptor,
    })
}

fn render_descriptor(
    config: &WorkloadConfig,
    rule: &str,
    name: &str,
    dependencies: &[usize],
) -> Result<String, GenerateError> {
    let deps: Vec<String> = dependencies
        .iter()
        .map(|&rank| config.module_name(rank))
        .collect();
    let rustc_flags = config.codegen_flags();

    let rendered = BuildBazelTemplate {
        rule,
        name,
        edition: &config.edition,
        deps: &deps,
        rustc_flags: &rustc_flags,
    }
    .render()?;

    Ok(terminate(rendered))
}

/// The `use` paths, calls and macro invocations a crate makes into its dependencies.
struct References {
    imports: Vec<String>,
    calls: Vec<String>,
    macro_calls: Vec<String>,
}

impl References {
    fn new(config: &WorkloadConfig, shape: DependencyShape, dependencies: &[usize]) -> Self {
        let with_macros = shape.exports_macros();
        let mut imports = Vec::with_capacity(dependencies.len());
        let mut calls = Vec::with_capacity(dependencies.len());
        let mut macro_calls = Vec::new();

        for &rank in dependencies {
            let krate = config.module_name(rank);
            let function = config.function_name(rank);

            if with_macros {
                let mac = config.macro_name(rank);
                imports.push(format!("{}::{{{}, {}}}", krate, function, mac));
                macro_calls.push(mac);
            } else {
                imports.push(format!("{}::{}", krate, function));
            }
            calls.push(function);
        }

        Self {
            imports,
            calls,
            macro_calls,
        }
    }
}

/// Ends rendered text with exactly one newline.
fn terminate(mut text: String) -> String {
    let trimmed = text.trim_end_matches('\n').len();
    text.truncate(trimmed);
    text.push('\n');
    text
}
