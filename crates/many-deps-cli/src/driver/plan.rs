use many_deps_shared::{WorkloadConfig, WorkspaceLayout};
use std::path::PathBuf;

/// Output kind passed as `--crate-type`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrateType {
    /// Intermediate library linked by higher ranks.
    Rlib,
    /// Final dynamically loadable artifact.
    Cdylib,
}

impl CrateType {
    pub fn as_str(self) -> &'static str {
        match self {
            CrateType::Rlib => "rlib",
            CrateType::Cdylib => "cdylib",
        }
    }
}

/// One `rustc` invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub source: PathBuf,
    pub out_dir: PathBuf,
    pub crate_type: CrateType,
    /// Already built crates made available through `--extern`.
    pub externs: Vec<String>,
    /// Full argument list, source path first.
    pub args: Vec<String>,
}

/// Invocations in build order: every ranked crate, then the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildPlan {
    pub invocations: Vec<Invocation>,
}

impl BuildPlan {
    /// Plans direct `rustc` invocations for `count` crates plus the root.
    ///
    /// Crate `i` sees every crate built before it; the root sees all of them.
    pub fn direct(
        config: &WorkloadConfig,
        layout: &WorkspaceLayout,
        count: usize,
        target: Option<&str>,
    ) -> Self {
        let mut base = config.base_rustc_flags();
        if let Some(target) = target {
            base.push(format!("--target={}", target));
        }

        let mut built: Vec<String> = Vec::with_capacity(count);
        let mut invocations = Vec::with_capacity(count + 1);

        for rank in 0..count {
            let name = config.module_name(rank);
            invocations.push(Self::invocation(
                layout,
                &base,
                name.clone(),
                CrateType::Rlib,
                &built,
            ));
            built.push(name);
        }

        invocations.push(Self::invocation(
            layout,
            &base,
            config.root_name.clone(),
            CrateType::Cdylib,
            &built,
        ));

        Self { invocations }
    }

    fn invocation(
        layout: &WorkspaceLayout,
        base: &[String],
        name: String,
        crate_type: CrateType,
        externs: &[String],
    ) -> Invocation {
        let source = layout.source_path(&name);
        let out_dir = layout.out_dir(&name);

        let mut args = Vec::with_capacity(4 + base.len() + externs.len() * 2);
        args.push(source.display().to_string());
        args.push(format!("--crate-name={}", name));
        args.push(format!("--crate-type={}", crate_type.as_str()));
        args.push(format!("--out-dir={}", out_dir.display()));
        args.extend(base.iter().cloned());
        args.extend(externs.iter().map(|dep| {
            format!("--extern={}={}", dep, layout.rlib_path(dep).display())
        }));
        args.extend(
            externs
                .iter()
                .map(|dep| format!("-Ldependency={}", layout.out_dir(dep).display())),
        );

        Invocation {
            name,
            source,
            out_dir,
            crate_type,
            externs: externs.to_vec(),
            args,
        }
    }
}
