use crate::core::{BuildEvent, BuildSummary, CliError, WorkspaceNotFoundError};
use crate::driver::{
    ArgsMode, BuildPlan, DEFAULT_BAZEL, DEFAULT_RUSTC, ProcessRunner, build_direct,
    build_with_bazel,
};
use crate::utils::ui;
use clap::Args;
use fs_err as fs;
use many_deps_generate::{Workspace, plan_workspace, write_workspace};
use many_deps_shared::{DependencyShape, WorkloadConfig, WorkspaceLayout};
use std::env;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments describing the workload, shared by every command.
#[derive(Debug, Clone, Args)]
pub struct WorkloadArgs {
    /// Number of ranked crates to generate; the root crate comes on top.
    #[arg(long, alias = "deps_count")]
    pub deps_count: usize,

    /// How the generated crates depend on each other.
    #[arg(long, value_enum, default_value_t = DependencyShape::default())]
    pub shape: DependencyShape,

    /// Output directory, wiped before generation.
    #[arg(short, long, default_value = "out")]
    pub out: PathBuf,

    /// Naming and flag overrides (defaults to ./many-deps.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments controlling how the workspace is built.
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Target triple passed to rustc; omitted when absent.
    #[arg(long)]
    pub target: Option<String>,

    /// How arguments reach rustc.
    #[arg(long, value_enum, default_value = "param-file")]
    pub args_mode: ArgsMode,

    /// Compiler executable.
    #[arg(long, env = "RUSTC", default_value = DEFAULT_RUSTC)]
    pub rustc: PathBuf,

    /// Orchestrator executable, used with `--shape chained-with-descriptors`.
    #[arg(long, default_value = DEFAULT_BAZEL)]
    pub bazel: PathBuf,
}

/// A resolved workload: configuration, paths, and the invoking directory.
#[derive(Debug, Clone)]
pub struct Workload {
    pub config: WorkloadConfig,
    pub layout: WorkspaceLayout,
    pub count: usize,
    pub shape: DependencyShape,
    /// Directory the tool was invoked from; the workspace manifest is copied from here.
    pub invoking_dir: PathBuf,
}

impl Workload {
    /// Loads the configuration and anchors the output directory at the invoking directory.
    pub fn resolve(args: WorkloadArgs) -> Result<Self, CliError> {
        let invoking_dir = env::current_dir()?;
        let config = WorkloadConfig::load(args.config.as_deref(), &invoking_dir)?;
        let root = if args.out.is_absolute() {
            args.out
        } else {
            invoking_dir.join(args.out)
        };

        Ok(Self {
            config,
            layout: WorkspaceLayout::new(root),
            count: args.deps_count,
            shape: args.shape,
            invoking_dir,
        })
    }
}

/// Wipes the output directory and writes a fresh workspace.
pub fn generate_workspace(workload: &Workload) -> Result<Workspace, CliError> {
    let root = workload.layout.root();
    if root.exists() {
        fs::remove_dir_all(root)?;
        ui::print_cleaned_output(root);
    }

    ui::print_generating(workload.count, workload.shape, root);
    let start = Instant::now();

    let workspace = plan_workspace(&workload.config, workload.count, workload.shape)?;
    let crates = workspace.modules.len() + 1;

    let pb = ui::create_progress_bar(crates as u64, "Writing crates");
    let written = write_workspace(
        &workspace,
        &workload.layout,
        &workload.invoking_dir,
        |_| pb.inc(1),
    );
    pb.finish_and_clear();
    written?;

    ui::print_generated(crates, start.elapsed());
    Ok(workspace)
}

/// Builds a generated workspace, directly with rustc or through bazel depending on the shape.
pub fn build_workspace(workload: &Workload, args: &BuildArgs) -> Result<BuildSummary, CliError> {
    let root = workload.layout.root();
    if !root.is_dir() {
        return Err(WorkspaceNotFoundError {
            path: root.to_path_buf(),
        }
        .into());
    }

    let mut runner = ProcessRunner;
    let summary = if workload.shape.emits_descriptors() {
        if args.target.is_some() {
            tracing::warn!("--target is ignored when bazel drives the build");
        }
        ui::print_delegating(&args.bazel, &workload.config.root_label());
        build_with_bazel(
            &workload.config,
            &workload.layout,
            &args.bazel,
            &mut runner,
            report,
        )?
    } else {
        let plan = BuildPlan::direct(
            &workload.config,
            &workload.layout,
            workload.count,
            args.target.as_deref(),
        );
        build_direct(
            &plan,
            &workload.layout,
            &args.rustc,
            args.args_mode,
            &mut runner,
            report,
        )?
    };

    ui::print_build_summary(summary.invocations, summary.duration);
    Ok(summary)
}

fn report(event: BuildEvent<'_>) {
    match event {
        BuildEvent::Started {
            target,
            param_file_len,
        } => {
            ui::print_building(target);
            if let Some(len) = param_file_len {
                ui::print_param_file(len);
            }
        },
        BuildEvent::Finished { target, duration } => ui::print_built(target, duration),
    }
}
