use clap::{Parser, Subcommand};
use many_deps_cli::commands::{
    BuildCommandArgs, GenerateArgs, RunArgs, run_build, run_generate, run_workload,
};
use many_deps_cli::utils::ui;
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "many-deps")]
#[command(about = "Generate a workspace with many crate dependencies and build it")]
#[command(version)]
struct Cli {
    /// Deterministic output for end-to-end tests
    #[arg(long, global = true, hide = true)]
    e2e: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the synthetic workspace without building it
    Generate(GenerateArgs),

    /// Build a previously generated workspace
    Build(BuildCommandArgs),

    /// Generate the workspace, then build it
    Run(RunArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(true)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    ui::set_e2e_mode(cli.e2e);
    ui::init_logging();

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Build(args) => run_build(args),
        Commands::Run(args) => run_workload(args),
    };

    result.map_err(miette::Report::new)
}
