// CLI output formatting with consistent styling using indicatif and colored.
// Compiler diagnostics go straight to the terminal, so our own lines stay plain println!/eprintln!.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use many_deps_shared::DependencyShape;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, fixed durations, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

fn format_duration(duration: Duration) -> String {
    if is_e2e() {
        "[DURATION]".to_string()
    } else {
        format!("{:.2?}", duration)
    }
}

/// Installs the tracing subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_ansi(!is_e2e())
        .try_init()
        .ok();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_header() {
    println!("{}", "many-deps workload".dimmed());
}

pub fn print_cleaned_output(path: &Path) {
    println!("{} {}", "Removed".dimmed(), path.display());
}

pub fn print_generating(count: usize, shape: DependencyShape, path: &Path) {
    println!(
        "{} {} {} {}",
        "Generating".dimmed(),
        format!("{} crate(s)", count).green(),
        format!("({})", shape).cyan(),
        format!("into {}", path.display()).dimmed()
    );
}

pub fn print_generated(crates: usize, duration: Duration) {
    println!(
        "{} {} ({} crates incl. root)",
        "Generated in".dimmed(),
        format_duration(duration).green(),
        crates.to_string().cyan()
    );
}

pub fn print_building(target: &str) {
    println!("{} {}", "Building".dimmed(), target.green());
}

pub fn print_param_file(len: usize) {
    println!("  {} {}", "Param file length:".dimmed(), len.to_string().cyan());
}

pub fn print_built(target: &str, duration: Duration) {
    println!(
        "{} {}",
        format!("{} built in", target).dimmed(),
        format_duration(duration).green()
    );
}

pub fn print_delegating(program: &Path, label: &str) {
    println!(
        "{} {} {}",
        "Delegating to".dimmed(),
        program.display().to_string().bold(),
        label.green()
    );
}

pub fn print_build_summary(invocations: usize, duration: Duration) {
    println!(
        "{} {} invocation(s) in {}",
        "Done:".green(),
        invocations,
        format_duration(duration).green()
    );
}
