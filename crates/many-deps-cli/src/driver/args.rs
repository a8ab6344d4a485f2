use anyhow::{Context as _, Result};
use clap::ValueEnum;
use fs_err as fs;
use std::path::Path;

/// Joined argument length above which `auto` switches to a param file.
///
/// Windows caps a command line at 32 767 characters; staying below that
/// leaves room for the program path.
pub const INLINE_ARGS_LIMIT: usize = 30_000;

/// How arguments reach the compiler.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ArgsMode {
    /// Always write a param file and pass `@file`.
    #[default]
    ParamFile,
    /// Use a param file only when the arguments exceed the inline limit.
    Auto,
    /// Pass every argument on the command line.
    Inline,
}

impl ArgsMode {
    pub fn uses_param_file(self, args: &[String]) -> bool {
        match self {
            ArgsMode::ParamFile => true,
            ArgsMode::Inline => false,
            ArgsMode::Auto => joined_len(args) > INLINE_ARGS_LIMIT,
        }
    }
}

/// Arguments ready to hand to the compiler.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommandLine {
    pub args: Vec<String>,
    /// Length of the param file contents, if one was written.
    pub param_file_len: Option<usize>,
}

/// Resolves `args` into a command line, writing `param_file` when the mode calls for it.
pub fn command_line(mode: ArgsMode, args: &[String], param_file: &Path) -> Result<CommandLine> {
    if !mode.uses_param_file(args) {
        return Ok(CommandLine {
            args: args.to_vec(),
            param_file_len: None,
        });
    }

    let len = write_param_file(param_file, args)?;
    Ok(CommandLine {
        args: vec![format!("@{}", param_file.display())],
        param_file_len: Some(len),
    })
}

/// Writes one argument per line and returns the written length.
pub fn write_param_file(path: &Path, args: &[String]) -> Result<usize> {
    let content = args.join("\n");
    fs::write(path, &content)
        .with_context(|| format!("Failed to write param file {}", path.display()))?;
    Ok(content.len())
}

fn joined_len(args: &[String]) -> usize {
    args.iter().map(|a| a.len() + 1).sum::<usize>().saturating_sub(1)
}
