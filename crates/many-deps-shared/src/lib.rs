#![doc = include_str!("../README.md")]

mod config;
mod layout;
mod shape;

pub use config::{CONFIG_FILE_NAME, ConfigError, WorkloadConfig};
pub use layout::WorkspaceLayout;
pub use shape::DependencyShape;
