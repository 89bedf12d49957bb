mod commands;
mod runner;

pub use crate::commands::Command;
pub use crate::runner::Runner;
