pub mod cli;
pub mod load_config;

pub use cli::{bootstrap, run, Cli, Commands};
