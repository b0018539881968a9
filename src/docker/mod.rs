pub mod cmd;
pub mod types;

#[cfg(test)]
pub mod mock;

pub use cmd::{DockerCmd, Executor};
