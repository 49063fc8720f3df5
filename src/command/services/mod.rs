//! Application services for the slash-command subsystem.

mod executor;

pub use executor::CommandExecutor;
