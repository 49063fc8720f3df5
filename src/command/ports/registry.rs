//! Command registry port.
//!
//! The registry is populated by startup code; request handling only reads
//! from it.

use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::CommandDescriptor;

/// Result type for command registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Read access to registered commands.
pub trait CommandRegistry: Send + Sync {
    /// Finds a command by name. Names are matched case-insensitively.
    ///
    /// Returns `Ok(None)` when no command has the given name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when registry access fails.
    fn lookup(&self, name: &str) -> RegistryResult<Option<Arc<CommandDescriptor>>>;

    /// Returns a snapshot of every registered command in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when registry access fails.
    fn list_all(&self) -> RegistryResult<Vec<Arc<CommandDescriptor>>>;
}

/// Errors for command registry operations.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// A descriptor was registered with an empty name.
    #[error("command name must not be empty")]
    EmptyName,

    /// Registry storage could not be read or written.
    #[error("command registry unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wraps a storage failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
