//! In-memory command registry adapter.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::command::domain::CommandDescriptor;
use crate::command::ports::{CommandRegistry, RegistryError, RegistryResult};

/// Thread-safe in-memory command registry.
///
/// Registration takes a write lock; lookups and listings take read locks and
/// clone descriptor handles out, so a listing is a snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandRegistry {
    commands: Arc<RwLock<HashMap<String, Arc<CommandDescriptor>>>>,
}

impl InMemoryCommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `descriptors`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] when a descriptor has no name.
    pub fn with_commands(
        descriptors: impl IntoIterator<Item = CommandDescriptor>,
    ) -> RegistryResult<Self> {
        let registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Registers a command, replacing any command with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] when the descriptor has no name,
    /// or [`RegistryError::Unavailable`] when the lock is poisoned.
    pub fn register(&self, descriptor: CommandDescriptor) -> RegistryResult<()> {
        if descriptor.name().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let mut commands = self.commands.write().map_err(|err| {
            RegistryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        commands.insert(descriptor.name().to_lowercase(), Arc::new(descriptor));
        Ok(())
    }
}

impl CommandRegistry for InMemoryCommandRegistry {
    fn lookup(&self, name: &str) -> RegistryResult<Option<Arc<CommandDescriptor>>> {
        let commands = self.commands.read().map_err(|err| {
            RegistryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(commands.get(&name.to_lowercase()).cloned())
    }

    fn list_all(&self) -> RegistryResult<Vec<Arc<CommandDescriptor>>> {
        let commands = self.commands.read().map_err(|err| {
            RegistryError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        Ok(commands.values().cloned().collect())
    }
}
