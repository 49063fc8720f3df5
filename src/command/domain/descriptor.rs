//! Registered slash-command descriptors.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use super::{CommandHandler, PreviewExecuteHandler, PreviewHandler};

/// Metadata and behaviour registered for one slash command.
///
/// The serialised form exposes metadata only; handlers never leave the
/// process.
#[derive(Clone)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    params_hint: String,
    permission: Vec<String>,
    client_only: bool,
    enabled: bool,
    handler: Arc<dyn CommandHandler>,
    preview_handler: Option<Arc<dyn PreviewHandler>>,
    preview_execute_handler: Option<Arc<dyn PreviewExecuteHandler>>,
}

impl CommandDescriptor {
    /// Creates an enabled descriptor. The name is stored lowercase.
    #[must_use]
    pub fn new(name: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        Self {
            name: name.into().to_lowercase(),
            description: String::new(),
            params_hint: String::new(),
            permission: Vec::new(),
            client_only: false,
            enabled: true,
            handler: Arc::new(handler),
            preview_handler: None,
            preview_execute_handler: None,
        }
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the usage hint shown for the command's parameters.
    #[must_use]
    pub fn with_params_hint(mut self, params_hint: impl Into<String>) -> Self {
        self.params_hint = params_hint.into();
        self
    }

    /// Adds a permission tag required to see or use the command.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission.push(permission.into());
        self
    }

    /// Marks the command as handled by clients only.
    #[must_use]
    pub const fn client_only(mut self) -> Self {
        self.client_only = true;
        self
    }

    /// Sets whether the command may be run.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Attaches a preview generator.
    #[must_use]
    pub fn with_preview(mut self, handler: impl PreviewHandler + 'static) -> Self {
        self.preview_handler = Some(Arc::new(handler));
        self
    }

    /// Attaches a preview-item executor.
    #[must_use]
    pub fn with_preview_execute(mut self, handler: impl PreviewExecuteHandler + 'static) -> Self {
        self.preview_execute_handler = Some(Arc::new(handler));
        self
    }

    /// Returns the lowercase command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameter usage hint.
    #[must_use]
    pub fn params_hint(&self) -> &str {
        &self.params_hint
    }

    /// Returns the permission tags.
    #[must_use]
    pub fn permission(&self) -> &[String] {
        &self.permission
    }

    /// Returns whether the command is client-only.
    #[must_use]
    pub const fn is_client_only(&self) -> bool {
        self.client_only
    }

    /// Returns whether the command may be run.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns whether a preview generator is registered.
    #[must_use]
    pub const fn provides_preview(&self) -> bool {
        self.preview_handler.is_some()
    }

    /// Returns the command handler.
    #[must_use]
    pub fn handler(&self) -> &dyn CommandHandler {
        self.handler.as_ref()
    }

    /// Returns the preview generator, if any.
    #[must_use]
    pub fn preview_handler(&self) -> Option<&dyn PreviewHandler> {
        self.preview_handler.as_deref()
    }

    /// Returns the preview-item executor, if any.
    #[must_use]
    pub fn preview_execute_handler(&self) -> Option<&dyn PreviewExecuteHandler> {
        self.preview_execute_handler.as_deref()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescriptorView<'a> {
    name: &'a str,
    description: &'a str,
    params: &'a str,
    permission: &'a [String],
    client_only: bool,
    provides_preview: bool,
    enabled: bool,
}

impl Serialize for CommandDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        DescriptorView {
            name: &self.name,
            description: &self.description,
            params: &self.params_hint,
            permission: &self.permission,
            client_only: self.client_only,
            provides_preview: self.provides_preview(),
            enabled: self.enabled,
        }
        .serialize(serializer)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params_hint", &self.params_hint)
            .field("permission", &self.permission)
            .field("client_only", &self.client_only)
            .field("enabled", &self.enabled)
            .field("provides_preview", &self.provides_preview())
            .field(
                "provides_preview_execute",
                &self.preview_execute_handler.is_some(),
            )
            .finish_non_exhaustive()
    }
}
