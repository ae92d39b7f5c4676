//! Resolution of which services are bound to the recognized listener.

use mqtt_config::AnalyzerConfig;
use mqtt_syntax::{AttachPoint, ServiceDecl, SourceFile, SyntaxTree, TypeRef};

/// The services of one file as seen through the analyzer config.
///
/// Built only when the file imports the configured module; a file without
/// that import has nothing to validate.
#[derive(Debug, Clone, Copy)]
pub struct ServiceModel<'a> {
    file: &'a SourceFile,
    config: &'a AnalyzerConfig,
    prefix: &'a str,
}

impl<'a> ServiceModel<'a> {
    /// Resolve the import prefix of the configured module in `file`.
    #[must_use]
    pub fn resolve(file: &'a SourceFile, config: &'a AnalyzerConfig) -> Option<Self> {
        let import = file
            .tree()
            .imports()
            .find(|import| import.qualified_name() == config.module)?;
        tracing::trace!(module = %config.module, prefix = import.prefix(), "Resolved module import");
        Some(Self {
            file,
            config,
            prefix: import.prefix(),
        })
    }

    #[must_use]
    pub const fn file(&self) -> &'a SourceFile {
        self.file
    }

    #[must_use]
    pub fn tree(&self) -> &'a SyntaxTree {
        self.file.tree()
    }

    #[must_use]
    pub const fn config(&self) -> &'a AnalyzerConfig {
        self.config
    }

    /// The prefix the file uses for the module (`mqtt`, or the import alias).
    #[must_use]
    pub const fn prefix(&self) -> &'a str {
        self.prefix
    }

    fn is_listener_type(&self, type_ref: &TypeRef) -> bool {
        type_ref.is(self.prefix, &self.config.listener)
    }

    /// Whether any attach point of `service` is the recognized listener.
    #[must_use]
    pub fn is_bound(&self, service: &ServiceDecl<'_>) -> bool {
        service.attach_points().iter().any(|attach| match attach {
            AttachPoint::New {
                type_ref: Some(type_ref),
                ..
            } => self.is_listener_type(type_ref),
            AttachPoint::Listener { name, .. } => self
                .tree()
                .listener(name)
                .and_then(|listener| listener.listener_type())
                .is_some_and(|type_ref| self.is_listener_type(type_ref)),
            AttachPoint::New { type_ref: None, .. } | AttachPoint::Other { .. } => false,
        })
    }

    /// Services bound to the recognized listener, in source order.
    pub fn bound_services(&self) -> impl Iterator<Item = ServiceDecl<'a>> + '_ {
        self.tree()
            .services()
            .filter(move |service| self.is_bound(service))
    }
}
