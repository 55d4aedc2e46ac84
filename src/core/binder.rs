use std::sync::Arc;

use crate::{
    adapters::{controller_tree::DefaultControllerTree, logging::TracingLoggerFactory},
    config::SwitchyardConfig,
    core::{
        error::{FactoryError, FactoryResult},
        factory::ControllerFactory,
    },
    ports::{controller_tree::ControllerTree, logging::LoggerFactory},
};

/// Startup wiring for a [`ControllerFactory`].
///
/// Collects the tree and logger factory explicitly, then binds them and runs the factory's
/// one-time initialization.
#[derive(Default)]
pub struct ServiceBinder {
    tree: Option<Arc<dyn ControllerTree>>,
    logger_factory: Option<Arc<dyn LoggerFactory>>,
}

impl ServiceBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default tree configured from `config.tree`, logging through `tracing`
    pub fn from_config(config: &SwitchyardConfig) -> Self {
        Self::new()
            .with_tree(Arc::new(DefaultControllerTree::new(config.tree.clone())))
            .with_logger_factory(Arc::new(TracingLoggerFactory::new()))
    }

    pub fn with_tree(mut self, tree: Arc<dyn ControllerTree>) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_logger_factory(mut self, logger_factory: Arc<dyn LoggerFactory>) -> Self {
        self.logger_factory = Some(logger_factory);
        self
    }

    /// Bind the collected services to `factory` and initialize it
    pub fn bind(self, factory: &ControllerFactory) -> FactoryResult<()> {
        let tree = self
            .tree
            .ok_or(FactoryError::NotConfigured("no controller tree supplied to the binder"))?;

        tracing::debug!(
            "Binding controller factory (logger factory: {})",
            self.logger_factory.is_some()
        );
        factory.bind_dependencies(tree, self.logger_factory);
        factory.initialize()
    }

    /// Build a factory from configuration, bound and initialized
    pub fn build(config: &SwitchyardConfig) -> FactoryResult<ControllerFactory> {
        let factory = ControllerFactory::new(config.factory.clone());
        Self::from_config(config).bind(&factory)?;
        Ok(factory)
    }
}
