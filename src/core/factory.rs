//! Controller factory: the single entry point translating an (area, name) pair into a
//! ready-to-use controller, and tearing it down afterwards.
//!
//! The factory starts Unbound. [`ControllerFactory::bind_dependencies`] (usually through
//! [`crate::core::ServiceBinder`]) supplies the tree and optional logger factory; from then
//! on the bindings are an immutable snapshot read lock-free by every request thread.
//! Every operation except [`ControllerFactory::release`] fails with
//! [`FactoryError::NotConfigured`] while the factory is Unbound.
//!
//! Instances are never cached: each create call activates a fresh controller whose
//! lifetime belongs to the caller until it hands it back to `release`.
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::{
    adapters::logging::NullLogger,
    config::FactorySettings,
    controllers::FilesController,
    core::{
        activator::ControllerActivator,
        error::{FactoryError, FactoryResult},
    },
    ports::{
        controller::{ControllerInstance, ControllerType},
        controller_tree::ControllerTree,
        logging::{LoggerFactory, LoggerRef},
    },
};

/// Name the built-in static-file controller is registered under
pub const FILES_CONTROLLER_NAME: &str = "files";

struct Bindings {
    tree: Arc<dyn ControllerTree>,
    logger_factory: Option<Arc<dyn LoggerFactory>>,
    logger: LoggerRef,
    activator: ControllerActivator,
}

impl Bindings {
    fn new(tree: Arc<dyn ControllerTree>, logger_factory: Option<Arc<dyn LoggerFactory>>) -> Self {
        let logger = logger_factory
            .as_ref()
            .map(|factory| factory.create(std::any::type_name::<ControllerFactory>()))
            .unwrap_or_else(NullLogger::shared);
        let activator = ControllerActivator::new(logger_factory.clone(), Arc::clone(&logger));
        Self {
            tree,
            logger_factory,
            logger,
            activator,
        }
    }
}

/// Resolves, activates and releases controllers
pub struct ControllerFactory {
    bindings: ArcSwapOption<Bindings>,
    settings: FactorySettings,
}

impl Default for ControllerFactory {
    fn default() -> Self {
        Self::new(FactorySettings::default())
    }
}

impl ControllerFactory {
    /// Create an Unbound factory
    pub fn new(settings: FactorySettings) -> Self {
        Self {
            bindings: ArcSwapOption::empty(),
            settings,
        }
    }

    /// Create a factory bound to `tree`, without a logger factory
    pub fn with_tree(tree: Arc<dyn ControllerTree>) -> Self {
        let factory = Self::default();
        factory.bind_dependencies(tree, None);
        factory
    }

    pub fn settings(&self) -> &FactorySettings {
        &self.settings
    }

    /// Wire the tree and optional logger factory. Invoked once, before [`Self::initialize`].
    ///
    /// Without a logger factory the factory logs nowhere and controllers receive no logger.
    pub fn bind_dependencies(
        &self,
        tree: Arc<dyn ControllerTree>,
        logger_factory: Option<Arc<dyn LoggerFactory>>,
    ) {
        self.bindings
            .store(Some(Arc::new(Bindings::new(tree, logger_factory))));
    }

    pub fn is_bound(&self) -> bool {
        self.bindings.load().is_some()
    }

    /// Register the built-in controllers.
    ///
    /// Invoke once at startup after binding. Not idempotent under a tree that rejects
    /// duplicates.
    pub fn initialize(&self) -> FactoryResult<()> {
        let bindings = self.bindings()?;

        if bindings.logger.is_debug_enabled() {
            bindings
                .logger
                .debug(format_args!("Registering built-in controllers"));
        }

        if self.settings.register_builtins {
            bindings.tree.add_controller(
                &self.settings.builtin_area,
                FILES_CONTROLLER_NAME,
                ControllerType::of::<FilesController>(),
            )?;
        }
        Ok(())
    }

    /// Resolve `name` within `area` (root when `None`) and activate it.
    ///
    /// A miss is logged at error level once and reported as
    /// [`FactoryError::ControllerNotFound`] with the normalized area.
    pub fn create_controller(
        &self,
        area: Option<&str>,
        name: &str,
    ) -> FactoryResult<ControllerInstance> {
        let bindings = self.bindings()?;
        let area = area.unwrap_or_default();

        if bindings.logger.is_debug_enabled() {
            bindings.logger.debug(format_args!(
                "Creating controller instance. Area '{area}' Name '{name}'"
            ));
        }

        let Some(controller_type) = bindings.tree.get_controller(area, name) else {
            bindings.logger.error(format_args!(
                "Controller not found. Area '{area}' Name '{name}'"
            ));
            return Err(FactoryError::ControllerNotFound {
                area: area.to_string(),
                name: name.to_string(),
            });
        };

        Ok(bindings.activator.activate(&controller_type)?)
    }

    /// Activate `controller_type` directly, bypassing the tree.
    ///
    /// Construction failures are logged with their cause and returned unchanged as
    /// [`FactoryError::ActivationFailed`].
    pub fn create_controller_from_type(
        &self,
        controller_type: &ControllerType,
    ) -> FactoryResult<ControllerInstance> {
        let bindings = self.bindings()?;
        Ok(bindings.activator.activate(controller_type)?)
    }

    /// Tear down a controller created by this factory.
    ///
    /// Teardown always runs, bound or not; the debug message is only built when debug
    /// logging is enabled.
    pub fn release(&self, controller: ControllerInstance) {
        if let Some(bindings) = self.bindings.load_full() {
            if bindings.logger.is_debug_enabled() {
                bindings.logger.debug(format_args!(
                    "Controller released: {}",
                    controller.type_name()
                ));
            }
        }

        controller.dispose();
    }

    /// The bound controller tree
    pub fn tree(&self) -> FactoryResult<Arc<dyn ControllerTree>> {
        Ok(Arc::clone(&self.bindings()?.tree))
    }

    /// Replace the controller tree, keeping the bound logger factory.
    ///
    /// On an Unbound factory this binds `tree` without a logger factory.
    pub fn set_tree(&self, tree: Arc<dyn ControllerTree>) {
        self.bindings.rcu(|current| {
            let logger_factory = current
                .as_ref()
                .and_then(|bindings| bindings.logger_factory.clone());
            Some(Arc::new(Bindings::new(Arc::clone(&tree), logger_factory)))
        });
    }

    fn bindings(&self) -> FactoryResult<Arc<Bindings>> {
        self.bindings
            .load_full()
            .ok_or(FactoryError::NotConfigured("controller tree is not bound"))
    }
}
