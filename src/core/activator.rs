//! Controller activation.
//!
//! The activator runs a type handle's no-argument construction path, then applies
//! post-construction wiring: controllers exposing the [`LoggableController`] capability
//! receive a logger scoped to their concrete type when a logger factory is configured.
//! Construction failures, including panics, come back as [`ActivationError`] values and
//! are logged at error level with the cause attached before being returned.
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::{
    core::error::ActivationError,
    ports::{
        controller::{ControllerInstance, ControllerType, LoggableController},
        logging::{LoggerFactory, LoggerRef},
    },
};

/// Turns controller type handles into live instances
#[derive(Clone)]
pub struct ControllerActivator {
    logger_factory: Option<Arc<dyn LoggerFactory>>,
    logger: LoggerRef,
}

impl ControllerActivator {
    /// `logger` receives activation failures; `logger_factory`, when present, supplies the
    /// loggers injected into new controllers.
    pub fn new(logger_factory: Option<Arc<dyn LoggerFactory>>, logger: LoggerRef) -> Self {
        Self {
            logger_factory,
            logger,
        }
    }

    pub fn activate(
        &self,
        controller_type: &ControllerType,
    ) -> Result<ControllerInstance, ActivationError> {
        match self.construct(controller_type) {
            Ok(instance) => Ok(instance),
            Err(e) => {
                self.logger.error_with_cause(
                    format_args!("Could not create controller instance. Activation failed."),
                    &e,
                );
                Err(e)
            }
        }
    }

    fn construct(
        &self,
        controller_type: &ControllerType,
    ) -> Result<ControllerInstance, ActivationError> {
        let type_name = controller_type.type_name();
        let constructor = controller_type
            .constructor()
            .ok_or(ActivationError::MissingConstructor { type_name })?;

        let mut controller = panic::catch_unwind(AssertUnwindSafe(|| (**constructor)()))
            .map_err(|payload| ActivationError::ConstructorPanicked {
                type_name,
                message: panic_message(payload.as_ref()),
            })?
            .map_err(|source| ActivationError::ConstructorFailed { type_name, source })?;

        if let (Some(loggable), Some(factory)) =
            (controller.as_loggable(), self.logger_factory.as_ref())
        {
            inject_logger(loggable, &**factory, type_name);
        }

        Ok(ControllerInstance::new(controller, controller_type.clone()))
    }
}

fn inject_logger(loggable: &mut dyn LoggableController, factory: &dyn LoggerFactory, type_name: &str) {
    loggable.set_logger(factory.create(type_name));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use tracing::Level;

    use super::*;
    use crate::{
        adapters::logging::{MemoryLoggerFactory, NullLogger},
        ports::controller::{
            Controller, ControllerBase, ControllerContext, ControllerError,
        },
    };

    #[derive(Default)]
    struct BaseBacked {
        base: ControllerBase,
    }

    impl Controller for BaseBacked {
        fn process(&mut self, _context: &mut ControllerContext) -> Result<(), ControllerError> {
            Ok(())
        }

        fn as_loggable(&mut self) -> Option<&mut dyn LoggableController> {
            Some(&mut self.base)
        }
    }

    #[derive(Default)]
    struct ThirdParty;

    impl Controller for ThirdParty {
        fn process(&mut self, _context: &mut ControllerContext) -> Result<(), ControllerError> {
            Ok(())
        }
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("database unavailable")]
    struct DatabaseUnavailable;

    fn recording() -> (ControllerActivator, MemoryLoggerFactory) {
        let factory = MemoryLoggerFactory::new(Level::TRACE);
        let logger = factory.create("activator");
        let activator = ControllerActivator::new(Some(Arc::new(factory.clone())), logger);
        (activator, factory)
    }

    #[test]
    fn test_injects_logger_scoped_to_concrete_type() {
        let (activator, factory) = recording();

        let mut instance = activator.activate(&ControllerType::of::<BaseBacked>()).unwrap();

        let logger = instance.logger().unwrap();
        assert_eq!(logger.scope(), std::any::type_name::<BaseBacked>());
        assert!(factory
            .created_scopes()
            .contains(&std::any::type_name::<BaseBacked>().to_string()));
    }

    #[test]
    fn test_third_party_controller_gets_no_logger() {
        let (activator, factory) = recording();

        let mut instance = activator.activate(&ControllerType::of::<ThirdParty>()).unwrap();

        assert!(instance.logger().is_none());
        assert_eq!(factory.created_scopes(), vec!["activator".to_string()]);
    }

    #[test]
    fn test_activation_without_logger_factory_succeeds() {
        let activator = ControllerActivator::new(None, NullLogger::shared());

        let mut instance = activator.activate(&ControllerType::of::<BaseBacked>()).unwrap();

        assert!(instance.is::<BaseBacked>());
        assert_eq!(instance.logger().unwrap().scope(), "");
    }

    #[test]
    fn test_missing_constructor() {
        let (activator, factory) = recording();

        let err = activator
            .activate(&ControllerType::declared::<ThirdParty>())
            .unwrap_err();

        assert!(matches!(err, ActivationError::MissingConstructor { .. }));
        assert_eq!(err.type_name(), std::any::type_name::<ThirdParty>());
        let errors = factory.records_at(Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Could not create controller instance. Activation failed."
        );
        assert!(errors[0].cause.as_deref().unwrap().contains("no-argument constructor"));
    }

    #[test]
    fn test_constructor_error_is_preserved() {
        let (activator, factory) = recording();
        let handle =
            ControllerType::with_constructor(|| Err::<ThirdParty, _>(DatabaseUnavailable));

        let err = activator.activate(&handle).unwrap_err();

        let source = err.source().unwrap();
        assert_eq!(
            source.downcast_ref::<DatabaseUnavailable>(),
            Some(&DatabaseUnavailable)
        );
        assert!(factory.records_at(Level::ERROR)[0]
            .cause
            .as_deref()
            .unwrap()
            .contains("database unavailable"));
    }

    #[test]
    fn test_constructor_panic_is_reported() {
        let (activator, _factory) = recording();
        let handle = ControllerType::with_constructor(|| -> Result<ThirdParty, DatabaseUnavailable> {
            panic!("constructor exploded")
        });

        let err = activator.activate(&handle).unwrap_err();

        match err {
            ActivationError::ConstructorPanicked { message, .. } => {
                assert_eq!(message, "constructor exploded")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
