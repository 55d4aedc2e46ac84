pub mod activator;
pub mod binder;
pub mod error;
pub mod factory;

pub use activator::ControllerActivator;
pub use binder::ServiceBinder;
pub use error::{ActivationError, FactoryError, FactoryResult};
pub use factory::{ControllerFactory, FILES_CONTROLLER_NAME};
