use thiserror::Error;

use crate::ports::{controller::BoxError, controller_tree::TreeError};

/// Errors raised while turning a controller type into a live instance
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ActivationError {
    /// The type has no no-argument construction path
    #[error("Controller type {type_name} has no no-argument constructor")]
    MissingConstructor { type_name: &'static str },

    /// The constructor returned an error
    #[error("Constructor of controller type {type_name} failed: {source}")]
    ConstructorFailed {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    /// The constructor panicked
    #[error("Constructor of controller type {type_name} panicked: {message}")]
    ConstructorPanicked {
        type_name: &'static str,
        message: String,
    },
}

impl ActivationError {
    /// Type whose activation failed
    pub fn type_name(&self) -> &'static str {
        match self {
            ActivationError::MissingConstructor { type_name }
            | ActivationError::ConstructorFailed { type_name, .. }
            | ActivationError::ConstructorPanicked { type_name, .. } => *type_name,
        }
    }
}

/// Errors surfaced by the controller factory
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FactoryError {
    /// No controller is registered under this area and name
    #[error("Controller not found. Area '{area}' Name '{name}'")]
    ControllerNotFound { area: String, name: String },

    /// Activation failed; the activator's error is passed through unchanged
    #[error(transparent)]
    ActivationFailed(#[from] ActivationError),

    /// The factory was used before its dependencies were bound
    #[error("Controller factory is not configured: {0}")]
    NotConfigured(&'static str),

    /// Registering a controller in the tree failed
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl FactoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FactoryError::ControllerNotFound { .. })
    }
}

/// Result type for controller factory operations
pub type FactoryResult<T> = Result<T, FactoryError>;
