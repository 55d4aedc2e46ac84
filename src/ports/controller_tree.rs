use thiserror::Error;

use crate::ports::controller::{ControllerDescriptor, ControllerType};

/// Error type for controller registration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// Area path contains an empty segment (e.g. `admin//users`)
    #[error("Invalid area '{0}': area segments must not be empty")]
    InvalidArea(String),

    /// Controller name is empty
    #[error("Invalid controller name in area '{area}': name must not be empty")]
    InvalidName { area: String },

    /// A controller is already registered under this key and the tree rejects duplicates
    #[error("Controller already registered. Area '{area}' Name '{name}'")]
    DuplicateController { area: String, name: String },
}

/// Result type for controller registration
pub type TreeResult<T> = Result<T, TreeError>;

/// ControllerTree defines the port for the registry mapping (area, name) to controller types
///
/// The empty area is the root. Lookups are pure and match the exact (area, name) key; no
/// prefix or wildcard fallback is implied.
pub trait ControllerTree: Send + Sync + 'static {
    /// Register a controller type under an area and name
    ///
    /// Re-registering an existing key follows the implementation's duplicate policy.
    fn add_controller(&self, area: &str, name: &str, controller_type: ControllerType)
    -> TreeResult<()>;

    /// Look up the controller type registered under an area and name
    fn get_controller(&self, area: &str, name: &str) -> Option<ControllerType>;

    /// Every registration, ordered by area then name
    fn descriptors(&self) -> Vec<ControllerDescriptor>;
}
