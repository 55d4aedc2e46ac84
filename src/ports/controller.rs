use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::Arc,
};

use thiserror::Error;

use crate::ports::logging::LoggerRef;

/// Boxed error produced by controller constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

type Constructor = Arc<dyn Fn() -> Result<Box<dyn Controller>, BoxError> + Send + Sync>;

/// Error raised by a controller while processing an action
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ControllerError {
    /// The controller has no action with this name
    #[error("Action not found: {0}")]
    ActionNotFound(String),

    /// The action ran but could not complete
    #[error("Action failed: {0}")]
    ActionFailed(String),
}

/// Response produced by a controller action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Default for ControllerResponse {
    fn default() -> Self {
        Self {
            status: 200,
            content_type: None,
            body: Vec::new(),
        }
    }
}

/// Minimal request surface handed to a controller.
#[derive(Debug, Clone, Default)]
pub struct ControllerContext {
    pub area: String,
    pub controller: String,
    pub action: String,
    pub params: HashMap<String, String>,
    pub response: ControllerResponse,
}

impl ControllerContext {
    pub fn new(area: impl Into<String>, controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            controller: controller.into(),
            action: action.into(),
            ..Default::default()
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Controller defines the port for request-handling units resolved by area and name.
///
/// Instances are created per request by the controller factory and must never be reused
/// across requests.
pub trait Controller: Any + Send {
    /// Process the action named in `context`, writing into `context.response`.
    fn process(&mut self, context: &mut ControllerContext) -> Result<(), ControllerError>;

    /// Free the resources held by this instance. Called exactly once, on release.
    fn dispose(&mut self) {}

    /// Capability query for logger injection.
    ///
    /// Controllers built on [`ControllerBase`] return it here; third-party implementations
    /// keep the default and are activated without a logger.
    fn as_loggable(&mut self) -> Option<&mut dyn LoggableController> {
        None
    }
}

/// Capability of controllers that accept a logger scoped to their concrete type.
pub trait LoggableController {
    fn set_logger(&mut self, logger: LoggerRef);
    fn logger(&self) -> &LoggerRef;
}

/// The framework's built-in controller base.
///
/// Embed it in a controller and return it from [`Controller::as_loggable`] to receive a
/// logger at activation time.
pub struct ControllerBase {
    logger: LoggerRef,
}

impl Default for ControllerBase {
    fn default() -> Self {
        Self {
            logger: crate::adapters::logging::NullLogger::shared(),
        }
    }
}

impl fmt::Debug for ControllerBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerBase")
            .field("logger", &self.logger.scope())
            .finish()
    }
}

impl LoggableController for ControllerBase {
    fn set_logger(&mut self, logger: LoggerRef) {
        self.logger = logger;
    }

    fn logger(&self) -> &LoggerRef {
        &self.logger
    }
}

fn construct_default<T>() -> Result<Box<dyn Controller>, BoxError>
where
    T: Controller + Default,
{
    Ok(Box::new(T::default()))
}

/// Handle for a concrete controller type and its no-argument construction path.
///
/// Two handles are equal when they name the same concrete type.
#[derive(Clone)]
pub struct ControllerType {
    type_id: TypeId,
    type_name: &'static str,
    constructor: Option<Constructor>,
}

impl ControllerType {
    /// Handle constructed through the type's [`Default`] implementation.
    pub fn of<T>() -> Self
    where
        T: Controller + Default,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            constructor: Some(Arc::new(construct_default::<T>)),
        }
    }

    /// Handle constructed through a fallible constructor.
    pub fn with_constructor<T, E, F>(constructor: F) -> Self
    where
        T: Controller,
        E: Into<BoxError>,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            constructor: Some(Arc::new(move || {
                constructor()
                    .map(|controller| Box::new(controller) as Box<dyn Controller>)
                    .map_err(|e| -> BoxError { e.into() })
            })),
        }
    }

    /// Handle for a type without a no-argument construction path.
    pub fn declared<T>() -> Self
    where
        T: Controller,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            constructor: None,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Full path of the concrete type, e.g. `my_app::controllers::HomeController`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Controller>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}

impl PartialEq for ControllerType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ControllerType {}

impl fmt::Debug for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerType")
            .field("type_name", &self.type_name)
            .field("has_constructor", &self.has_constructor())
            .finish()
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A registration in the controller tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerDescriptor {
    pub area: String,
    pub name: String,
    pub controller_type: ControllerType,
}

/// A live controller owned by the caller between creation and release.
pub struct ControllerInstance {
    controller: Box<dyn Controller>,
    controller_type: ControllerType,
}

impl ControllerInstance {
    pub(crate) fn new(controller: Box<dyn Controller>, controller_type: ControllerType) -> Self {
        Self {
            controller,
            controller_type,
        }
    }

    /// The handle this instance was activated from.
    pub fn controller_type(&self) -> &ControllerType {
        &self.controller_type
    }

    pub fn type_name(&self) -> &'static str {
        self.controller_type.type_name()
    }

    pub fn is<T: Controller>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    pub fn downcast_ref<T: Controller>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.controller;
        any.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Controller>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = &mut *self.controller;
        any.downcast_mut::<T>()
    }

    pub fn process(&mut self, context: &mut ControllerContext) -> Result<(), ControllerError> {
        self.controller.process(context)
    }

    /// The logger attached at activation, if the controller exposes the loggable capability.
    pub fn logger(&mut self) -> Option<LoggerRef> {
        self.controller
            .as_loggable()
            .map(|loggable| loggable.logger().clone())
    }

    pub(crate) fn dispose(mut self) {
        self.controller.dispose();
    }
}

impl fmt::Debug for ControllerInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerInstance")
            .field("type_name", &self.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Plain;

    impl Controller for Plain {
        fn process(&mut self, _context: &mut ControllerContext) -> Result<(), ControllerError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Other;

    impl Controller for Other {
        fn process(&mut self, _context: &mut ControllerContext) -> Result<(), ControllerError> {
            Ok(())
        }
    }

    #[test]
    fn test_handles_compare_by_concrete_type() {
        assert_eq!(ControllerType::of::<Plain>(), ControllerType::declared::<Plain>());
        assert_ne!(ControllerType::of::<Plain>(), ControllerType::of::<Other>());
        assert!(ControllerType::of::<Plain>().is::<Plain>());
    }

    #[test]
    fn test_type_name_is_the_full_path() {
        let handle = ControllerType::of::<Plain>();
        assert!(handle.type_name().ends_with("::Plain"));
        assert_eq!(handle.to_string(), handle.type_name());
    }

    #[test]
    fn test_declared_handle_has_no_constructor() {
        assert!(!ControllerType::declared::<Plain>().has_constructor());
        assert!(ControllerType::of::<Plain>().has_constructor());
    }

    #[test]
    fn test_instance_downcast() {
        let instance = ControllerInstance::new(Box::new(Plain), ControllerType::of::<Plain>());
        assert!(instance.is::<Plain>());
        assert!(instance.downcast_ref::<Other>().is_none());
    }

    #[test]
    fn test_context_params() {
        let context = ControllerContext::new("", "home", "index").with_param("id", "7");
        assert_eq!(context.param("id"), Some("7"));
        assert_eq!(context.param("missing"), None);
        assert_eq!(context.response.status, 200);
    }
}
