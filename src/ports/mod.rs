pub mod controller;
pub mod controller_tree;
pub mod logging;

pub use controller::{
    BoxError, Controller, ControllerBase, ControllerContext, ControllerDescriptor,
    ControllerError, ControllerInstance, ControllerResponse, ControllerType, LoggableController,
};
pub use controller_tree::{ControllerTree, TreeError, TreeResult};
pub use logging::{Logger, LoggerFactory, LoggerRef};
