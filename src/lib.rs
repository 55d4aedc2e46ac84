//! Switchyard - controller resolution and activation for request-handling frameworks.
//!
//! Given an incoming request's area and controller name, Switchyard locates the registered
//! controller type, instantiates it, wires cross-cutting services (a logger scoped to the
//! controller's concrete type), and later releases it deterministically. The request
//! dispatcher owns each instance between creation and release; nothing is pooled or cached.
//!
//! # Quick Example
//! ```
//! use std::sync::Arc;
//!
//! use switchyard::{
//!     Controller, ControllerContext, ControllerError, ControllerFactory, ControllerTree,
//!     ControllerType, DefaultControllerTree,
//! };
//!
//! #[derive(Default)]
//! struct HomeController;
//!
//! impl Controller for HomeController {
//!     fn process(&mut self, context: &mut ControllerContext) -> Result<(), ControllerError> {
//!         context.response.body = b"welcome".to_vec();
//!         Ok(())
//!     }
//! }
//!
//! let tree = Arc::new(DefaultControllerTree::default());
//! tree.add_controller("", "home", ControllerType::of::<HomeController>())?;
//! let factory = ControllerFactory::with_tree(tree);
//!
//! let mut controller = factory.create_controller(None, "home")?;
//! let mut context = ControllerContext::new("", "home", "index");
//! controller.process(&mut context)?;
//! factory.release(controller);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//! The crate separates **ports** (traits: [`ControllerTree`], [`LoggerFactory`],
//! [`Controller`]) from **adapters** (implementations: [`DefaultControllerTree`],
//! [`TracingLoggerFactory`]) while keeping resolution and activation inside `core`.
//!
//! # Error Handling
//! Factory operations return [`FactoryResult`]. A lookup miss is
//! [`FactoryError::ControllerNotFound`]; a construction failure is
//! [`FactoryError::ActivationFailed`] carrying the original cause. Configuration and CLI
//! code use `eyre::Result` with context attached.
//!
//! # Concurrency
//! The factory and the default tree are `Send + Sync`. Bindings and the tree's contents are
//! immutable snapshots behind `arc_swap`, so lookups never lock and registering controllers
//! while requests are served is safe.
pub mod config;
pub mod controllers;
pub mod ports;
pub mod tracing_setup;

pub mod adapters;
pub mod core;

pub use crate::{
    adapters::{DefaultControllerTree, MemoryLoggerFactory, NullLogger, TracingLoggerFactory},
    core::{
        ActivationError, ControllerActivator, ControllerFactory, FactoryError, FactoryResult,
        ServiceBinder,
    },
    ports::{
        Controller, ControllerBase, ControllerContext, ControllerDescriptor, ControllerError,
        ControllerInstance, ControllerResponse, ControllerTree, ControllerType,
        LoggableController, Logger, LoggerFactory, LoggerRef, TreeError,
    },
};
