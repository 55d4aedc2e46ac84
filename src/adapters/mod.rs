pub mod controller_tree;
pub mod logging;

/// Re-export commonly used types from adapters
pub use controller_tree::DefaultControllerTree;
pub use logging::{
    LOG_TARGET, LogRecord, MemoryLoggerFactory, NullLogger, TracingLogger, TracingLoggerFactory,
};
