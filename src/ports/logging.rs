use std::{fmt, sync::Arc};

use tracing::Level;

/// Shared logger handle.
pub type LoggerRef = Arc<dyn Logger>;

/// Logger defines the port for a logger scoped to a single type
pub trait Logger: Send + Sync + 'static {
    /// Name of the type this logger is scoped to
    fn scope(&self) -> &str;

    /// Whether events at `level` would be recorded.
    ///
    /// Callers check this before formatting expensive messages.
    fn is_enabled(&self, level: Level) -> bool;

    /// Record an event, optionally carrying the error that caused it
    fn log(
        &self,
        level: Level,
        message: fmt::Arguments<'_>,
        cause: Option<&(dyn std::error::Error + 'static)>,
    );

    fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::DEBUG)
    }

    fn debug(&self, message: fmt::Arguments<'_>) {
        self.log(Level::DEBUG, message, None);
    }

    fn warn(&self, message: fmt::Arguments<'_>) {
        self.log(Level::WARN, message, None);
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        self.log(Level::ERROR, message, None);
    }

    fn error_with_cause(
        &self,
        message: fmt::Arguments<'_>,
        cause: &(dyn std::error::Error + 'static),
    ) {
        self.log(Level::ERROR, message, Some(cause));
    }
}

/// LoggerFactory defines the port for creating loggers scoped to a type name
pub trait LoggerFactory: Send + Sync + 'static {
    /// Create a logger scoped to the type named `type_name`
    fn create(&self, type_name: &str) -> LoggerRef;

    /// Create a logger scoped to `T`
    fn create_for<T: ?Sized>(&self) -> LoggerRef
    where
        Self: Sized,
    {
        self.create(std::any::type_name::<T>())
    }
}
