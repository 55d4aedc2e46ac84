//! Logger adapters: `tracing`-backed, no-op, and in-memory capture.
use std::{
    fmt,
    sync::{Arc, Mutex},
};

use once_cell::sync::Lazy;
use tracing::Level;

use crate::ports::logging::{Logger, LoggerFactory, LoggerRef};

/// Target of every event emitted through [`TracingLogger`]
pub const LOG_TARGET: &str = "switchyard";

static NULL_LOGGER: Lazy<LoggerRef> = Lazy::new(|| Arc::new(NullLogger));

macro_rules! emit {
    ($level:expr, $scope:expr, $message:expr, $cause:expr) => {
        match ($level, $cause) {
            (Level::ERROR, Some(cause)) => {
                tracing::error!(target: LOG_TARGET, logger = $scope, error = %cause, "{}", $message)
            }
            (Level::ERROR, None) => tracing::error!(target: LOG_TARGET, logger = $scope, "{}", $message),
            (Level::WARN, Some(cause)) => {
                tracing::warn!(target: LOG_TARGET, logger = $scope, error = %cause, "{}", $message)
            }
            (Level::WARN, None) => tracing::warn!(target: LOG_TARGET, logger = $scope, "{}", $message),
            (Level::INFO, _) => tracing::info!(target: LOG_TARGET, logger = $scope, "{}", $message),
            (Level::DEBUG, _) => tracing::debug!(target: LOG_TARGET, logger = $scope, "{}", $message),
            (_, _) => tracing::trace!(target: LOG_TARGET, logger = $scope, "{}", $message),
        }
    };
}

/// Logger emitting `tracing` events tagged with the scoped type name.
///
/// Every event uses the [`LOG_TARGET`] target, so filters select switchyard output with
/// directives such as `switchyard=debug`. The concrete type a logger was created for is
/// carried in the `logger` field; activation failures add the cause as an `error` field.
/// [`Logger::is_enabled`] asks the current subscriber about the same target.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    scope: Arc<str>,
}

impl TracingLogger {
    pub fn new(scope: &str) -> Self {
        Self {
            scope: Arc::from(scope),
        }
    }
}

impl Logger for TracingLogger {
    fn scope(&self) -> &str {
        &self.scope
    }

    fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::ERROR => tracing::enabled!(target: LOG_TARGET, Level::ERROR),
            Level::WARN => tracing::enabled!(target: LOG_TARGET, Level::WARN),
            Level::INFO => tracing::enabled!(target: LOG_TARGET, Level::INFO),
            Level::DEBUG => tracing::enabled!(target: LOG_TARGET, Level::DEBUG),
            _ => tracing::enabled!(target: LOG_TARGET, Level::TRACE),
        }
    }

    fn log(
        &self,
        level: Level,
        message: fmt::Arguments<'_>,
        cause: Option<&(dyn std::error::Error + 'static)>,
    ) {
        let scope: &str = &self.scope;
        emit!(level, scope, message, cause);
    }
}

/// Factory for [`TracingLogger`]s
#[derive(Debug, Clone, Default)]
pub struct TracingLoggerFactory;

impl TracingLoggerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl LoggerFactory for TracingLoggerFactory {
    fn create(&self, type_name: &str) -> LoggerRef {
        Arc::new(TracingLogger::new(type_name))
    }
}

/// Logger that discards everything and reports every level as disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl NullLogger {
    /// Process-wide shared instance
    pub fn shared() -> LoggerRef {
        NULL_LOGGER.clone()
    }
}

impl Logger for NullLogger {
    fn scope(&self) -> &str {
        ""
    }

    fn is_enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(
        &self,
        _level: Level,
        _message: fmt::Arguments<'_>,
        _cause: Option<&(dyn std::error::Error + 'static)>,
    ) {
    }
}

/// An event captured by [`MemoryLoggerFactory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub scope: String,
    pub level: Level,
    pub message: String,
    pub cause: Option<String>,
}

/// Logger factory recording events in memory, for diagnostics and tests.
///
/// Events more verbose than the configured threshold are reported as disabled and dropped.
#[derive(Debug, Clone)]
pub struct MemoryLoggerFactory {
    threshold: Level,
    records: Arc<Mutex<Vec<LogRecord>>>,
    scopes: Arc<Mutex<Vec<String>>>,
}

impl MemoryLoggerFactory {
    pub fn new(threshold: Level) -> Self {
        Self {
            threshold,
            records: Arc::default(),
            scopes: Arc::default(),
        }
    }

    /// Snapshot of every recorded event
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn records_at(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    /// Scopes of every logger created so far, in creation order
    pub fn created_scopes(&self) -> Vec<String> {
        self.scopes
            .lock()
            .map(|scopes| scopes.clone())
            .unwrap_or_default()
    }
}

impl LoggerFactory for MemoryLoggerFactory {
    fn create(&self, type_name: &str) -> LoggerRef {
        if let Ok(mut scopes) = self.scopes.lock() {
            scopes.push(type_name.to_string());
        }
        Arc::new(MemoryLogger {
            scope: type_name.to_string(),
            threshold: self.threshold,
            records: Arc::clone(&self.records),
        })
    }
}

#[derive(Debug)]
struct MemoryLogger {
    scope: String,
    threshold: Level,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl Logger for MemoryLogger {
    fn scope(&self) -> &str {
        &self.scope
    }

    fn is_enabled(&self, level: Level) -> bool {
        // Level ordering: ERROR is the smallest, TRACE the largest
        level <= self.threshold
    }

    fn log(
        &self,
        level: Level,
        message: fmt::Arguments<'_>,
        cause: Option<&(dyn std::error::Error + 'static)>,
    ) {
        if !self.is_enabled(level) {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                scope: self.scope.clone(),
                level,
                message: message.to_string(),
                cause: cause.map(ToString::to_string),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_is_disabled() {
        let logger = NullLogger::shared();
        assert!(Arc::ptr_eq(&logger, &NullLogger::shared()));
        assert!(!logger.is_enabled(Level::ERROR));
        assert!(!logger.is_debug_enabled());
        logger.error(format_args!("dropped"));
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn contents(&self) -> String {
            self.0
                .lock()
                .map(|buf| String::from_utf8_lossy(&buf).into_owned())
                .unwrap_or_default()
        }
    }

    impl std::io::Write for CapturedOutput {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            if let Ok(mut buf) = self.0.lock() {
                buf.extend_from_slice(data);
            }
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedOutput {
        type Writer = CapturedOutput;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_filter<F: FnOnce()>(directive: &str, f: F) -> String {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(directive))
            .with_writer(output.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        output.contents()
    }

    #[test]
    fn test_tracing_logger_scope() {
        let logger = TracingLoggerFactory::new().create("app::HomeController");
        assert_eq!(logger.scope(), "app::HomeController");
    }

    #[test]
    fn test_tracing_logger_emits_scope_and_cause() {
        let logger = TracingLoggerFactory::new().create("app::HomeController");
        let cause = std::io::Error::other("disk gone");

        let output = with_filter("switchyard=info", || {
            logger.error_with_cause(format_args!("activation failed"), &cause);
        });

        assert!(output.contains("ERROR"));
        assert!(output.contains(LOG_TARGET));
        assert!(output.contains("activation failed"));
        assert!(output.contains("logger=\"app::HomeController\""));
        assert!(output.contains("error=disk gone"));
    }

    #[test]
    fn test_tracing_logger_debug_follows_target_filter() {
        let logger = TracingLoggerFactory::new().create("app::HomeController");

        let filtered = with_filter("switchyard=info", || {
            assert!(!logger.is_debug_enabled());
            logger.debug(format_args!("hidden detail"));
        });
        assert!(!filtered.contains("hidden detail"));

        let shown = with_filter("switchyard=debug", || {
            assert!(logger.is_debug_enabled());
            logger.debug(format_args!("visible detail"));
        });
        assert!(shown.contains("visible detail"));
    }

    #[test]
    fn test_factory_output_selected_by_crate_target() {
        use crate::{adapters::DefaultControllerTree, core::ControllerFactory};

        let factory = ControllerFactory::default();
        factory.bind_dependencies(
            Arc::new(DefaultControllerTree::default()),
            Some(Arc::new(TracingLoggerFactory::new())),
        );

        let output = with_filter("switchyard=debug,off", || {
            assert!(factory.create_controller(None, "missing").is_err());
        });

        let scope = std::any::type_name::<ControllerFactory>();
        assert!(output.contains("Creating controller instance. Area '' Name 'missing'"));
        assert!(output.contains("Controller not found. Area '' Name 'missing'"));
        assert!(output.contains(&format!("logger=\"{scope}\"")));
    }

    #[test]
    fn test_tracing_logger_ignores_unrelated_targets() {
        let logger = TracingLoggerFactory::new().create("app::HomeController");

        let output = with_filter("other_crate=trace,off", || {
            assert!(!logger.is_enabled(Level::ERROR));
            logger.error(format_args!("not for other_crate"));
        });

        assert!(output.is_empty());
    }

    #[test]
    fn test_memory_logger_respects_threshold() {
        let factory = MemoryLoggerFactory::new(Level::INFO);
        let logger = factory.create("scope");

        assert!(logger.is_enabled(Level::WARN));
        assert!(!logger.is_debug_enabled());

        logger.debug(format_args!("hidden"));
        logger.warn(format_args!("shown {}", 1));

        let records = factory.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "shown 1");
        assert_eq!(records[0].level, Level::WARN);
        assert_eq!(records[0].scope, "scope");
    }

    #[test]
    fn test_memory_logger_records_cause() {
        let factory = MemoryLoggerFactory::new(Level::TRACE);
        let logger = factory.create("scope");
        let cause = std::io::Error::other("disk gone");

        logger.error_with_cause(format_args!("failed"), &cause);

        let errors = factory.records_at(Level::ERROR);
        assert_eq!(errors[0].cause.as_deref(), Some("disk gone"));
        assert_eq!(factory.created_scopes(), vec!["scope".to_string()]);
    }

    #[test]
    fn test_create_for_uses_type_name() {
        let factory = MemoryLoggerFactory::new(Level::TRACE);
        let logger = factory.create_for::<TracingLogger>();
        assert_eq!(logger.scope(), std::any::type_name::<TracingLogger>());
    }
}
