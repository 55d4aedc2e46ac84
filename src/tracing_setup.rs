use eyre::{Result, WrapErr, eyre};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Initialize structured logging from configuration.
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
pub fn init_tracing(settings: &LoggingSettings) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .wrap_err_with(|| format!("Invalid log level: {}", settings.level))?,
    };

    build_subscriber(settings, env_filter)
        .try_init()
        .map_err(|e| eyre!("Failed to install tracing subscriber: {e}"))?;

    tracing::debug!(
        "Switchyard logging initialized (level: {}, json: {})",
        settings.level,
        settings.json
    );
    Ok(())
}

/// Subscriber for `settings` filtered by `env_filter`, JSON or compact output
pub fn build_subscriber(
    settings: &LoggingSettings,
    env_filter: EnvFilter,
) -> Box<dyn Subscriber + Send + Sync> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    if settings.json {
        Box::new(
            Registry::default().with(env_filter).with(
                fmt_layer
                    .json()
                    .with_current_span(settings.include_spans)
                    .with_span_list(settings.include_spans),
            ),
        )
    } else {
        Box::new(Registry::default().with(env_filter).with(fmt_layer.compact()))
    }
}

/// Span covering the handling of one controller, from creation to release
pub fn create_controller_span(area: &str, name: &str, action: &str) -> tracing::Span {
    tracing::info_span!(
        "controller",
        controller.area = area,
        controller.name = name,
        controller.action = action,
        response.status = tracing::field::Empty,
    )
}
