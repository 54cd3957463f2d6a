//! Logging utilities for the application
//!
//! Logs are written through a `tracing_subscriber` registry with a compact formatter.
//! The filter comes from `RUST_LOG` when set, otherwise from `LOG_LEVEL` (default `info`).
//! Records emitted through the `log` facade (the error constructors use it) are bridged
//! into the same subscriber.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Boxed error returned by the logging setup functions
pub type LoggingError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds the level filter from `RUST_LOG`, then `LOG_LEVEL`, then `info`
fn build_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
		EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
	})
}

/// Setup logging to stdout
pub fn setup_logging() -> Result<(), LoggingError> {
	setup_logging_with_writer(std::io::stdout)
}

/// Setup logging for the application with a custom writer
///
/// Fails when a global subscriber has already been installed.
pub fn setup_logging_with_writer<W>(writer: W) -> Result<(), LoggingError>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(build_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
