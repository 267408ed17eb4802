//! Tracing setup: console diagnostics plus the append-only session log.
//!
//! The session log file records one line per event in the fixed format
//! `[LEVEL] YYYY-MM-DD HH:MM:SS - message`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Formats events as `[LEVEL] YYYY-MM-DD HH:MM:SS - message` lines.
struct SessionLogFormat;

impl<S, N> FormatEvent<S, N> for SessionLogFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let level = if level == tracing::Level::ERROR {
            "ERROR"
        } else if level == tracing::Level::WARN {
            "WARN"
        } else {
            "INFO"
        };
        write!(
            writer,
            "[{level}] {} - ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the console layer and, when the log file can be opened, the
/// session log layer. A log file that cannot be opened downgrades to a
/// console warning; it never stops the command.
pub fn init(log_path: &Path) {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::from_default_env().add_directive("schoolmark=warn".parse().unwrap()),
        );

    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            let session_log = tracing_subscriber::fmt::layer()
                .event_format(SessionLogFormat)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::INFO);
            tracing_subscriber::registry()
                .with(console)
                .with(session_log)
                .init();
        }
        Err(e) => {
            tracing_subscriber::registry().with(console).init();
            eprintln!(
                "Warning: session log {} unavailable: {e}",
                log_path.display()
            );
        }
    }
}
