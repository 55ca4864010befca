//! Date-rotated failure log.
//!
//! The log owns its own [`Dispatch`]; nothing is installed as the global
//! subscriber, so several logs (or none) can coexist in one process. Entries
//! are written by a background worker and flushed by [`ErrorLog::close`] or
//! on drop.

use anyhow::Result;
use configs::ErrorLogConfig;
use tracing::{dispatcher, error, Dispatch, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::errors::ClientError;

pub struct ErrorLog {
    sink: Option<(Dispatch, WorkerGuard)>,
}

impl ErrorLog {
    /// Open `<dir>/<file_prefix>.<YYYY-MM-DD>.log`, rolling over at midnight
    /// and keeping at most `max_files` files.
    pub fn open(cfg: &ErrorLogConfig) -> Result<Self> {
        std::fs::create_dir_all(&cfg.dir)?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&cfg.file_prefix)
            .filename_suffix("log")
            .max_log_files(cfg.max_files)
            .build(&cfg.dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .with_max_level(Level::ERROR)
            .finish();

        Ok(Self { sink: Some((Dispatch::new(subscriber), guard)) })
    }

    /// A log that drops every entry.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Append one entry for `err`.
    pub fn record(&self, err: &ClientError) {
        if let Some((dispatch, _)) = &self.sink {
            dispatcher::with_default(dispatch, || {
                error!(
                    kind = err.kind(),
                    cause = err.cause(),
                    error = %err,
                    "an error occurred"
                );
            });
        }
    }

    /// Flush pending entries and stop the writer.
    pub fn close(self) {
        drop(self);
    }
}
