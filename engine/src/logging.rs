//! Structured Logging
//!
//! The engine only emits `tracing` events (`debug!` for construction and
//! per-pass summaries, `trace!` for storage growth). Embedding applications
//! and tests can call [`init_tracing`] to get a formatted subscriber;
//! the library never installs one by itself.

use std::sync::Once;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Default filter level when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a compact fmt subscriber at the default level (idempotent).
pub fn init_tracing_default() {
    init_tracing(LogLevel::default());
}

/// Install a compact fmt subscriber. `RUST_LOG` wins over `level` when set.
/// Only the first call has an effect, and an already-installed global
/// subscriber is left alone.
pub fn init_tracing(level: LogLevel) {
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .compact();

        let _ = subscriber.try_init();
    });
}
