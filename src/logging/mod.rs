// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Logging infrastructure using the `tracing` ecosystem.
//!
//! ```text
//! init_logging(&LogConfig)
//!        |
//!        v
//!    registry
//!    |       |
//!    v       v
//! Console   File (optional)
//! EnvFilter EnvFilter
//! ANSI      non_blocking
//!        |
//!        v
//!    LogGuard (flush on drop)
//!
//! LogScope::App   "warn,devex_rs=<level>,devex=<level>"
//! LogScope::All   "<level>"  (every crate, reqwest/hyper included)
//! ```

use anyhow::Context;
use bon::Builder;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::error::Result;

/// Targets considered "the application" by [`LogScope::App`].
const APP_TARGETS: [&str; 2] = ["devex_rs", "devex"];

/// Log level for the application scope.
///
/// - Info, the default
/// - Debug (`-v`, `--debug`)
/// - Trace (`-x`, `--trace`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::INFO
    }
}

impl LogLevel {
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);

    /// Convert to `EnvFilter` directive string.
    #[must_use]
    pub const fn to_filter_string(self) -> &'static str {
        match self.0 {
            0..=3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}

/// Which crates the configured level applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogScope {
    /// This application only; dependencies stay at WARN.
    #[default]
    App,
    /// Every crate, including the HTTP stack.
    All,
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_level), default = LogLevel::INFO)]
    level: LogLevel,
    #[builder(setters(name = with_scope), default)]
    scope: LogScope,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
    #[builder(setters(name = with_show_target), default = false)]
    show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LogConfig {
    /// Maps the command line verbosity flags onto a config.
    ///
    /// The most verbose flag wins: `--trace` over `--debug` over `-x` over `-v`.
    #[must_use]
    pub fn from_flags(verbose: bool, very_verbose: bool, debug: bool, trace: bool) -> Self {
        let (level, scope) = if trace {
            (LogLevel::TRACE, LogScope::All)
        } else if debug {
            (LogLevel::DEBUG, LogScope::All)
        } else if very_verbose {
            (LogLevel::TRACE, LogScope::App)
        } else if verbose {
            (LogLevel::DEBUG, LogScope::App)
        } else {
            (LogLevel::INFO, LogScope::App)
        };
        Self::builder().with_level(level).with_scope(scope).build()
    }

    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    #[must_use]
    pub const fn scope(&self) -> LogScope {
        self.scope
    }

    /// Get the log file path if set.
    #[must_use]
    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    #[must_use]
    pub const fn show_target(&self) -> bool {
        self.show_target
    }

    /// Returns a copy writing to `log_file` as well.
    #[must_use]
    pub fn with_log_file(mut self, log_file: Option<String>) -> Self {
        self.log_file = log_file;
        self
    }

    /// `EnvFilter` directives for this config.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let level = self.level.to_filter_string();
        match self.scope {
            LogScope::All => level.to_string(),
            LogScope::App => {
                let mut directives = String::from("warn");
                for target in APP_TARGETS {
                    directives.push_str(&format!(",{target}={level}"));
                }
                directives
            }
        }
    }
}

/// RAII guard that keeps the logging system alive.
/// When dropped, flushes all pending log writes.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the logging system with the given configuration.
///
/// Returns a guard that must be kept alive for the duration of the program.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
///
/// # Example
///
/// ```no_run
/// use devex_rs::logging::{init_logging, LogConfig};
///
/// let config = LogConfig::from_flags(true, false, false, false)
///     .with_log_file(Some("devex.log".to_string()));
///
/// let _guard = init_logging(&config).expect("Failed to initialize logging");
/// tracing::info!("Logging initialized");
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let directives = config.filter_directives();

    let console_layer = fmt::layer()
        .with_target(config.show_target())
        .with_level(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(&directives));

    let (file_layer, file_guard) = if let Some(log_path) = config.log_file() {
        let log_path = Path::new(log_path);

        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }

        let file = std::fs::File::create(log_path)
            .with_context(|| format!("failed to create log file {}", log_path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        let layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_level(true)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(EnvFilter::new(&directives));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}
