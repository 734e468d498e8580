//! Logging and tracing utilities
//!
//! Logging is a side channel: nothing in the provider or tool-loop code
//! depends on it being configured. Binaries call [`setup_logging`] once at
//! startup; library code emits `tracing` events and, where a caller wants a
//! name attached to its diagnostics, uses a [`Logger`] from [`get_logger`].

use crate::{Result, UtilsError};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Accepted log level names, sorted
pub const VALID_LOG_LEVELS: [&str; 5] = ["CRITICAL", "DEBUG", "ERROR", "INFO", "WARNING"];

/// Targets owned by this workspace; framework level changes apply to these
const FRAMEWORK_TARGETS: [&str; 4] = ["agent_llm", "agent_tools", "agent_utils", "agent_cli"];

/// Log level as accepted from configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Verbose diagnostics
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Recoverable problems
    Warning,
    /// Failures
    Error,
    /// Failures that stop the process; `tracing` has no level above error
    Critical,
}

impl LogLevel {
    /// Upper-case name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Corresponding `tracing` filter
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UtilsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(UtilsError::InvalidLogLevel {
                level: s.to_string(),
                valid: VALID_LOG_LEVELS.join(", "),
            }),
        }
    }
}

/// Console stream that receives log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error, for binaries whose stdout carries results
    Stderr,
}

impl ConsoleStream {
    /// Whether the stream is attached to a terminal (colours are only used then)
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal(),
            Self::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Where and how log events are written
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Global level
    pub level: LogLevel,

    /// Console stream for log lines
    pub console: ConsoleStream,

    /// Per-target directives in `RUST_LOG` syntax, layered under `level`
    ///
    /// A bare level in here never overrides `level`; target directives
    /// (e.g. `hyper=warn`) are kept. Defaults to the `RUST_LOG` variable.
    pub env_directives: Option<String>,

    /// Optional file destination, written in addition to the console
    pub log_file: Option<PathBuf>,

    /// Prefix each line with a timestamp
    pub include_timestamp: bool,

    /// Emit newline-delimited JSON instead of human-readable lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: ConsoleStream::default(),
            env_directives: std::env::var(EnvFilter::DEFAULT_ENV).ok(),
            log_file: None,
            include_timestamp: true,
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Create a configuration for the given level with default output
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Also write events to a file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Write console log lines to stderr
    pub fn log_to_stderr(mut self) -> Self {
        self.console = ConsoleStream::Stderr;
        self
    }

    /// Replace the `RUST_LOG` directives
    pub fn with_directives(mut self, directives: impl Into<String>) -> Self {
        self.env_directives = Some(directives.into());
        self
    }

    /// Drop timestamps from the output
    pub fn without_timestamp(mut self) -> Self {
        self.include_timestamp = false;
        self
    }

    /// Switch to JSON output
    pub fn json(mut self) -> Self {
        self.json = true;
        self
    }
}

/// Live control over an installed subscriber's filter
#[derive(Debug, Clone)]
pub struct LoggingHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    level: LogLevel,
    env_directives: Option<String>,
}

impl LoggingHandle {
    /// Global level the subscriber was built with
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Set the level for this workspace's crates, leaving other targets alone
    pub fn set_framework_log_level(&self, level: &str) -> Result<()> {
        let level: LogLevel = level.parse()?;
        self.reload(Some(level.level_filter()))
    }

    /// Silence this workspace's crates entirely
    pub fn disable_framework_logging(&self) -> Result<()> {
        self.reload(Some(LevelFilter::OFF))
    }

    fn reload(&self, framework: Option<LevelFilter>) -> Result<()> {
        self.filter
            .reload(build_filter(
                self.env_directives.as_deref(),
                self.level.level_filter(),
                framework,
            ))
            .map_err(|e| UtilsError::Reload(e.to_string()))
    }
}

/// Build a subscriber for `config` without installing it
///
/// Tests scope the result with `tracing::subscriber::with_default`;
/// binaries should use [`setup_logging`].
pub fn build_subscriber(
    config: &LoggingConfig,
) -> Result<(impl Subscriber + Send + Sync + 'static, LoggingHandle)> {
    let (filter, filter_handle) = reload::Layer::new(build_filter(
        config.env_directives.as_deref(),
        config.level.level_filter(),
        None,
    ));

    let ansi = config.console.is_terminal();
    let console_layer = match config.console {
        ConsoleStream::Stdout => fmt_layer(std::io::stdout, config, ansi),
        ConsoleStream::Stderr => fmt_layer(std::io::stderr, config, ansi),
    };

    let file_layer = match &config.log_file {
        Some(path) => Some(fmt_layer(open_log_file(path)?, config, false)),
        None => None,
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer);

    Ok((
        subscriber,
        LoggingHandle {
            filter: filter_handle,
            level: config.level,
            env_directives: config.env_directives.clone(),
        },
    ))
}

/// Configure global log routing: the console plus an optional file
///
/// Fails with [`UtilsError::AlreadyInitialized`] if a global subscriber is
/// already installed.
pub fn setup_logging(config: &LoggingConfig) -> Result<LoggingHandle> {
    let (subscriber, handle) = build_subscriber(config)?;
    subscriber
        .try_init()
        .map_err(|e| UtilsError::AlreadyInitialized(e.to_string()))?;
    Ok(handle)
}

/// Named logger handle
///
/// Every event carries a `logger` field with the handle's name. Handles
/// with the same name compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Logger {
    name: Arc<str>,
}

impl Logger {
    /// Name this logger was created with
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emit a debug event
    pub fn debug(&self, message: impl fmt::Display) {
        tracing::debug!(logger = %self.name, "{message}");
    }

    /// Emit an info event
    pub fn info(&self, message: impl fmt::Display) {
        tracing::info!(logger = %self.name, "{message}");
    }

    /// Emit a warning event
    pub fn warn(&self, message: impl fmt::Display) {
        tracing::warn!(logger = %self.name, "{message}");
    }

    /// Emit an error event
    pub fn error(&self, message: impl fmt::Display) {
        tracing::error!(logger = %self.name, "{message}");
    }
}

/// Obtain a named logger handle
pub fn get_logger(name: impl Into<String>) -> Logger {
    Logger {
        name: Arc::from(name.into()),
    }
}

/// Env directives first, then the global level, then framework targets
///
/// `add_directive` replaces a directive with the same target, so the global
/// level wins over a bare level from the environment and framework levels
/// win over environment directives for the workspace's own crates.
fn build_filter(
    env_directives: Option<&str>,
    global: LevelFilter,
    framework: Option<LevelFilter>,
) -> EnvFilter {
    let mut filter = EnvFilter::builder()
        .parse_lossy(env_directives.unwrap_or_default())
        .add_directive(global.into());

    if let Some(level) = framework {
        for target in FRAMEWORK_TARGETS {
            if let Ok(directive) = format!("{target}={level}").parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

fn fmt_layer<S, W>(writer: W, config: &LoggingConfig, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);

    match (config.json, config.include_timestamp) {
        (true, true) => layer.json().boxed(),
        (true, false) => layer.json().without_time().boxed(),
        (false, true) => layer.boxed(),
        (false, false) => layer.without_time().boxed(),
    }
}

fn open_log_file(path: &Path) -> Result<Mutex<File>> {
    let to_error = |source| UtilsError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    Ok(Mutex::new(file))
}
