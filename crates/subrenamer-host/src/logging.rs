//! Subscriber setup for running the plugin outside the media server.
//!
//! Inside the host the process-wide subscriber belongs to the host and the
//! plugin only emits events. Test harnesses and tooling call [`init`] to see
//! those events on stderr and, optionally, in a rolling JSON file.
//! Installing twice is reported as [`LoggingError::AlreadyInitialized`].

use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix of rolled log files, e.g. `subrenamer.2024-01-15`.
pub const LOG_FILE_PREFIX: &str = "subrenamer";

/// Crates whose events pass the level filter; everything else is held at `warn`.
const OWN_CRATES: [&str; 2] = ["subrenamer_core", "subrenamer_host"];

/// How often the JSON log file rolls over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRotation {
    /// One file per hour.
    Hourly,
    /// One file per day.
    #[default]
    Daily,
    /// A single file.
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Hourly => Self::HOURLY,
            LogRotation::Daily => Self::DAILY,
            LogRotation::Never => Self::NEVER,
        }
    }
}

/// Where and how often the JSON log is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Directory the files roll in; created on [`init`].
    pub directory: PathBuf,
    /// Rollover frequency.
    pub rotation: LogRotation,
}

impl LogFile {
    /// Daily rolling file in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            rotation: LogRotation::default(),
        }
    }

    /// Set the rollover frequency.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Most verbose level kept for the plugin's own crates.
    pub level: Level,
    /// Color codes on stderr.
    pub ansi: bool,
    /// Optional JSON file output.
    pub file: Option<LogFile>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            ansi: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Debug builds log at `debug` to stderr only; release builds at `info`
    /// with a daily file under [`default_log_directory`].
    #[must_use]
    pub fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::default().with_level(Level::DEBUG).with_ansi(true)
        } else {
            Self::default().with_file(LogFile::new(default_log_directory()))
        }
    }

    /// Set the level for the plugin's crates.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable color codes.
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Also write JSON lines to `file`.
    #[must_use]
    pub fn with_file(mut self, file: LogFile) -> Self {
        self.file = Some(file);
        self
    }

    /// Drop the JSON file output.
    #[must_use]
    pub fn without_file(mut self) -> Self {
        self.file = None;
        self
    }
}

/// Keeps the background file writer alive. Dropping it flushes the log file.
pub struct LoggingGuard {
    writer: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether a file writer is attached.
    pub const fn writes_file(&self) -> bool {
        self.writer.is_some()
    }
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG`, when set, replaces the stderr filter.
///
/// # Errors
///
/// Returns [`LoggingError::DirectoryCreationFailed`] when the log directory
/// cannot be created and [`LoggingError::AlreadyInitialized`] when a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let stderr_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => own_crates_filter(config.level)?,
    };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_filter(stderr_filter);

    let (file_layer, writer) = match &config.file {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(rolling_appender(file)?);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(own_crates_filter(config.level)?);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard { writer })
}

/// Install the subscriber with [`LoggingConfig::auto`].
///
/// # Errors
///
/// See [`init`].
pub fn init_auto() -> Result<LoggingGuard, LoggingError> {
    init(&LoggingConfig::auto())
}

/// `<local data dir>/subrenamer/logs`, or `./subrenamer/logs` without one.
#[must_use]
pub fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("subrenamer")
        .join("logs")
}

fn rolling_appender(file: &LogFile) -> Result<RollingFileAppender, LoggingError> {
    ensure_directory(&file.directory)?;
    Ok(RollingFileAppender::new(
        file.rotation.into(),
        &file.directory,
        LOG_FILE_PREFIX,
    ))
}

fn ensure_directory(path: &Path) -> Result<(), LoggingError> {
    std::fs::create_dir_all(path).map_err(|e| LoggingError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn own_crates_filter(level: Level) -> Result<EnvFilter, LoggingError> {
    let level = level.as_str().to_ascii_lowercase();
    let directives = OWN_CRATES
        .iter()
        .fold(String::from("warn"), |acc, krate| format!("{acc},{krate}={level}"));
    EnvFilter::try_new(&directives).map_err(|e| LoggingError::InvalidFilter {
        directives,
        reason: e.to_string(),
    })
}

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Failed to create log directory {path}: {reason}")]
    DirectoryCreationFailed {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },

    /// A filter directive did not parse.
    #[error("Invalid log filter '{directives}': {reason}")]
    InvalidFilter {
        /// Rejected directives.
        directives: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn test_default_config_is_stderr_only() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::default()
            .with_level(Level::TRACE)
            .with_ansi(true)
            .with_file(LogFile::new("/tmp/subrenamer-logs").with_rotation(LogRotation::Never));

        assert_eq!(config.level, Level::TRACE);
        assert!(config.ansi);
        assert_eq!(
            config.file,
            Some(LogFile {
                directory: PathBuf::from("/tmp/subrenamer-logs"),
                rotation: LogRotation::Never,
            })
        );
        assert!(config.without_file().file.is_none());
    }

    #[test]
    fn test_log_rotation_conversion() {
        assert_eq!(Rotation::from(LogRotation::Hourly), Rotation::HOURLY);
        assert_eq!(Rotation::from(LogRotation::Daily), Rotation::DAILY);
        assert_eq!(Rotation::from(LogRotation::Never), Rotation::NEVER);
    }

    #[test]
    fn test_own_crates_filter_uses_configured_level() {
        let filter = own_crates_filter(Level::DEBUG).expect("valid filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = own_crates_filter(Level::ERROR).expect("valid filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rolling_appender_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let directory = temp_dir.path().join("nested").join("logs");

        rolling_appender(&LogFile::new(&directory)).expect("appender");
        assert!(directory.is_dir());
    }

    #[test]
    fn test_rolling_appender_rejects_file_as_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").expect("Write should succeed");

        let result = rolling_appender(&LogFile::new(blocker.join("logs")));
        assert!(matches!(
            result,
            Err(LoggingError::DirectoryCreationFailed { .. })
        ));
    }

    #[test]
    fn test_default_log_directory() {
        let dir = default_log_directory();
        assert!(dir.ends_with("subrenamer/logs"));
    }
}
