use std::sync::OnceLock;

use derive_more::Display;

/// Severity, ordered so a sink can filter with `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer and unit a line comes from, e.g. `APP:Orchestrator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub metadata: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
            metadata: None,
        }
    }

    /// Attach `key=value` style context rendered after the message.
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// `[clock] LEVEL LAYER:unit | message[ | metadata]`
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "[{}] {} {} | {}",
            time_provider().format_timestamp(self.timestamp),
            self.level,
            self.component,
            self.message
        );
        if let Some(metadata) = &self.metadata {
            line.push_str(" | ");
            line.push_str(metadata);
        }
        line
    }
}

/// Wall-clock source, milliseconds since the Unix epoch.
pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;

    /// Local time offset east of UTC, in minutes, at `timestamp`.
    fn utc_offset_minutes(&self, _timestamp: u64) -> i32 {
        0
    }
}

/// Destination for log entries. Filtering is the sink's business.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }
}

static LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = LOGGER.set(logger);
}

/// Install the clock used to stamp log entries. Later calls are ignored.
pub fn init_time_provider(provider: Box<dyn TimeProvider>) {
    let _ = TIME_PROVIDER.set(provider);
}

/// Installed logger, or a sink that drops everything.
pub fn logger() -> &'static dyn Logger {
    LOGGER.get().map_or(&Discard as &dyn Logger, |logger| logger.as_ref())
}

/// Installed clock, or a sequence counter so ordering survives in tests.
pub fn time_provider() -> &'static dyn TimeProvider {
    TIME_PROVIDER
        .get()
        .map_or(&Sequence as &dyn TimeProvider, |provider| provider.as_ref())
}

struct Discard;

impl Logger for Discard {
    fn log(&self, _entry: LogEntry) {}
}

struct Sequence;

impl TimeProvider for Sequence {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{timestamp:06}")
    }
}

// Debug and info lines compile away in release builds.

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::logger().debug($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::logger().info($component, &format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::logger().warn($component, &format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::logger().error($component, &format!($($arg)*));
    };
}
