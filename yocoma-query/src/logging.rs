//! Logging for the query layer.
//!
//! The services log every entry point at `debug` with the criteria they
//! received. The predicate builder and the parameter parser log each term and
//! each decoded key at `trace`. Nothing is printed unless a subscriber is
//! installed, either by the application or by [`init`] with the
//! `tracing-subscriber` feature.
//!
//! [`LogSettings`] is read from the same kind of [`EnvSource`] as the query
//! configuration:
//!
//! | Variable            | Values                                   | Default |
//! |---------------------|------------------------------------------|---------|
//! | `YOCOMA_DEBUG`      | `true`, `1`, `yes`                       | off     |
//! | `YOCOMA_LOG_LEVEL`  | `trace`, `debug`, `info`, `warn`, `error`| `warn`  |
//! | `YOCOMA_LOG_FORMAT` | `json`, `pretty`, `compact`              | `json`  |
//!
//! ```rust
//! use yocoma_query::config::MapEnvSource;
//! use yocoma_query::logging::{LogFormat, LogSettings};
//!
//! let env = MapEnvSource::new().set("YOCOMA_DEBUG", "yes").set("YOCOMA_LOG_FORMAT", "compact");
//! let settings = LogSettings::from_source(&env);
//!
//! assert_eq!(settings.level, "debug");
//! assert_eq!(settings.format, LogFormat::Compact);
//! assert_eq!(settings.directive(), "yocoma=debug,yocoma_query=debug");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{EnvSource, StdEnvSource};

/// Crates whose events the installed subscriber lets through.
pub const LOG_TARGETS: &[&str] = &["yocoma", "yocoma_query"];

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

static INIT: Once = Once::new();
static DEBUG: AtomicBool = AtomicBool::new(false);

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    Compact,
}

impl LogFormat {
    /// Name as accepted by `YOCOMA_LOG_FORMAT`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Debug mode; also enables [`yocoma_debug!`](crate::yocoma_debug) and
    /// [`yocoma_trace!`](crate::yocoma_trace).
    pub debug: bool,
    /// Maximum level for [`LOG_TARGETS`].
    pub level: &'static str,
    /// Output format.
    pub format: LogFormat,
    /// Whether a level was asked for explicitly.
    pub explicit: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            debug: false,
            level: "warn",
            format: LogFormat::default(),
            explicit: false,
        }
    }
}

impl LogSettings {
    /// Settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_source(&StdEnvSource)
    }

    /// Settings from an environment source. Unknown values fall back to the
    /// defaults rather than failing startup.
    pub fn from_source(env: &impl EnvSource) -> Self {
        let debug = debug_flag(env);
        let requested = env.get("YOCOMA_LOG_LEVEL").and_then(|v| level_name(&v));
        let format = env
            .get("YOCOMA_LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            debug,
            level: requested.unwrap_or(if debug { "debug" } else { "warn" }),
            format,
            explicit: requested.is_some(),
        }
    }

    /// Same settings at another level.
    pub fn with_level(mut self, level: &str) -> Self {
        if let Some(level) = level_name(level) {
            self.level = level;
            self.explicit = true;
        }
        self
    }

    /// Same settings in debug mode.
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        if !self.explicit {
            self.level = "debug";
        }
        self
    }

    /// `EnvFilter` directive restricting output to [`LOG_TARGETS`].
    pub fn directive(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn wants_subscriber(&self) -> bool {
        self.debug || self.explicit
    }
}

fn debug_flag(env: &impl EnvSource) -> bool {
    env.get("YOCOMA_DEBUG")
        .is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
}

fn level_name(raw: &str) -> Option<&'static str> {
    let raw = raw.trim().to_lowercase();
    LEVELS.iter().copied().find(|level| *level == raw)
}

/// `true` in debug mode, set through `YOCOMA_DEBUG` or [`init_debug`].
#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed) || debug_flag(&StdEnvSource)
}

/// Install logging from the process environment. Subsequent calls are no-ops.
pub fn init() {
    init_with(LogSettings::from_env());
}

/// Install logging at `level`, keeping the environment's other settings.
pub fn init_with_level(level: &str) {
    init_with(LogSettings::from_env().with_level(level));
}

/// Install logging in debug mode.
pub fn init_debug() {
    init_with(LogSettings::from_env().with_debug());
}

/// Install logging with explicit settings. Only the first call has an effect.
///
/// Without the `tracing-subscriber` feature no subscriber is installed and
/// the application is expected to bring its own.
pub fn init_with(settings: LogSettings) {
    INIT.call_once(|| {
        if settings.debug {
            DEBUG.store(true, Ordering::Relaxed);
        }
        if !settings.wants_subscriber() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(settings.directive()).unwrap_or_else(|_| EnvFilter::new("warn"));
            let registry = tracing_subscriber::registry().with(filter);
            match settings.format {
                LogFormat::Json => registry.with(fmt::layer().json()).init(),
                LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
                LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
            }

            tracing::info!(level = settings.level, format = %settings.format, "query logging initialized");
        }
    });
}

/// Debug log that is only emitted in debug mode.
#[macro_export]
macro_rules! yocoma_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Trace log that is only emitted in debug mode.
#[macro_export]
macro_rules! yocoma_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapEnvSource;

    #[test]
    fn test_defaults_without_variables() {
        let settings = LogSettings::from_source(&MapEnvSource::new());
        assert_eq!(settings, LogSettings::default());
        assert!(!settings.wants_subscriber());
        assert_eq!(settings.directive(), "yocoma=warn,yocoma_query=warn");
    }

    #[test]
    fn test_explicit_level_wins_over_debug() {
        let env = MapEnvSource::new()
            .set("YOCOMA_DEBUG", "1")
            .set("YOCOMA_LOG_LEVEL", "TRACE");
        let settings = LogSettings::from_source(&env);
        assert!(settings.debug);
        assert_eq!(settings.level, "trace");
        assert_eq!(settings.clone().with_debug().level, "trace");
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let env = MapEnvSource::new()
            .set("YOCOMA_LOG_LEVEL", "loud")
            .set("YOCOMA_LOG_FORMAT", "xml");
        let settings = LogSettings::from_source(&env);
        assert_eq!(settings.level, "warn");
        assert!(!settings.explicit);
        assert_eq!(settings.format, LogFormat::Json);
        assert_eq!(settings.with_level("bogus").level, "warn");
    }

    #[test]
    fn test_with_level() {
        let settings = LogSettings::default().with_level("info");
        assert!(settings.wants_subscriber());
        assert_eq!(settings.directive(), "yocoma=info,yocoma_query=info");
    }

    #[test]
    fn test_format_names() {
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}
