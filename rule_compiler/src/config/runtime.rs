// RUNTIME PREFERENCES (User Experience)

use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether a string/regex error puts the lexer back into the initial mode.
    /// When false the lexer stays inside the literal's mode after the error.
    pub reset_mode_on_error: bool,

    /// Whether to collect per-category token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to emit a debug event on every lexical mode transition
    pub trace_modes: bool,
}

impl LexicalPreferences {
    /// Values used when no `RULEC_LEXICAL_*` variable overrides them
    pub const fn builtin() -> Self {
        Self {
            reset_mode_on_error: true,
            collect_detailed_metrics: true,
            trace_modes: false,
        }
    }
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        let builtin = Self::builtin();
        Self {
            reset_mode_on_error: env::var(env_vars::LEXICAL_RESET_MODE_ON_ERROR)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.reset_mode_on_error),
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.collect_detailed_metrics),
            trace_modes: env::var(env_vars::LEXICAL_TRACE_MODES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(builtin.trace_modes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub(crate) fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Lexical
    pub const LEXICAL_RESET_MODE_ON_ERROR: &str = "RULEC_LEXICAL_RESET_MODE_ON_ERROR";
    pub const LEXICAL_DETAILED_METRICS: &str = "RULEC_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_TRACE_MODES: &str = "RULEC_LEXICAL_TRACE_MODES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RULEC_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RULEC_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RULEC_LOGGING_MIN_LEVEL";
}
