// RUNTIME PREFERENCES

use super::constants::compile_time::{analysis, parsing};
use crate::logging::{codes, Code, LogLevel, LoggingService, SharedLogger};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading or validating runtime configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    /// Get error code for logging
    pub fn code(&self) -> Code {
        codes::system::CONFIGURATION_ERROR
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of tokens of look-ahead (k)
    pub lookahead_depth: usize,

    /// Fixed-point iteration bound; `None` derives one from the grammar size
    pub max_iterations: Option<usize>,

    /// Whether right-recursive alternatives are reported as warnings
    pub report_right_recursion: bool,
}

impl AnalyzerConfig {
    /// Default configuration with the given look-ahead depth
    pub fn with_lookahead(lookahead_depth: usize) -> Self {
        Self {
            lookahead_depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookahead_depth == 0 || self.lookahead_depth > analysis::MAX_LOOKAHEAD_DEPTH {
            return Err(ConfigError::invalid(
                "analyzer.lookahead_depth",
                format!(
                    "must be between 1 and {}, got {}",
                    analysis::MAX_LOOKAHEAD_DEPTH,
                    self.lookahead_depth
                ),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::invalid(
                "analyzer.max_iterations",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lookahead_depth: env::var(env_vars::ANALYZER_LOOKAHEAD_DEPTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(analysis::DEFAULT_LOOKAHEAD_DEPTH),
            max_iterations: env::var(env_vars::ANALYZER_MAX_ITERATIONS)
                .ok()
                .and_then(|v| v.parse().ok()),
            report_right_recursion: env::var(env_vars::ANALYZER_REPORT_RIGHT_RECURSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting of pattern invocations
    pub max_depth: usize,

    /// Whether the start pattern must be followed by end of input
    pub require_eof: bool,
}

impl ParserConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > parsing::MAX_PARSE_DEPTH {
            return Err(ConfigError::invalid(
                "parser.max_depth",
                format!(
                    "must be between 1 and {}, got {}",
                    parsing::MAX_PARSE_DEPTH,
                    self.max_depth
                ),
            ));
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: env::var(env_vars::PARSER_MAX_DEPTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(parsing::DEFAULT_MAX_PARSE_DEPTH),
            require_eof: env::var(env_vars::PARSER_REQUIRE_EOF)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
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
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub analyzer: AnalyzerConfig,
    pub parser: ParserConfig,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyzer.validate()?;
        self.parser.validate()
    }

    /// Logging service described by the `[logging]` table
    pub fn logger(&self) -> SharedLogger {
        Arc::new(LoggingService::from_preferences(&self.logging))
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Analyzer
    pub const ANALYZER_LOOKAHEAD_DEPTH: &str = "LLK_ANALYZER_LOOKAHEAD_DEPTH";
    pub const ANALYZER_MAX_ITERATIONS: &str = "LLK_ANALYZER_MAX_ITERATIONS";
    pub const ANALYZER_REPORT_RIGHT_RECURSION: &str = "LLK_ANALYZER_REPORT_RIGHT_RECURSION";

    // Parser
    pub const PARSER_MAX_DEPTH: &str = "LLK_PARSER_MAX_DEPTH";
    pub const PARSER_REQUIRE_EOF: &str = "LLK_PARSER_REQUIRE_EOF";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LLK_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LLK_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LLK_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_toml_overrides_selected_fields() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [analyzer]
            lookahead_depth = 2
            max_iterations = 40

            [parser]
            max_depth = 64

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.analyzer.lookahead_depth, 2);
        assert_eq!(config.analyzer.max_iterations, Some(40));
        assert_eq!(config.parser.max_depth, 64);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_lookahead_rejected() {
        let result = RuntimeConfig::from_toml_str("[analyzer]\nlookahead_depth = 0\n");
        assert_eq!(
            result.as_ref().map_err(ConfigError::code).err(),
            Some(codes::system::CONFIGURATION_ERROR)
        );
        assert_matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "analyzer.lookahead_depth",
                ..
            })
        );

        let too_deep = AnalyzerConfig::with_lookahead(analysis::MAX_LOOKAHEAD_DEPTH + 1);
        assert!(too_deep.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = AnalyzerConfig {
            lookahead_depth: 1,
            max_iterations: Some(0),
            report_right_recursion: true,
        };
        assert_matches!(config.validate(), Err(ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = RuntimeConfig::from_toml_str("[parser\nmax_depth = ");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[parser]\nrequire_eof = false").unwrap();

        let config = RuntimeConfig::from_file(file.path()).unwrap();
        assert!(!config.parser.require_eof);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::from_file(dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
