//! Configuration for the LL(k) engine
//!
//! `constants` holds compile-time limits, `runtime` holds user preferences
//! that can come from defaults, `LLK_*` environment variables or a TOML file.

pub mod constants;
pub mod runtime;

pub use runtime::{AnalyzerConfig, ConfigError, LoggingPreferences, ParserConfig, RuntimeConfig};
