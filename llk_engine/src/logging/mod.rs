//! Logging module for the LL(k) engine
//!
//! Provides coded log events, pluggable loggers and a `LoggingService` that is
//! passed explicitly into the analyzer and the parser. There is no global
//! logger: callers that want events inject a service, everyone else gets a
//! silent one.

pub mod codes;
pub mod events;
pub mod macros;
pub mod service;

// Re-export main types
pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, EventSummary, Logger, LoggingService, MemoryLogger, NullLogger, StructuredLogger,
};

use std::sync::Arc;

/// Shared handle to a logging service
pub type SharedLogger = Arc<LoggingService>;

/// Create a shared silent service
pub fn silent() -> SharedLogger {
    Arc::new(LoggingService::silent())
}
