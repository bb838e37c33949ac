//! Logging macros over an explicit `LoggingService`
//!
//! Context values accept any `Display` type and are only formatted when the
//! service would record the event.

// ============================================================================
// INTERNAL HELPER
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __llk_log {
    ($service:expr, $event:expr) => {
        $service.log_event($event)
    };

    ($service:expr, $event:expr, $($key:expr => $value:expr),+) => {
        {
            let service: &$crate::logging::LoggingService = &$service;
            let event: $crate::logging::LogEvent = $event;
            if service.should_log(event.level) {
                let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
                let context_refs: Vec<(&str, &str)> = context_strings
                    .iter()
                    .map(|(k, v)| (*k, v.as_str()))
                    .collect();
                service.log_with_context(event, context_refs);
            }
        }
    };
}

// ============================================================================
// PUBLIC MACROS
// ============================================================================

/// Log error with a `Code`
#[macro_export]
macro_rules! log_error {
    ($service:expr, $code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__llk_log!($service, $crate::logging::LogEvent::error($code, $message) $(, $key => $value)*)
    };
}

/// Log warning with a `Code`
#[macro_export]
macro_rules! log_warning {
    ($service:expr, $code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__llk_log!($service, $crate::logging::LogEvent::warning_with_code($code, $message) $(, $key => $value)*)
    };
}

/// Log success with a `Code`
#[macro_export]
macro_rules! log_success {
    ($service:expr, $code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__llk_log!($service, $crate::logging::LogEvent::success($code, $message) $(, $key => $value)*)
    };
}

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($service:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__llk_log!($service, $crate::logging::LogEvent::info($message) $(, $key => $value)*)
    };
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($service:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::__llk_log!($service, $crate::logging::LogEvent::debug($message) $(, $key => $value)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::{codes, LogLevel, LoggingService};

    #[test]
    fn test_macros_attach_display_context() {
        let (service, logger) = LoggingService::memory(LogLevel::Debug);

        crate::log_debug!(service, "Entering pattern", "pattern" => "Expr", "depth" => 3);
        crate::log_warning!(service, codes::analysis::RIGHT_RECURSION, "Right recursion", "pattern" => "List");
        crate::log_success!(service, codes::success::PARSE_COMPLETE, "Done");

        let events = logger.get_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].context.get("depth"), Some(&"3".to_string()));
        assert!(events[1].is_warning());
        assert!(events[2].context.is_empty());
    }

    #[test]
    fn test_macros_skip_filtered_levels() {
        let (service, logger) = LoggingService::memory(LogLevel::Info);

        crate::log_debug!(service, "Hidden", "key" => "value");
        crate::log_info!(service, "Shown");

        assert_eq!(logger.event_count(), 1);
    }
}
