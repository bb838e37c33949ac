//! Compile-time limits for the LL(k) engine
//!
//! These bound the work the analyzer and the parser are willing to do. Runtime
//! preferences in `runtime` may tighten them but never exceed them.

pub mod compile_time {
    pub mod analysis {
        /// Largest look-ahead depth the analyzer accepts
        /// RESOURCE: look-ahead sets grow exponentially in k
        pub const MAX_LOOKAHEAD_DEPTH: usize = 16;

        /// Look-ahead depth used when none is configured
        pub const DEFAULT_LOOKAHEAD_DEPTH: usize = 1;

        /// Sequences a single look-ahead set may hold before it is saturated
        /// RESOURCE: caps memory for pathological grammars
        pub const MAX_SEQUENCES_PER_SET: usize = 65_536;

        /// Longest recursion cycle reported in a diagnostic
        pub const MAX_REPORTED_CYCLE_LENGTH: usize = 32;
    }

    pub mod parsing {
        /// Default maximum nesting of pattern invocations during a parse
        /// SECURITY: prevents stack overflow on deeply nested input
        pub const DEFAULT_MAX_PARSE_DEPTH: usize = 512;

        /// Hard ceiling for the configurable parse depth
        pub const MAX_PARSE_DEPTH: usize = 16_384;

        /// Expected token types listed in a single parse error
        pub const MAX_EXPECTED_TOKENS_REPORTED: usize = 32;
    }

    pub mod logging {
        /// Events kept by a `MemoryLogger` before the oldest are dropped
        /// RESOURCE: controls memory usage for in-process log capture
        pub const MEMORY_LOG_BUFFER_SIZE: usize = 10_000;
    }
}
