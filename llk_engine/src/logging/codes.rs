//! Consolidated event codes and classification system
//!
//! Single source of truth for every code the engine emits, together with the
//! metadata (category, severity, description, recommended action) used when
//! formatting events and errors.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning, info and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Code severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl CodeMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR002");
}

/// Grammar construction error codes
pub mod grammar {
    use super::Code;

    pub const DUPLICATE_ALTERNATIVE: Code = Code::new("G001");
    pub const DUPLICATE_PATTERN: Code = Code::new("G002");
    pub const EMPTY_PATTERN: Code = Code::new("G003");
    pub const UNDEFINED_PATTERN: Code = Code::new("G004");
    pub const INVALID_DEFAULT: Code = Code::new("G005");
    pub const INVALID_BOUNDS: Code = Code::new("G006");
    pub const INVALID_LOOKAHEAD_DEPTH: Code = Code::new("G007");
    pub const EMPTY_GRAMMAR: Code = Code::new("G008");
}

/// Grammar analysis error and warning codes
pub mod analysis {
    use super::Code;

    pub const LEFT_RECURSION: Code = Code::new("A001");
    pub const AMBIGUITY: Code = Code::new("A002");

    // Warnings: reported, never fatal
    pub const RIGHT_RECURSION: Code = Code::new("W001");
    pub const DEFAULTED_CONFLICT: Code = Code::new("W002");
    pub const LOOKAHEAD_SATURATED: Code = Code::new("W003");
    pub const GREEDY_REPETITION_OVERLAP: Code = Code::new("W004");
}

/// Parse-time error codes
pub mod parse {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("P001");
    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("P002");
    pub const UNKNOWN_PATTERN: Code = Code::new("P003");
    pub const RECURSION_LIMIT: Code = Code::new("P004");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const GRAMMAR_VALIDATED: Code = Code::new("I010");
    pub const LOOKAHEAD_COMPUTED: Code = Code::new("I011");
    pub const ANALYSIS_COMPLETE: Code = Code::new("I012");
    pub const PARSE_COMPLETE: Code = Code::new("I020");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

const METADATA: &[CodeMetadata] = &[
    CodeMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        "Critical internal engine error",
        "File a bug report with the grammar that triggered it",
    ),
    CodeMetadata::new(
        "ERR002",
        "System",
        Severity::High,
        "Invalid engine configuration",
        "Check the configuration file and LLK_* environment variables",
    ),
    CodeMetadata::new(
        "G001",
        "Grammar",
        Severity::High,
        "Alternative already defined in this pattern",
        "Remove the duplicated alternative from the grammar definition",
    ),
    CodeMetadata::new(
        "G002",
        "Grammar",
        Severity::High,
        "Pattern id or name already defined",
        "Give every production pattern a unique id and name",
    ),
    CodeMetadata::new(
        "G003",
        "Grammar",
        Severity::High,
        "Pattern has no alternatives",
        "Add at least one alternative to the pattern",
    ),
    CodeMetadata::new(
        "G004",
        "Grammar",
        Severity::High,
        "Element references an undefined pattern",
        "Define the referenced pattern or fix the reference",
    ),
    CodeMetadata::new(
        "G005",
        "Grammar",
        Severity::High,
        "Default alternative is not a member of the pattern",
        "Designate an alternative returned by add_alternative on the same pattern",
    ),
    CodeMetadata::new(
        "G006",
        "Grammar",
        Severity::High,
        "Invalid element occurrence bounds",
        "Use bounds with min <= max and max >= 1",
    ),
    CodeMetadata::new(
        "G007",
        "Grammar",
        Severity::High,
        "Look-ahead depth out of range",
        "Choose a look-ahead depth between 1 and the configured maximum",
    ),
    CodeMetadata::new(
        "G008",
        "Grammar",
        Severity::High,
        "Grammar contains no patterns",
        "Add production patterns before analysis",
    ),
    CodeMetadata::new(
        "A001",
        "Analysis",
        Severity::Critical,
        "Pattern is left-recursive",
        "Rewrite the rule with right recursion or repetition",
    ),
    CodeMetadata::new(
        "A002",
        "Analysis",
        Severity::Critical,
        "Alternatives have overlapping look-ahead",
        "Increase the look-ahead depth, refactor the rule or designate a default alternative",
    ),
    CodeMetadata::new(
        "W001",
        "Analysis",
        Severity::Low,
        "Pattern is right-recursive",
        "No action required",
    ),
    CodeMetadata::new(
        "W002",
        "Analysis",
        Severity::Medium,
        "Look-ahead conflict resolved by the default alternative",
        "Verify the default alternative is the intended fallback",
    ),
    CodeMetadata::new(
        "W003",
        "Analysis",
        Severity::Medium,
        "Look-ahead computation hit the iteration bound",
        "Raise max_iterations or simplify the recursive rules involved",
    ),
    CodeMetadata::new(
        "W004",
        "Analysis",
        Severity::Low,
        "Repetition overlaps with what follows it; repetition is greedy",
        "No action required unless the greedy choice is wrong",
    ),
    CodeMetadata::new(
        "P001",
        "Parse",
        Severity::High,
        "Unexpected token",
        "Check the input against the expected token types",
    ),
    CodeMetadata::new(
        "P002",
        "Parse",
        Severity::High,
        "Unexpected end of input",
        "The input is truncated; supply the missing tokens",
    ),
    CodeMetadata::new(
        "P003",
        "Parse",
        Severity::High,
        "Parse requested for an unknown pattern",
        "Start parsing from a pattern defined in the grammar",
    ),
    CodeMetadata::new(
        "P004",
        "Parse",
        Severity::Critical,
        "Maximum parse recursion depth exceeded",
        "Raise max_parse_depth or reduce input nesting",
    ),
    CodeMetadata::new(
        "I010",
        "Grammar",
        Severity::Low,
        "Grammar structure validated",
        "Continue to look-ahead computation",
    ),
    CodeMetadata::new(
        "I011",
        "Analysis",
        Severity::Low,
        "Look-ahead sets computed",
        "Continue to conflict detection",
    ),
    CodeMetadata::new(
        "I012",
        "Analysis",
        Severity::Low,
        "Grammar analysis completed",
        "Grammar is ready for parsing",
    ),
    CodeMetadata::new(
        "I020",
        "Parse",
        Severity::Low,
        "Parse completed",
        "No action required",
    ),
];

static REGISTRY: OnceLock<HashMap<&'static str, &'static CodeMetadata>> = OnceLock::new();

fn get_registry() -> &'static HashMap<&'static str, &'static CodeMetadata> {
    REGISTRY.get_or_init(|| METADATA.iter().map(|meta| (meta.code, meta)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_registry().get(code).copied()
}

/// Get severity from code
pub fn get_severity(code: &str) -> Severity {
    get_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown code")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Check whether a code is registered
pub fn is_known(code: &str) -> bool {
    get_registry().contains_key(code)
}
