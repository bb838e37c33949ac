//! Grammar model
//!
//! A [`Grammar`] is a set of [`ProductionPattern`]s, each holding ordered
//! [`ProductionPatternAlternative`]s made of [`ProductionElement`]s. Grammars
//! are built by an external loader, then handed to the analyzer which freezes
//! them for parsing.

pub mod alternative;
pub mod definition;
pub mod element;
pub mod error;
pub mod pattern;

pub use alternative::{AlternativeId, ProductionPatternAlternative};
pub use definition::Grammar;
pub use element::{ElementKind, ProductionElement};
pub use error::{GrammarError, GrammarErrorKind, GrammarResult};
pub use pattern::{PatternId, ProductionPattern};
