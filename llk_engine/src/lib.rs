// Internal modules
pub mod analysis;
pub mod config;
pub mod grammar;
#[macro_use]
pub mod logging;
pub mod lookahead;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use analysis::{AnalysisReport, AnalyzedGrammar, Analyzer};
pub use config::{AnalyzerConfig, ParserConfig, RuntimeConfig};
pub use grammar::{
    AlternativeId, ElementKind, Grammar, GrammarError, GrammarErrorKind, PatternId,
    ProductionElement, ProductionPattern, ProductionPatternAlternative,
};
pub use lookahead::LookAheadSet;
pub use syntax::{Node, ParseError, ParseErrorKind, ParseListener, ParseTree, Parser};
pub use tokens::{Position, Token, TokenNames, TokenStream, TokenType};
