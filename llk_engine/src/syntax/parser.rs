//! Recursive descent over an analyzed grammar
//!
//! The parser never backtracks. At each pattern it peeks up to k tokens and
//! picks the alternative whose look-ahead matches; at each repeatable
//! element it consults the element's continuation look-ahead to decide
//! whether another occurrence follows.

use super::error::{ExpectedTokens, ParseError};
use super::listener::{NoopListener, ParseListener};
use super::tree::{Node, ParseTree, ProductionNode, TokenNode};
use crate::analysis::AnalyzedGrammar;
use crate::config::ParserConfig;
use crate::grammar::{ElementKind, PatternId, ProductionElement, ProductionPattern, ProductionPatternAlternative};
use crate::logging::{self, codes, LogEvent, LogLevel, SharedLogger};
use crate::tokens::{TokenStream, TokenType};
use crate::{log_debug, log_error, log_success};

/// Per-parse mutable state
struct ParseState<'s> {
    stream: &'s mut TokenStream,
    listener: &'s mut dyn ParseListener,
    depth: usize,
}

/// Parser over a frozen grammar
///
/// Cheap to build; create one per thread and share the grammar.
pub struct Parser<'g> {
    grammar: &'g AnalyzedGrammar,
    config: ParserConfig,
    logger: SharedLogger,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g AnalyzedGrammar) -> Self {
        Self {
            grammar,
            config: ParserConfig::default(),
            logger: logging::silent(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn grammar(&self) -> &'g AnalyzedGrammar {
        self.grammar
    }

    /// Parse the stream starting at `start`
    pub fn parse(&self, start: PatternId, stream: &mut TokenStream) -> Result<ParseTree, ParseError> {
        self.parse_with_listener(start, stream, &mut NoopListener)
    }

    /// Parse while reporting enter, exit and token events to `listener`
    pub fn parse_with_listener(
        &self,
        start: PatternId,
        stream: &mut TokenStream,
        listener: &mut dyn ParseListener,
    ) -> Result<ParseTree, ParseError> {
        if let Err(error) = self.config.validate() {
            log_error!(self.logger, error.code(), &error.to_string());
        }
        log_debug!(self.logger, "Starting parse",
            "start" => self.grammar.grammar().pattern_name(start),
            "lookahead_depth" => self.grammar.lookahead_depth());

        let mut state = ParseState {
            stream,
            listener,
            depth: 0,
        };
        let result = self.run(start, &mut state);

        match &result {
            Ok(tree) => {
                log_success!(self.logger, codes::success::PARSE_COMPLETE, "Parse completed",
                    "tokens" => state.stream.consumed(),
                    "roots" => tree.roots().len());
            }
            Err(error) => {
                let mut event = LogEvent::error(error.code(), &error.to_string());
                if let Some(position) = error.position() {
                    event = event.with_position(position);
                }
                let consumed = state.stream.consumed().to_string();
                self.logger.log_with_context(event, vec![("tokens", consumed.as_str())]);
            }
        }
        result
    }

    fn run(&self, start: PatternId, state: &mut ParseState<'_>) -> Result<ParseTree, ParseError> {
        let pattern = self.lookup(start)?;
        let roots = self.parse_pattern(pattern, state)?;

        if self.config.require_eof {
            let next = state.stream.peek(0);
            if !next.is_eof() {
                let expected = ExpectedTokens::new([TokenType::EOF], self.grammar.token_names());
                return Err(ParseError::unexpected(pattern.name(), expected, next.clone()));
            }
        }
        Ok(ParseTree::new(roots))
    }

    fn lookup(&self, id: PatternId) -> Result<&'g ProductionPattern, ParseError> {
        self.grammar
            .pattern(id)
            .ok_or_else(|| ParseError::unknown_pattern(id))
    }

    /// Parse one pattern and return the nodes it contributes to its parent
    ///
    /// A synthetic pattern contributes its children, any other pattern a
    /// single production node.
    fn parse_pattern(
        &self,
        pattern: &'g ProductionPattern,
        state: &mut ParseState<'_>,
    ) -> Result<Vec<Node>, ParseError> {
        if state.depth >= self.config.max_depth {
            return Err(ParseError::recursion_limit(
                pattern.name(),
                self.config.max_depth,
                state.stream.position(),
            ));
        }
        state.depth += 1;
        state.listener.enter(pattern);

        let alternative = self.select_alternative(pattern, state.stream)?;
        if self.logger.should_log(LogLevel::Debug) {
            log_debug!(self.logger, "Entering pattern",
                "pattern" => pattern.name(),
                "alternative" => alternative,
                "depth" => state.depth);
        }

        let mut children = Vec::new();
        for (index, element) in alternative.elements().iter().enumerate() {
            self.parse_element(pattern, alternative, index, element, state, &mut children)?;
        }

        state.depth -= 1;
        state.listener.exit(pattern, &children);

        if pattern.is_synthetic() {
            Ok(children)
        } else {
            Ok(vec![Node::Production(ProductionNode {
                pattern: pattern.id(),
                name: pattern.name().to_string(),
                children,
            })])
        }
    }

    fn select_alternative(
        &self,
        pattern: &'g ProductionPattern,
        stream: &mut TokenStream,
    ) -> Result<&'g ProductionPatternAlternative, ParseError> {
        let k = self.grammar.lookahead_depth();
        let matching: Vec<&'g ProductionPatternAlternative> = pattern
            .alternatives()
            .iter()
            .filter(|alternative| alternative.lookahead().matches_start(stream, k))
            .collect();
        let default = pattern.default_alternative();

        match matching.as_slice() {
            [single] => Ok(*single),
            [] => default.ok_or_else(|| {
                let expected = ExpectedTokens::new(
                    pattern.lookahead().first_tokens(),
                    self.grammar.token_names(),
                );
                ParseError::unexpected(pattern.name(), expected, stream.peek(0).clone())
            }),
            several => Ok(default
                .filter(|fallback| several.iter().any(|a| a.id() == fallback.id()))
                .unwrap_or(several[0])),
        }
    }

    /// Parse every occurrence of one element, appending to `children`
    fn parse_element(
        &self,
        pattern: &'g ProductionPattern,
        alternative: &'g ProductionPatternAlternative,
        index: usize,
        element: &ProductionElement,
        state: &mut ParseState<'_>,
        children: &mut Vec<Node>,
    ) -> Result<(), ParseError> {
        let k = self.grammar.lookahead_depth();
        let mut count = 0;

        while element.allows_more(count) {
            if count >= element.min() {
                let continues = alternative
                    .element_lookahead(index)
                    .is_some_and(|lookahead| lookahead.matches_start(state.stream, k));
                if !continues {
                    break;
                }
            }

            let before = state.stream.consumed();
            match element.kind() {
                ElementKind::Token(token_type) => {
                    let node = self.expect_token(pattern, token_type, state)?;
                    children.push(Node::Token(node));
                }
                ElementKind::Production(id) => {
                    let target = self.lookup(id)?;
                    children.extend(self.parse_pattern(target, state)?);
                }
            }
            count += 1;

            // An occurrence that matched nothing would repeat forever
            if count >= element.min() && state.stream.consumed() == before {
                break;
            }
        }
        Ok(())
    }

    fn expect_token(
        &self,
        pattern: &ProductionPattern,
        expected: TokenType,
        state: &mut ParseState<'_>,
    ) -> Result<TokenNode, ParseError> {
        let found = state.stream.peek(0);
        if found.token_type != expected {
            let expected = ExpectedTokens::new([expected], self.grammar.token_names());
            return Err(ParseError::unexpected(pattern.name(), expected, found.clone()));
        }

        let token = state.stream.next_token();
        state.listener.token(&token);
        Ok(TokenNode::from(token))
    }
}
