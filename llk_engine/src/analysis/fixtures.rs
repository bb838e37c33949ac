//! Grammars shared by analyzer and parser tests

use crate::grammar::{Grammar, PatternId, ProductionElement, ProductionPattern};
use crate::tokens::{Position, Token, TokenNames, TokenStream, TokenType};

pub fn id(value: u32) -> PatternId {
    PatternId::new(value)
}

pub fn tok(value: u32) -> TokenType {
    TokenType::new(value)
}

fn grammar_of(patterns: Vec<ProductionPattern>, names: &[(u32, &str)]) -> Grammar {
    let mut grammar = Grammar::new().with_token_names(
        names
            .iter()
            .fold(TokenNames::new(), |names, (value, name)| names.with(tok(*value), *name)),
    );
    for pattern in patterns {
        grammar.add_pattern(pattern).unwrap();
    }
    grammar
}

/// S = "a" S "b" | ε (default)
pub fn balanced() -> Grammar {
    let mut s = ProductionPattern::new(id(1), "S")
        .with_alternative([
            ProductionElement::once(tok(1)),
            ProductionElement::once(id(1)),
            ProductionElement::once(tok(2)),
        ])
        .unwrap();
    let empty = s.add_alternative([]).unwrap();
    s.set_default_alternative(empty).unwrap();
    grammar_of(vec![s], &[(1, "a"), (2, "b")])
}

/// E = T "+" E | T ; T = "n"
pub fn expression() -> Grammar {
    let e = ProductionPattern::new(id(1), "E")
        .with_alternative([
            ProductionElement::once(id(2)),
            ProductionElement::once(tok(2)),
            ProductionElement::once(id(1)),
        ])
        .unwrap()
        .with_alternative([ProductionElement::once(id(2))])
        .unwrap();
    let t = ProductionPattern::new(id(2), "T")
        .with_alternative([ProductionElement::once(tok(1))])
        .unwrap();
    grammar_of(vec![e, t], &[(1, "n"), (2, "+")])
}

/// E = E "+" "n" | "n"
pub fn left_recursive_expression() -> Grammar {
    let e = ProductionPattern::new(id(1), "E")
        .with_alternative([
            ProductionElement::once(id(1)),
            ProductionElement::once(tok(2)),
            ProductionElement::once(tok(1)),
        ])
        .unwrap()
        .with_alternative([ProductionElement::once(tok(1))])
        .unwrap();
    grammar_of(vec![e], &[(1, "n"), (2, "+")])
}

/// L = "a" L | "b"
pub fn right_recursive_list() -> Grammar {
    let l = ProductionPattern::new(id(1), "L")
        .with_alternative([ProductionElement::once(tok(1)), ProductionElement::once(id(1))])
        .unwrap()
        .with_alternative([ProductionElement::once(tok(2))])
        .unwrap();
    grammar_of(vec![l], &[(1, "a"), (2, "b")])
}

/// List = "[" Items "]" ; Items (synthetic) = "n" Tail* ; Tail (synthetic) = "," "n"
pub fn bracketed_list() -> Grammar {
    let list = ProductionPattern::new(id(1), "List")
        .with_alternative([
            ProductionElement::once(tok(1)),
            ProductionElement::optional(id(2)),
            ProductionElement::once(tok(2)),
        ])
        .unwrap();
    let items = ProductionPattern::synthetic(id(2), "Items")
        .with_alternative([
            ProductionElement::once(tok(3)),
            ProductionElement::repeated(id(3)),
        ])
        .unwrap();
    let tail = ProductionPattern::synthetic(id(3), "Tail")
        .with_alternative([ProductionElement::once(tok(4)), ProductionElement::once(tok(3))])
        .unwrap();
    grammar_of(vec![list, items, tail], &[(1, "["), (2, "]"), (3, "n"), (4, ",")])
}

/// Tokenize whitespace separated words using the grammar's token names
pub fn tokens(grammar: &Grammar, input: &str) -> TokenStream {
    let names = grammar.token_names();
    let mut position = Position::start();
    let mut tokens = Vec::new();
    for word in input.split(' ').filter(|w| !w.is_empty()) {
        let token_type = (1..=64)
            .map(tok)
            .find(|t| names.get(*t) == Some(word))
            .unwrap_or_else(|| panic!("unknown token '{}'", word));
        tokens.push(Token::new(token_type, word, position));
        position = position.advance_str(word).advance(' ');
    }
    TokenStream::new(tokens)
}
