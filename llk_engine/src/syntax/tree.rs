//! Parse trees
//!
//! Synthetic patterns never appear here; their children sit directly in the
//! parent's child list.

use crate::grammar::PatternId;
use crate::tokens::{Token, TokenType};
use crate::utils::Position;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Production(ProductionNode),
    Token(TokenNode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionNode {
    pub pattern: PatternId,
    pub name: String,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenNode {
    pub token_type: TokenType,
    pub image: String,
    pub position: Position,
}

impl From<Token> for TokenNode {
    fn from(token: Token) -> Self {
        Self {
            token_type: token.token_type,
            image: token.image,
            position: token.position,
        }
    }
}

impl Node {
    pub fn as_production(&self) -> Option<&ProductionNode> {
        match self {
            Node::Production(node) => Some(node),
            Node::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&TokenNode> {
        match self {
            Node::Token(node) => Some(node),
            Node::Production(_) => None,
        }
    }

    /// Token leaves in input order
    pub fn leaves(&self) -> Vec<&TokenNode> {
        let mut leaves = Vec::new();
        collect_leaves(self, &mut leaves);
        leaves
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            Node::Token(token) => out.push_str(&token.image),
            Node::Production(node) => {
                out.push_str(&node.name);
                out.push('(');
                for (index, child) in node.children.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    child.write_compact(out);
                }
                out.push(')');
            }
        }
    }

    fn write_indented(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match self {
            Node::Token(token) => {
                let _ = writeln!(out, "{}\"{}\" ({})", indent, token.image, token.position);
            }
            Node::Production(node) => {
                let _ = writeln!(out, "{}{}", indent, node.name);
                for child in &node.children {
                    child.write_indented(depth + 1, out);
                }
            }
        }
    }
}

fn collect_leaves<'a>(node: &'a Node, leaves: &mut Vec<&'a TokenNode>) {
    match node {
        Node::Token(token) => leaves.push(token),
        Node::Production(production) => {
            for child in &production.children {
                collect_leaves(child, leaves);
            }
        }
    }
}

impl ProductionNode {
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Result of a successful parse
///
/// Holds one production root for a regular start pattern, or the spliced
/// children when the start pattern is synthetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTree {
    roots: Vec<Node>,
}

impl ParseTree {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }

    /// The single production root, if the tree has one
    pub fn root(&self) -> Option<&ProductionNode> {
        match self.roots.as_slice() {
            [Node::Production(root)] => Some(root),
            _ => None,
        }
    }

    pub fn leaves(&self) -> Vec<&TokenNode> {
        self.roots.iter().flat_map(|root| root.leaves()).collect()
    }

    /// Token types of the leaves, left to right
    pub fn token_types(&self) -> Vec<TokenType> {
        self.leaves().iter().map(|leaf| leaf.token_type).collect()
    }

    /// One-line form, eg. `S(a, S(), b)`
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        for (index, root) in self.roots.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            root.write_compact(&mut out);
        }
        out
    }

    /// Indented multi-line dump with token positions
    pub fn print_tree(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            root.write_indented(0, &mut out);
        }
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: u32, image: &str, offset: usize) -> Node {
        Node::Token(TokenNode {
            token_type: TokenType::new(id),
            image: image.to_string(),
            position: Position::new(offset, 1, offset as u32 + 1),
        })
    }

    fn sample() -> ParseTree {
        let inner = Node::Production(ProductionNode {
            pattern: PatternId::new(1),
            name: "S".to_string(),
            children: Vec::new(),
        });
        ParseTree::new(vec![Node::Production(ProductionNode {
            pattern: PatternId::new(1),
            name: "S".to_string(),
            children: vec![leaf(1, "a", 0), inner, leaf(2, "b", 2)],
        })])
    }

    #[test]
    fn test_leaves_in_order() {
        let tree = sample();
        let images: Vec<&str> = tree.leaves().iter().map(|l| l.image.as_str()).collect();
        assert_eq!(images, vec!["a", "b"]);
        assert_eq!(tree.token_types(), vec![TokenType::new(1), TokenType::new(2)]);
    }

    #[test]
    fn test_compact_and_indented_forms() {
        let tree = sample();
        assert_eq!(tree.to_compact_string(), "S(a, S(), b)");
        assert_eq!(tree.print_tree(), "S\n  \"a\" (1:1)\n  S\n  \"b\" (1:3)\n");
        assert_eq!(tree.root().map(|r| r.child_count()), Some(3));
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"node\":\"production\""));
        assert!(json.contains("\"node\":\"token\""));

        let back: ParseTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_pretty_json_and_owned_roots() {
        let json = sample().to_json_pretty().unwrap();
        assert!(json.contains('\n'));
        let back: ParseTree = serde_json::from_str(&json).unwrap();

        let roots = back.into_roots();
        assert_eq!(roots.len(), 1);
        let root = roots[0].as_production().unwrap();
        assert_eq!(root.name, "S");
        assert!(root.child(0).and_then(Node::as_production).is_none());
        assert_eq!(root.child(1).and_then(Node::as_production).map(|n| n.child_count()), Some(0));
    }

    #[test]
    fn test_multiple_roots_have_no_single_root() {
        let tree = ParseTree::new(vec![leaf(1, "a", 0), leaf(2, "b", 2)]);
        assert!(tree.root().is_none());
        assert_eq!(tree.to_compact_string(), "a, b");
    }
}
