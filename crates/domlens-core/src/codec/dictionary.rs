//! Tag shape dictionary.

use std::collections::HashMap;
use std::fmt;

/// Placeholder emitted for a tag whose shape is missing from the dictionary.
pub const MISSING_TOKEN: &str = "tX";

/// Dictionary token, rendered as `t1`, `t2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u32);

impl Token {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Insertion ordered bijection between tag shapes and tokens.
#[derive(Debug, Clone, Default)]
pub struct TagDictionary {
    shapes: Vec<String>,
    tokens: HashMap<String, Token>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for `shape`, assigning the next one on first sight.
    pub fn intern(&mut self, shape: &str) -> Token {
        if let Some(token) = self.tokens.get(shape) {
            return *token;
        }
        self.shapes.push(shape.to_string());
        let token = Token(self.shapes.len() as u32);
        self.tokens.insert(shape.to_string(), token);
        token
    }

    pub fn get(&self, shape: &str) -> Option<Token> {
        self.tokens.get(shape).copied()
    }

    pub fn shape(&self, token: Token) -> Option<&str> {
        let index = usize::try_from(token.0).ok()?.checked_sub(1)?;
        self.shapes.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Entries in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, &str)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (Token(i as u32 + 1), shape.as_str()))
    }

    /// `t1: <div>` lines in assignment order.
    pub fn to_text(&self) -> String {
        self.iter()
            .map(|(token, shape)| format!("{}: {}", token, shape))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
