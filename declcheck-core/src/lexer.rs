//! Lexer for declaration sources.
//!
//! Lexing is word based: every source line is split on runs of
//! whitespace and each word is classified on its own. The one exception
//! is the statement delimiter, which may be written flush against the
//! preceding word (`int x = 10;`). There is no other character-level
//! scanning, so `x=1` is a single (invalid) word and a string literal
//! cannot contain a space.

use core::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::LexicalError;
use crate::types::DataType;

/// Kind of a token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    DataType,
    Identifier,
    AssignOp,  // =
    Delimiter, // ;

    // Literals
    IntegerLiteral,
    DoubleLiteral,
    StringLiteral,
    CharLiteral,
    BooleanLiteral,
}

impl TokenKind {
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::DoubleLiteral
                | TokenKind::StringLiteral
                | TokenKind::CharLiteral
                | TokenKind::BooleanLiteral
        )
    }

    /// Short name used in token listings.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::DataType => "data_type",
            TokenKind::Identifier => "identifier",
            TokenKind::AssignOp => "assignment_operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::DoubleLiteral => "double",
            TokenKind::StringLiteral => "string",
            TokenKind::CharLiteral => "char",
            TokenKind::BooleanLiteral => "boolean",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified word. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.lexeme)
    }
}

/// The tokens of one non-blank source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    /// 1-based line number in the original source.
    number: usize,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(number: usize, tokens: Vec<Token>) -> Self {
        Line { number, tokens }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(Token::kind)
    }
}

// Literal and identifier patterns, anchored on both ends. `[0-9]` rather
// than `\d` keeps digits ASCII-only.
static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").expect("integer pattern"));
static DOUBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("double pattern"));
static STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"[^"]*"$"#).expect("string pattern"));
static CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^'.'$").expect("char pattern"));
static BOOLEAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(true|false)$").expect("boolean pattern"));
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*$").expect("identifier pattern"));

/// Classify a single non-empty word.
///
/// Rules are tried in a fixed order and the first match wins. The order
/// matters where patterns overlap: `10` matches both the integer and the
/// double pattern and is always an `IntegerLiteral`, and `true` matches
/// the identifier pattern but is a `BooleanLiteral`.
pub fn classify(word: &str) -> Result<Token, LexicalError> {
    let kind = if DataType::from_keyword(word).is_some() {
        TokenKind::DataType
    } else if word == "=" {
        TokenKind::AssignOp
    } else if word == ";" {
        TokenKind::Delimiter
    } else if INTEGER.is_match(word) {
        TokenKind::IntegerLiteral
    } else if DOUBLE.is_match(word) {
        TokenKind::DoubleLiteral
    } else if STRING.is_match(word) {
        TokenKind::StringLiteral
    } else if CHAR.is_match(word) {
        TokenKind::CharLiteral
    } else if BOOLEAN.is_match(word) {
        TokenKind::BooleanLiteral
    } else if IDENTIFIER.is_match(word) {
        TokenKind::Identifier
    } else {
        return Err(LexicalError::InvalidToken {
            word: word.to_string(),
            line: None,
        });
    };
    Ok(Token::new(kind, word))
}

/// Split a line into the words fed to [`classify`].
///
/// A single `;` written flush against a word is peeled off and yielded as
/// its own word, so `10;` becomes `10` and `;`. Only one is peeled: `x;;`
/// and `;;` stay whole and are rejected by the classifier.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for chunk in text.split_whitespace() {
        match chunk.strip_suffix(';') {
            Some(body) if !body.is_empty() && !body.ends_with(';') => {
                words.push(body);
                words.push(";");
            }
            _ => words.push(chunk),
        }
    }
    words
}

/// Tokenize a whole source text into per-line token sequences.
///
/// Blank lines are skipped but still counted, so `Line::number` always
/// matches the source. The first invalid word aborts the scan and no
/// partial result is returned.
pub fn tokenize_source(source: &str) -> Result<Vec<Line>, LexicalError> {
    let mut lines = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let number = index + 1;
        let tokens = split_words(text)
            .into_iter()
            .map(|word| classify(word).map_err(|err| err.at_line(number)))
            .collect::<Result<Vec<_>, _>>()?;

        if tokens.is_empty() {
            continue;
        }

        debug!(line = number, tokens = tokens.len(), "tokenized line");
        lines.push(Line::new(number, tokens));
    }

    if lines.is_empty() {
        return Err(LexicalError::EmptySource);
    }
    Ok(lines)
}
