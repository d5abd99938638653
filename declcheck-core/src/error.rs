use thiserror::Error;

use crate::diagnostic::Stage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    #[error("Invalid token found: \"{word}\"")]
    InvalidToken { word: String, line: Option<usize> },
    #[error("Please enter some code")]
    EmptySource,
    #[error("lexical analysis already ran; reset before analyzing new source")]
    NotReady,
}

impl LexicalError {
    /// Attach the 1-based source line to an `InvalidToken` error.
    pub fn at_line(self, number: usize) -> Self {
        match self {
            LexicalError::InvalidToken { word, .. } => LexicalError::InvalidToken {
                word,
                line: Some(number),
            },
            other => other,
        }
    }

    pub fn line_number(&self) -> Option<usize> {
        match self {
            LexicalError::InvalidToken { line, .. } => *line,
            LexicalError::EmptySource | LexicalError::NotReady => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Please complete lexical analysis first")]
    NotReady,
    #[error("expected `<type> <name> ;` or `<type> <name> = <value> ;`")]
    MalformedLine(usize),
}

impl SyntaxError {
    pub fn line_number(&self) -> Option<usize> {
        match self {
            SyntaxError::NotReady => None,
            SyntaxError::MalformedLine(line) => Some(*line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("Please complete syntax analysis first")]
    NotReady,
    #[error("{value_lexeme} is not valid for type {expected_type}")]
    TypeMismatch {
        expected_type: String,
        value_lexeme: String,
        line: usize,
    },
    #[error("unknown data type {data_type}")]
    UnknownType { data_type: String, line: usize },
    #[error("Missing or invalid assignment operator for {identifier}")]
    InvalidAssignment { identifier: String, line: usize },
}

impl SemanticError {
    pub fn line_number(&self) -> Option<usize> {
        match self {
            SemanticError::NotReady => None,
            SemanticError::TypeMismatch { line, .. }
            | SemanticError::UnknownType { line, .. }
            | SemanticError::InvalidAssignment { line, .. } => Some(*line),
        }
    }
}

/// Any stage failure, for hosts that drive stages generically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl CoreError {
    pub fn stage(&self) -> Stage {
        match self {
            CoreError::Lexical(_) => Stage::Lexical,
            CoreError::Syntax(_) => Stage::Syntax,
            CoreError::Semantic(_) => Stage::Semantic,
        }
    }

    pub fn line_number(&self) -> Option<usize> {
        match self {
            CoreError::Lexical(err) => err.line_number(),
            CoreError::Syntax(err) => err.line_number(),
            CoreError::Semantic(err) => err.line_number(),
        }
    }

    /// True when the stage was refused because an earlier stage has not passed.
    pub fn is_not_ready(&self) -> bool {
        matches!(
            self,
            CoreError::Lexical(LexicalError::NotReady)
                | CoreError::Syntax(SyntaxError::NotReady)
                | CoreError::Semantic(SemanticError::NotReady)
        )
    }
}
