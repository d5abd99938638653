//! Stage identifiers and the host-facing diagnostic record.

use core::fmt;

use serde::Serialize;

use crate::error::{CoreError, LexicalError, SemanticError, SyntaxError};

/// One of the three analysis stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Lexical, Stage::Syntax, Stage::Semantic];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Lexical => "lexical",
            Stage::Syntax => "syntax",
            Stage::Semantic => "semantic",
        }
    }

    /// Verdict line shown to the user, e.g. `SYNTAX ANALYSIS PASSED`.
    pub fn verdict(self, passed: bool) -> String {
        let outcome = if passed { "PASSED" } else { "FAILED" };
        format!("{} ANALYSIS {outcome}", self.name().to_uppercase())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First failure of a stage, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
    pub line_number: Option<usize>,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Diagnostic {
            stage,
            message: message.into(),
            line_number: None,
        }
    }

    pub fn with_line(mut self, line_number: Option<usize>) -> Self {
        self.line_number = line_number;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "{} error on line {line}: {}", self.stage, self.message),
            None => write!(f, "{} error: {}", self.stage, self.message),
        }
    }
}

impl From<LexicalError> for Diagnostic {
    fn from(err: LexicalError) -> Self {
        Diagnostic::new(Stage::Lexical, err.to_string()).with_line(err.line_number())
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(err: SyntaxError) -> Self {
        Diagnostic::new(Stage::Syntax, err.to_string()).with_line(err.line_number())
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(err: SemanticError) -> Self {
        Diagnostic::new(Stage::Semantic, err.to_string()).with_line(err.line_number())
    }
}

impl From<CoreError> for Diagnostic {
    fn from(err: CoreError) -> Self {
        Diagnostic::new(err.stage(), err.to_string()).with_line(err.line_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_verdicts() {
        assert_eq!(Stage::Lexical.verdict(true), "LEXICAL ANALYSIS PASSED");
        assert_eq!(Stage::Semantic.verdict(false), "SEMANTIC ANALYSIS FAILED");
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Lexical < Stage::Syntax);
        assert!(Stage::Syntax < Stage::Semantic);
    }

    #[test]
    fn diagnostic_from_semantic_error_keeps_line() {
        let diag = Diagnostic::from(SemanticError::TypeMismatch {
            expected_type: "double".to_string(),
            value_lexeme: "5".to_string(),
            line: 4,
        });
        assert_eq!(diag.stage, Stage::Semantic);
        assert_eq!(diag.line_number, Some(4));
        assert_eq!(
            diag.to_string(),
            "semantic error on line 4: 5 is not valid for type double"
        );
    }

    #[test]
    fn diagnostic_without_line() {
        let diag = Diagnostic::from(SyntaxError::NotReady);
        assert_eq!(
            diag.to_string(),
            "syntax error: Please complete lexical analysis first"
        );
    }
}
