//! Core analysis pipeline for single-line variable declarations.
//!
//! Sources are written in a small Java-like surface syntax
//! (`int x = 10;`, `String name;`). The pipeline is:
//!
//!   source text
//!     -> lexer     (per-line tokens)
//!     -> syntax    (declaration shapes)
//!     -> semantic  (declared type vs. literal kind)
//!
//! and is driven through [`Pipeline`], which only lets a stage run after
//! the previous one passed. Hosts (the CLI, tests) should depend on this
//! crate rather than reimplementing the stages.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod diagnostic;
pub mod error;

// ---------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------

pub mod types;
pub mod lexer;
pub mod syntax;
pub mod semantic;

// ---------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------

pub mod pipeline;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use diagnostic::{Diagnostic, Stage};
pub use error::{CoreError, LexicalError, SemanticError, SyntaxError};
pub use lexer::{Line, Token, TokenKind};
pub use pipeline::{Phase, Pipeline, Report, analyze};
pub use syntax::DeclarationShape;
pub use types::DataType;
