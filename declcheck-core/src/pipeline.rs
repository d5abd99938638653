//! Stage gating for the three analysis passes.
//!
//! A [`Pipeline`] owns the token buffer and the current [`Phase`]. Each
//! stage may run only directly after the previous one passed; a failure
//! is absorbing, and starting over (including analyzing new source text)
//! always goes through [`Pipeline::reset`].

use core::fmt;

use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::diagnostic::{Diagnostic, Stage};
use crate::error::{CoreError, LexicalError, SemanticError, SyntaxError};
use crate::lexer::{Line, tokenize_source};
use crate::semantic::check_semantics;
use crate::syntax::{DeclarationShape, check_syntax};

/// Where the pipeline currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Fresh,
    LexicalPassed,
    SyntaxPassed,
    SemanticPassed,
    /// The given stage ran and failed. Only `reset` leaves this phase.
    Failed(Stage),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Fresh => f.write_str("fresh"),
            Phase::LexicalPassed => f.write_str("lexical passed"),
            Phase::SyntaxPassed => f.write_str("syntax passed"),
            Phase::SemanticPassed => f.write_str("semantic passed"),
            Phase::Failed(stage) => write!(f, "{stage} failed"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Pipeline {
    phase: Phase,
    lines: Vec<Line>,
    shapes: Vec<DeclarationShape>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lexical_ok(&self) -> bool {
        matches!(
            self.phase,
            Phase::LexicalPassed
                | Phase::SyntaxPassed
                | Phase::SemanticPassed
                | Phase::Failed(Stage::Syntax | Stage::Semantic)
        )
    }

    pub fn syntax_ok(&self) -> bool {
        matches!(
            self.phase,
            Phase::SyntaxPassed | Phase::SemanticPassed | Phase::Failed(Stage::Semantic)
        )
    }

    pub fn semantic_ok(&self) -> bool {
        self.phase == Phase::SemanticPassed
    }

    /// The stage a host should currently offer, if any.
    pub fn next_stage(&self) -> Option<Stage> {
        match self.phase {
            Phase::Fresh => Some(Stage::Lexical),
            Phase::LexicalPassed => Some(Stage::Syntax),
            Phase::SyntaxPassed => Some(Stage::Semantic),
            Phase::SemanticPassed | Phase::Failed(_) => None,
        }
    }

    /// Token buffer from the last successful lexical pass.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Declarations from the last successful syntax pass.
    pub fn shapes(&self) -> &[DeclarationShape] {
        &self.shapes
    }

    pub fn run_lexical(&mut self, source: &str) -> Result<(), LexicalError> {
        let _span = info_span!("lexical").entered();
        if self.phase != Phase::Fresh {
            warn!(phase = %self.phase, "lexical analysis refused");
            return Err(LexicalError::NotReady);
        }

        match tokenize_source(source) {
            Ok(lines) => {
                info!(lines = lines.len(), "{}", Stage::Lexical.verdict(true));
                self.lines = lines;
                self.phase = Phase::LexicalPassed;
                Ok(())
            }
            Err(err) => {
                info!(error = %err, "{}", Stage::Lexical.verdict(false));
                self.lines.clear();
                self.phase = Phase::Failed(Stage::Lexical);
                Err(err)
            }
        }
    }

    pub fn run_syntax(&mut self) -> Result<(), SyntaxError> {
        let _span = info_span!("syntax").entered();
        if self.phase != Phase::LexicalPassed {
            warn!(phase = %self.phase, "syntax analysis refused");
            return Err(SyntaxError::NotReady);
        }

        match check_syntax(&self.lines) {
            Ok(shapes) => {
                info!(declarations = shapes.len(), "{}", Stage::Syntax.verdict(true));
                self.shapes = shapes;
                self.phase = Phase::SyntaxPassed;
                Ok(())
            }
            Err(err) => {
                info!(error = %err, "{}", Stage::Syntax.verdict(false));
                self.phase = Phase::Failed(Stage::Syntax);
                Err(err)
            }
        }
    }

    pub fn run_semantic(&mut self) -> Result<(), SemanticError> {
        let _span = info_span!("semantic").entered();
        if self.phase != Phase::SyntaxPassed {
            warn!(phase = %self.phase, "semantic analysis refused");
            return Err(SemanticError::NotReady);
        }

        match check_semantics(&self.shapes) {
            Ok(()) => {
                info!("{}", Stage::Semantic.verdict(true));
                self.phase = Phase::SemanticPassed;
                Ok(())
            }
            Err(err) => {
                info!(error = %err, "{}", Stage::Semantic.verdict(false));
                self.phase = Phase::Failed(Stage::Semantic);
                Err(err)
            }
        }
    }

    /// Run one stage by name. `source` is only read by the lexical stage.
    pub fn run_stage(&mut self, stage: Stage, source: &str) -> Result<(), CoreError> {
        match stage {
            Stage::Lexical => self.run_lexical(source)?,
            Stage::Syntax => self.run_syntax()?,
            Stage::Semantic => self.run_semantic()?,
        }
        Ok(())
    }

    /// Back to `Fresh`, dropping every buffer.
    pub fn reset(&mut self) {
        info!(from = %self.phase, "pipeline reset");
        *self = Pipeline::default();
    }
}

/// Outcome of [`analyze`]: which stages passed, the first failure, and
/// the intermediate results that were produced along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub passed: Vec<Stage>,
    pub failure: Option<Diagnostic>,
    pub lines: Vec<Line>,
    pub shapes: Vec<DeclarationShape>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run the stages in order on a fresh pipeline, up to and including
/// `through`, stopping at the first failure.
pub fn analyze(source: &str, through: Stage) -> Report {
    let mut pipeline = Pipeline::new();
    let mut report = Report::default();

    for stage in Stage::ALL.into_iter().filter(|stage| *stage <= through) {
        match pipeline.run_stage(stage, source) {
            Ok(()) => report.passed.push(stage),
            Err(err) => {
                report.failure = Some(err.into());
                break;
            }
        }
    }

    report.lines = pipeline.lines().to_vec();
    report.shapes = pipeline.shapes().to_vec();
    report
}
