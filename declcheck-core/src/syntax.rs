//! Declaration grammar.
//!
//! A line is a declaration only if its token kinds form one of two
//! sequences:
//!
//!   DataType Identifier Delimiter                           (declared)
//!   DataType Identifier AssignOp <literal> Delimiter        (initialized)

use serde::Serialize;
use tracing::debug;

use crate::error::SyntaxError;
use crate::lexer::{Line, Token, TokenKind};

/// A line that matched one of the declaration shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DeclarationShape {
    Declared {
        line: usize,
        data_type: Token,
        identifier: Token,
        delimiter: Token,
    },
    Initialized {
        line: usize,
        data_type: Token,
        identifier: Token,
        assign_op: Token,
        value: Token,
        delimiter: Token,
    },
}

impl DeclarationShape {
    pub fn line(&self) -> usize {
        match self {
            DeclarationShape::Declared { line, .. }
            | DeclarationShape::Initialized { line, .. } => *line,
        }
    }

    pub fn identifier(&self) -> &Token {
        match self {
            DeclarationShape::Declared { identifier, .. }
            | DeclarationShape::Initialized { identifier, .. } => identifier,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, DeclarationShape::Initialized { .. })
    }
}

/// Match every line against the declaration shapes, stopping at the first
/// line that fits neither.
pub fn check_syntax(lines: &[Line]) -> Result<Vec<DeclarationShape>, SyntaxError> {
    lines
        .iter()
        .map(|line| {
            let shape = match_shape(line).ok_or(SyntaxError::MalformedLine(line.number()))?;
            debug!(
                line = line.number(),
                initialized = shape.is_initialized(),
                "matched declaration"
            );
            Ok(shape)
        })
        .collect()
}

fn match_shape(line: &Line) -> Option<DeclarationShape> {
    use TokenKind as K;

    match line.tokens() {
        [data_type, identifier, assign_op, value, delimiter]
            if data_type.kind() == K::DataType
                && identifier.kind() == K::Identifier
                && assign_op.kind() == K::AssignOp
                && value.kind().is_literal()
                && delimiter.kind() == K::Delimiter =>
        {
            Some(DeclarationShape::Initialized {
                line: line.number(),
                data_type: data_type.clone(),
                identifier: identifier.clone(),
                assign_op: assign_op.clone(),
                value: value.clone(),
                delimiter: delimiter.clone(),
            })
        }
        [data_type, identifier, delimiter]
            if data_type.kind() == K::DataType
                && identifier.kind() == K::Identifier
                && delimiter.kind() == K::Delimiter =>
        {
            Some(DeclarationShape::Declared {
                line: line.number(),
                data_type: data_type.clone(),
                identifier: identifier.clone(),
                delimiter: delimiter.clone(),
            })
        }
        _ => None,
    }
}
