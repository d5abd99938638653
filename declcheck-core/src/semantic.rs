//! Type agreement between a declaration and its initial value.

use tracing::debug;

use crate::error::SemanticError;
use crate::syntax::DeclarationShape;
use crate::types::DataType;

/// Check every declaration, stopping at the first violation.
pub fn check_semantics(shapes: &[DeclarationShape]) -> Result<(), SemanticError> {
    for shape in shapes {
        check_shape(shape)?;
    }
    Ok(())
}

fn check_shape(shape: &DeclarationShape) -> Result<(), SemanticError> {
    match shape {
        // The delimiter was already required by the grammar.
        DeclarationShape::Declared { .. } => Ok(()),
        DeclarationShape::Initialized {
            line,
            data_type,
            identifier,
            assign_op,
            value,
            ..
        } => {
            if assign_op.lexeme() != "=" {
                return Err(SemanticError::InvalidAssignment {
                    identifier: identifier.lexeme().to_string(),
                    line: *line,
                });
            }

            // The grammar only admits known keywords, but shapes can be built
            // by hand.
            let ty = DataType::from_keyword(data_type.lexeme()).ok_or_else(|| {
                SemanticError::UnknownType {
                    data_type: data_type.lexeme().to_string(),
                    line: *line,
                }
            })?;

            if value.kind() != ty.literal_kind() {
                return Err(SemanticError::TypeMismatch {
                    expected_type: ty.keyword().to_string(),
                    value_lexeme: value.lexeme().to_string(),
                    line: *line,
                });
            }

            debug!(line = *line, ty = %ty, "value agrees with declared type");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Token, TokenKind, tokenize_source};
    use crate::syntax::check_syntax;

    fn check(source: &str) -> Result<(), SemanticError> {
        let lines = tokenize_source(source).expect("tokenize");
        let shapes = check_syntax(&lines).expect("syntax");
        check_semantics(&shapes)
    }

    fn initialized(data_type: &str, assign_op: &str, value: Token) -> DeclarationShape {
        DeclarationShape::Initialized {
            line: 1,
            data_type: Token::new(TokenKind::DataType, data_type),
            identifier: Token::new(TokenKind::Identifier, "v"),
            assign_op: Token::new(TokenKind::AssignOp, assign_op),
            value,
            delimiter: Token::new(TokenKind::Delimiter, ";"),
        }
    }

    #[test]
    fn accepts_matching_literals() {
        check(
            "int a = -3;\ndouble b = 2.5;\nchar c = 'q';\nString d = \"hi\";\nboolean e = false;",
        )
        .expect("all declarations agree");
    }

    #[test]
    fn declared_only_is_always_valid() {
        check("int a;\ndouble b;\nchar c;\nString d;\nboolean e;").expect("semantic");
    }

    #[test]
    fn integer_literal_does_not_satisfy_double() {
        assert_eq!(
            check("double y = 5;"),
            Err(SemanticError::TypeMismatch {
                expected_type: "double".to_string(),
                value_lexeme: "5".to_string(),
                line: 1,
            })
        );
    }

    #[test]
    fn every_mismatched_literal_is_rejected() {
        let samples = [
            ("int", "1"),
            ("double", "1.5"),
            ("char", "'c'"),
            ("String", "\"s\""),
            ("boolean", "true"),
        ];
        for ty in DataType::ALL {
            for (sample_ty, literal) in samples {
                let source = format!("{} v = {literal};", ty.keyword());
                let result = check(&source);
                if sample_ty == ty.keyword() {
                    assert_eq!(result, Ok(()), "{source}");
                } else {
                    assert!(
                        matches!(result, Err(SemanticError::TypeMismatch { .. })),
                        "{source} should mismatch"
                    );
                }
            }
        }
    }

    #[test]
    fn stops_at_first_mismatch() {
        let err = check("int a = 1;\nchar b = \"x\";\nint c = true;").unwrap_err();
        assert_eq!(err.line_number(), Some(2));
    }

    #[test]
    fn unknown_type_is_reported() {
        let shape = initialized("float", "=", Token::new(TokenKind::DoubleLiteral, "1.0"));
        assert_eq!(
            check_semantics(&[shape]),
            Err(SemanticError::UnknownType {
                data_type: "float".to_string(),
                line: 1,
            })
        );
    }

    #[test]
    fn wrong_assignment_operator_is_reported() {
        let shape = initialized("int", ":=", Token::new(TokenKind::IntegerLiteral, "1"));
        let err = check_semantics(&[shape]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing or invalid assignment operator for v"
        );
    }
}
