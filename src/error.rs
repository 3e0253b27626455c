use crate::function::Arity;
use thiserror::Error;

/// Offsets reported in errors are byte positions into the source string,
/// pointing at the first character the engine could not make sense of.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("unterminated string literal at offset {0}")]
    UnterminatedString(usize),
    #[error("malformed number at offset {0}")]
    MalformedNumber(usize),
    #[error("unrecognized lexeme at offset {0}")]
    UnrecognizedLexeme(usize),
    #[error("unexpected token at offset {0}")]
    UnexpectedToken(usize),
    #[error("missing ')' at offset {0}")]
    MissingCloseParen(usize),
    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },
    #[error("type mismatch")]
    TypeMismatch,
    #[error("expression has not been parsed")]
    NotParsed,
}
