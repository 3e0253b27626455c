use crate::arena::NodeId;
use crate::error::ExprError;
use crate::function::{find_default_function, Function};
use crate::lexer::{Lexeme, LexemeKind};
use crate::parser::Parser;
use std::fmt::Write;

/// Host extension points consulted during parsing. Every method has a
/// declining default, so `&DefaultDelegate` gives stock behavior.
pub trait Delegate {
    /// Offered the remaining unscanned input after built-in number scanning
    /// failed. Return the custom lexeme and the number of bytes consumed,
    /// or `None` to fall through to standard name scanning.
    fn read_lexeme<'s>(
        &self,
        _input: &'s str,
    ) -> Result<Option<(LexemeKind<'s>, usize)>, ExprError> {
        Ok(None)
    }

    /// Offered a lexeme the core parser did not recognize as a primary
    /// token. The parser handle allows recursing into nested subexpressions
    /// and allocating nodes. Return `None` to decline, in which case parsing
    /// fails with `UnexpectedToken`.
    fn create_token(
        &self,
        _lexeme: &Lexeme<'_>,
        _parser: &mut Parser<'_, '_>,
    ) -> Result<Option<NodeId>, ExprError> {
        Ok(None)
    }

    /// Resolves a function by case-insensitive name. The default serves the
    /// built-in registry; overrides may add or shadow names.
    fn find_function(&self, name: &str) -> Option<&dyn Function> {
        find_default_function(name)
    }
}

#[derive(Default)]
pub struct DefaultDelegate;

impl Delegate for DefaultDelegate {}

/// Controls how literal values render during formatting. Operator and
/// parenthesis syntax is fixed and not customizable.
pub trait Formatter {
    fn append_number(&self, out: &mut String, value: f64) {
        let _ = write!(out, "{}", value);
    }

    fn append_string(&self, out: &mut String, value: &str) {
        out.push('"');
        out.push_str(value);
        out.push('"');
    }
}

#[derive(Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}
