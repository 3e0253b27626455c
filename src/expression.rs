use crate::arena::{NodeId, TokenArena};
use crate::delegate::{DefaultDelegate, DefaultFormatter, Delegate, Formatter};
use crate::error::ExprError;
use crate::parser::Parser;
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::any::Any;

/// Parse-once, evaluate-many façade. Owns the arena and the root of one
/// parsed tree.
///
/// A parsed expression is immutable; `calculate`, `traverse`, and `format`
/// take `&self` and may run concurrently from multiple threads. `parse` and
/// `clear` mutate and must be serialized by the caller.
///
/// ```
/// use evalon::Expression;
///
/// let mut expr = Expression::new();
/// expr.parse("2 + 3 * 10").unwrap();
/// assert_eq!(expr.calculate().unwrap().as_number().unwrap(), 32.0);
/// ```
#[derive(Default)]
pub struct Expression {
    arena: TokenArena,
    root: Option<NodeId>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses with the stock delegate and no flags.
    pub fn parse(&mut self, source: &str) -> Result<(), ExprError> {
        self.parse_with(source, &DefaultDelegate, 0)
    }

    /// Parses `source`, replacing any previously parsed tree. On failure the
    /// expression is left cleared, never partially parsed.
    pub fn parse_with(
        &mut self,
        source: &str,
        delegate: &dyn Delegate,
        flags: u32,
    ) -> Result<(), ExprError> {
        self.clear();
        let parser = Parser::new(source, delegate, flags)?;
        let (arena, root) = parser.parse()?;
        debug!("parsed {:?} into {} nodes", source, arena.len());
        self.arena = arena;
        self.root = Some(root);
        Ok(())
    }

    pub fn is_parsed(&self) -> bool {
        self.root.is_some()
    }

    fn root(&self) -> Result<NodeId, ExprError> {
        self.root.ok_or(ExprError::NotParsed)
    }

    /// Evaluates without runtime context.
    pub fn calculate(&self) -> Result<Value, ExprError> {
        self.calculate_with(&mut ())
    }

    /// Evaluates against caller-supplied context. The engine passes `data`
    /// through to custom tokens untouched; any synchronization on it is the
    /// host's contract.
    pub fn calculate_with(&self, data: &mut dyn Any) -> Result<Value, ExprError> {
        let root = self.root()?;
        self.arena.get(root).calculate(&self.arena, data)
    }

    /// Visits every node in pre-order. Returns false if the visitor aborted
    /// the walk early.
    pub fn traverse(&self, visitor: &mut dyn FnMut(&Token) -> bool) -> Result<bool, ExprError> {
        let root = self.root()?;
        Ok(self.arena.get(root).traverse(&self.arena, visitor))
    }

    /// Renders the tree with the default formatter.
    pub fn format(&self) -> Result<String, ExprError> {
        self.format_with(&DefaultFormatter)
    }

    pub fn format_with(&self, formatter: &dyn Formatter) -> Result<String, ExprError> {
        let root = self.root()?;
        let mut out = String::new();
        self.arena.get(root).format(&self.arena, formatter, &mut out);
        Ok(out)
    }

    /// Drops the whole tree and returns to the unparsed state. Re-parsing
    /// afterwards is permitted.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}
