//! Embeddable formula language: arithmetic, comparison, string
//! concatenation, and function calls. A formula string is parsed once into
//! an arena-backed tree and then calculated, traversed, or re-formatted any
//! number of times against caller-supplied context.

mod arena;
mod delegate;
mod error;
mod expression;
mod function;
mod lexer;
mod parser;
mod token;
mod value;

pub use arena::{NodeId, TokenArena};
pub use delegate::{DefaultDelegate, DefaultFormatter, Delegate, Formatter};
pub use error::ExprError;
pub use expression::Expression;
pub use function::{find_default_function, Arity, Function};
pub use lexer::{Lexeme, LexemeKind, Op, CUSTOM_NUM};
pub use parser::Parser;
pub use token::{BinaryOp, CustomToken, ReduceOp, Token, UnaryOp};
pub use value::{Value, PRECISION};
