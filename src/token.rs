use crate::arena::{NodeId, TokenArena};
use crate::delegate::Formatter;
use crate::error::ExprError;
use crate::value::Value;
use std::any::Any;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }
}

/// Left-fold reducers behind the variadic built-ins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReduceOp {
    Or,
    And,
    Min,
    Max,
}

/// Host-defined node reachable only through the parser extension hook.
///
/// Implementations mirror the built-in capability set. `traverse_children`
/// covers children only; the enclosing [`Token::Custom`] node itself is
/// visited by the engine before this is called.
pub trait CustomToken: fmt::Debug + Send + Sync {
    fn calculate(&self, arena: &TokenArena, data: &mut dyn Any) -> Result<Value, ExprError>;

    fn traverse_children(
        &self,
        _arena: &TokenArena,
        _visitor: &mut dyn FnMut(&Token) -> bool,
    ) -> bool {
        true
    }

    fn format(&self, arena: &TokenArena, fmt: &dyn Formatter, out: &mut String);
}

/// A parsed node. Immutable once constructed; children are referenced by
/// [`NodeId`] into the arena that owns the whole tree.
#[derive(Debug)]
pub enum Token {
    Number(f64),
    Str(String),
    Unary {
        op: UnaryOp,
        operand: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Paren(NodeId),
    Reduce {
        name: &'static str,
        op: ReduceOp,
        args: Vec<NodeId>,
    },
    Math1 {
        name: &'static str,
        f: fn(f64) -> f64,
        arg: NodeId,
    },
    Math2 {
        name: &'static str,
        f: fn(f64, f64) -> f64,
        args: [NodeId; 2],
    },
    If {
        condition: NodeId,
        when_true: NodeId,
        when_false: NodeId,
    },
    Custom(Box<dyn CustomToken>),
}

impl Token {
    /// Evaluates this node against the caller-supplied context. Binary
    /// operands evaluate left before right; `If` evaluates the condition
    /// and exactly one branch.
    pub fn calculate(&self, arena: &TokenArena, data: &mut dyn Any) -> Result<Value, ExprError> {
        match self {
            Token::Number(v) => Ok(Value::Number(*v)),
            Token::Str(s) => Ok(Value::Str(s.clone())),
            Token::Unary { op, operand } => {
                let val = arena.get(*operand).calculate(arena, data)?;
                match op {
                    UnaryOp::Neg => val.neg(),
                    UnaryOp::Not => val.not(),
                }
            }
            Token::Binary { op, left, right } => {
                let mut val = arena.get(*left).calculate(arena, &mut *data)?;
                let rval = arena.get(*right).calculate(arena, &mut *data)?;
                match op {
                    BinaryOp::Add => val.add_assign(&rval)?,
                    BinaryOp::Sub => val.sub_assign(&rval)?,
                    BinaryOp::Mul => val.mul_assign(&rval)?,
                    BinaryOp::Div => val.div_assign(&rval)?,
                    BinaryOp::Pow => {
                        val = Value::Number(val.as_number()?.powf(rval.as_number()?));
                    }
                    BinaryOp::Eq => val = Value::from_bool(val.eq(&rval)),
                    BinaryOp::Lt => val = Value::from_bool(val.lt(&rval)?),
                    BinaryOp::Gt => val = Value::from_bool(val.gt(&rval)?),
                    BinaryOp::Le => val = Value::from_bool(val.le(&rval)?),
                    BinaryOp::Ge => val = Value::from_bool(val.ge(&rval)?),
                }
                Ok(val)
            }
            Token::Paren(inner) => arena.get(*inner).calculate(arena, data),
            Token::Reduce { op, args, .. } => {
                let mut val = arena.get(args[0]).calculate(arena, &mut *data)?;
                for &arg in &args[1..] {
                    let rval = arena.get(arg).calculate(arena, &mut *data)?;
                    val = match op {
                        ReduceOp::Or => Value::from_bool(val.as_bool()? || rval.as_bool()?),
                        ReduceOp::And => Value::from_bool(val.as_bool()? && rval.as_bool()?),
                        ReduceOp::Min => {
                            if rval.lt(&val)? {
                                rval
                            } else {
                                val
                            }
                        }
                        ReduceOp::Max => {
                            if val.lt(&rval)? {
                                rval
                            } else {
                                val
                            }
                        }
                    };
                }
                Ok(val)
            }
            Token::Math1 { f, arg, .. } => {
                let v = arena.get(*arg).calculate(arena, data)?.as_number()?;
                Ok(Value::Number(f(v)))
            }
            Token::Math2 { f, args, .. } => {
                let a = arena.get(args[0]).calculate(arena, &mut *data)?.as_number()?;
                let b = arena.get(args[1]).calculate(arena, &mut *data)?.as_number()?;
                Ok(Value::Number(f(a, b)))
            }
            Token::If {
                condition,
                when_true,
                when_false,
            } => {
                // The untaken branch is never evaluated.
                let cond = arena.get(*condition).calculate(arena, &mut *data)?;
                let branch = if cond.as_bool()? {
                    *when_true
                } else {
                    *when_false
                };
                arena.get(branch).calculate(arena, data)
            }
            Token::Custom(custom) => custom.calculate(arena, data),
        }
    }

    /// Pre-order walk: self, then children left to right. Returns false as
    /// soon as the visitor does, leaving the rest of the tree unvisited.
    pub fn traverse(&self, arena: &TokenArena, visitor: &mut dyn FnMut(&Token) -> bool) -> bool {
        if !visitor(self) {
            return false;
        }
        match self {
            Token::Number(_) | Token::Str(_) => true,
            Token::Unary { operand, .. } => arena.get(*operand).traverse(arena, visitor),
            Token::Binary { left, right, .. } => {
                arena.get(*left).traverse(arena, visitor)
                    && arena.get(*right).traverse(arena, visitor)
            }
            Token::Paren(inner) => arena.get(*inner).traverse(arena, visitor),
            Token::Reduce { args, .. } => {
                for &arg in args {
                    if !arena.get(arg).traverse(arena, visitor) {
                        return false;
                    }
                }
                true
            }
            Token::Math1 { arg, .. } => arena.get(*arg).traverse(arena, visitor),
            Token::Math2 { args, .. } => {
                arena.get(args[0]).traverse(arena, visitor)
                    && arena.get(args[1]).traverse(arena, visitor)
            }
            Token::If {
                condition,
                when_true,
                when_false,
            } => {
                arena.get(*condition).traverse(arena, visitor)
                    && arena.get(*when_true).traverse(arena, visitor)
                    && arena.get(*when_false).traverse(arena, visitor)
            }
            Token::Custom(custom) => custom.traverse_children(arena, visitor),
        }
    }

    /// Renders this subtree back to text. Operator and parenthesis syntax is
    /// fixed; only literal rendering goes through the formatter.
    pub fn format(&self, arena: &TokenArena, fmt: &dyn Formatter, out: &mut String) {
        match self {
            Token::Number(v) => fmt.append_number(out, *v),
            Token::Str(s) => fmt.append_string(out, s),
            Token::Unary { op, operand } => {
                out.push_str(op.symbol());
                arena.get(*operand).format(arena, fmt, out);
            }
            Token::Binary { op, left, right } => {
                arena.get(*left).format(arena, fmt, out);
                out.push(' ');
                out.push_str(op.symbol());
                out.push(' ');
                arena.get(*right).format(arena, fmt, out);
            }
            Token::Paren(inner) => {
                out.push('(');
                arena.get(*inner).format(arena, fmt, out);
                out.push(')');
            }
            Token::Reduce { name, args, .. } => format_call(arena, fmt, out, name, args),
            Token::Math1 { name, arg, .. } => format_call(arena, fmt, out, name, &[*arg]),
            Token::Math2 { name, args, .. } => format_call(arena, fmt, out, name, args),
            Token::If {
                condition,
                when_true,
                when_false,
            } => format_call(
                arena,
                fmt,
                out,
                "If",
                &[*condition, *when_true, *when_false],
            ),
            Token::Custom(custom) => custom.format(arena, fmt, out),
        }
    }
}

fn format_call(
    arena: &TokenArena,
    fmt: &dyn Formatter,
    out: &mut String,
    name: &str,
    args: &[NodeId],
) {
    out.push_str(name);
    out.push('(');
    for (i, &arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        arena.get(arg).format(arena, fmt, out);
    }
    out.push(')');
}
