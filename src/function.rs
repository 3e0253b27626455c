use crate::arena::{NodeId, TokenArena};
use crate::error::ExprError;
use crate::token::{ReduceOp, Token};
use crate::value::PRECISION;
use std::fmt;

/// Required argument count of a function. `AtLeast` is the variadic form
/// with a minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(u8),
    AtLeast(u8),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n as usize,
            Arity::AtLeast(n) => count >= n as usize,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Named constructor turning already-parsed argument nodes into a token.
/// The parser checks arity before calling `make_token`.
pub trait Function: Sync {
    fn name(&self) -> &str;
    fn arity(&self) -> Arity;
    fn make_token(&self, arena: &mut TokenArena, args: Vec<NodeId>) -> Result<Token, ExprError>;
}

struct ReduceFunction {
    name: &'static str,
    op: ReduceOp,
}

impl Function for ReduceFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn make_token(&self, _arena: &mut TokenArena, args: Vec<NodeId>) -> Result<Token, ExprError> {
        Ok(Token::Reduce {
            name: self.name,
            op: self.op,
            args,
        })
    }
}

struct MathFunction1 {
    name: &'static str,
    f: fn(f64) -> f64,
}

impl Function for MathFunction1 {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn make_token(&self, _arena: &mut TokenArena, args: Vec<NodeId>) -> Result<Token, ExprError> {
        let [arg] = take_args(self.name, self.arity(), args)?;
        Ok(Token::Math1 {
            name: self.name,
            f: self.f,
            arg,
        })
    }
}

struct MathFunction2 {
    name: &'static str,
    f: fn(f64, f64) -> f64,
}

impl Function for MathFunction2 {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn make_token(&self, _arena: &mut TokenArena, args: Vec<NodeId>) -> Result<Token, ExprError> {
        let args = take_args(self.name, self.arity(), args)?;
        Ok(Token::Math2 {
            name: self.name,
            f: self.f,
            args,
        })
    }
}

struct IfFunction;

impl Function for IfFunction {
    fn name(&self) -> &str {
        "If"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(3)
    }

    fn make_token(&self, _arena: &mut TokenArena, args: Vec<NodeId>) -> Result<Token, ExprError> {
        let [condition, when_true, when_false] = take_args("If", self.arity(), args)?;
        Ok(Token::If {
            condition,
            when_true,
            when_false,
        })
    }
}

fn take_args<const N: usize>(
    name: &str,
    expected: Arity,
    args: Vec<NodeId>,
) -> Result<[NodeId; N], ExprError> {
    <[NodeId; N]>::try_from(args).map_err(|args| ExprError::ArityMismatch {
        name: name.to_string(),
        expected,
        got: args.len(),
    })
}

// The simple built-ins treat anything inside the epsilon band as zero, so
// Sign(1e-9) is 0 and Not(1e-9) is true.

fn value_is_null(x: f64) -> bool {
    x.abs() < PRECISION
}

fn bool_to_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

fn sign(x: f64) -> f64 {
    if value_is_null(x) {
        0.0
    } else if x > 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn not(x: f64) -> f64 {
    bool_to_value(value_is_null(x))
}

fn bit_xor(x: f64, y: f64) -> f64 {
    bool_to_value(!value_is_null(x) ^ !value_is_null(y))
}

static OR_FUN: ReduceFunction = ReduceFunction {
    name: "Or",
    op: ReduceOp::Or,
};
static AND_FUN: ReduceFunction = ReduceFunction {
    name: "And",
    op: ReduceOp::And,
};
static MIN_FUN: ReduceFunction = ReduceFunction {
    name: "Min",
    op: ReduceOp::Min,
};
static MAX_FUN: ReduceFunction = ReduceFunction {
    name: "Max",
    op: ReduceOp::Max,
};
static ABS_FUN: MathFunction1 = MathFunction1 {
    name: "Abs",
    f: f64::abs,
};
static NOT_FUN: MathFunction1 = MathFunction1 {
    name: "Not",
    f: not,
};
static SIGN_FUN: MathFunction1 = MathFunction1 {
    name: "Sign",
    f: sign,
};
static SQRT_FUN: MathFunction1 = MathFunction1 {
    name: "Sqrt",
    f: f64::sqrt,
};
static SIN_FUN: MathFunction1 = MathFunction1 {
    name: "Sin",
    f: f64::sin,
};
static COS_FUN: MathFunction1 = MathFunction1 {
    name: "Cos",
    f: f64::cos,
};
static TAN_FUN: MathFunction1 = MathFunction1 {
    name: "Tan",
    f: f64::tan,
};
static ASIN_FUN: MathFunction1 = MathFunction1 {
    name: "ASin",
    f: f64::asin,
};
static ACOS_FUN: MathFunction1 = MathFunction1 {
    name: "ACos",
    f: f64::acos,
};
static ATAN_FUN: MathFunction1 = MathFunction1 {
    name: "ATan",
    f: f64::atan,
};
static ATAN2_FUN: MathFunction2 = MathFunction2 {
    name: "ATan2",
    f: f64::atan2,
};
static BITXOR_FUN: MathFunction2 = MathFunction2 {
    name: "BitXor",
    f: bit_xor,
};
static IF_FUN: IfFunction = IfFunction;

static DEFAULT_FUNCTIONS: [&dyn Function; 17] = [
    &OR_FUN,
    &AND_FUN,
    &MIN_FUN,
    &MAX_FUN,
    &ABS_FUN,
    &NOT_FUN,
    &SIGN_FUN,
    &SQRT_FUN,
    &SIN_FUN,
    &COS_FUN,
    &TAN_FUN,
    &ASIN_FUN,
    &ACOS_FUN,
    &ATAN_FUN,
    &ATAN2_FUN,
    &BITXOR_FUN,
    &IF_FUN,
];

/// Looks a built-in up by name, case-insensitively.
pub fn find_default_function(name: &str) -> Option<&'static dyn Function> {
    DEFAULT_FUNCTIONS
        .iter()
        .copied()
        .find(|f| f.name().eq_ignore_ascii_case(name))
}
