use crate::delegate::Delegate;
use crate::error::ExprError;

/// Parse flag: disable built-in decimal literal scanning. Numeric literals
/// must then be produced by the delegate's `read_lexeme` hook.
pub const CUSTOM_NUM: u32 = 1;

/// Operator lexeme. The class (unary/binary capable) and the binary
/// precedence are derived from the operator itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Not,
}

impl Op {
    pub fn is_unary(self) -> bool {
        matches!(self, Op::Sub | Op::Not)
    }

    /// `None` for unary-only operators.
    pub fn binary_precedence(self) -> Option<u8> {
        match self {
            Op::Eq | Op::Lt | Op::Gt | Op::Le | Op::Ge => Some(0),
            Op::Add | Op::Sub => Some(1),
            Op::Mul | Op::Div => Some(2),
            Op::Pow => Some(3),
            Op::Not => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Ge => ">=",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Pow => "^",
            Op::Not => "!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LexemeKind<'s> {
    End,
    Number(f64),
    Str(&'s str),
    Name(&'s str),
    Open,
    Close,
    Comma,
    Op(Op),
    /// Host-defined lexeme produced by the delegate hook. The code is
    /// whatever the host chose; payloads are passed through untouched.
    Custom {
        code: u32,
        text: &'s str,
        number: f64,
    },
}

/// One scanned lexeme. Payloads borrow from the source string and are never
/// persisted past parsing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lexeme<'s> {
    pub kind: LexemeKind<'s>,
    pub pos: usize,
}

pub(crate) struct Lexer<'s, 'd> {
    src: &'s str,
    i: usize,
    delegate: &'d dyn Delegate,
    flags: u32,
}

impl<'s, 'd> Lexer<'s, 'd> {
    pub(crate) fn new(src: &'s str, delegate: &'d dyn Delegate, flags: u32) -> Self {
        Self {
            src,
            i: 0,
            delegate,
            flags,
        }
    }

    pub(crate) fn pos(&self) -> usize {
        self.i
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.i).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    /// Strictly advances; yields `End` forever once the input is exhausted.
    pub(crate) fn read_lexeme(&mut self) -> Result<Lexeme<'s>, ExprError> {
        self.skip_ws();
        let pos = self.i;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Lexeme {
                    kind: LexemeKind::End,
                    pos,
                })
            }
        };
        let kind = match c {
            b'(' => {
                self.i += 1;
                LexemeKind::Open
            }
            b')' => {
                self.i += 1;
                LexemeKind::Close
            }
            b',' => {
                self.i += 1;
                LexemeKind::Comma
            }
            b'!' => {
                self.i += 1;
                LexemeKind::Op(Op::Not)
            }
            b'=' => {
                self.i += 1;
                LexemeKind::Op(Op::Eq)
            }
            b'<' => {
                self.i += 1;
                if self.peek() == Some(b'=') {
                    self.i += 1;
                    LexemeKind::Op(Op::Le)
                } else {
                    LexemeKind::Op(Op::Lt)
                }
            }
            b'>' => {
                self.i += 1;
                if self.peek() == Some(b'=') {
                    self.i += 1;
                    LexemeKind::Op(Op::Ge)
                } else {
                    LexemeKind::Op(Op::Gt)
                }
            }
            b'+' => {
                self.i += 1;
                LexemeKind::Op(Op::Add)
            }
            b'-' => {
                self.i += 1;
                LexemeKind::Op(Op::Sub)
            }
            b'*' => {
                self.i += 1;
                LexemeKind::Op(Op::Mul)
            }
            b'/' => {
                self.i += 1;
                LexemeKind::Op(Op::Div)
            }
            b'^' => {
                self.i += 1;
                LexemeKind::Op(Op::Pow)
            }
            b'"' => self.read_string()?,
            _ => return self.read_other(pos),
        };
        Ok(Lexeme { kind, pos })
    }

    fn read_string(&mut self) -> Result<LexemeKind<'s>, ExprError> {
        let open = self.i;
        self.i += 1;
        let start = self.i;
        loop {
            match self.peek() {
                Some(b'"') => break,
                Some(_) => self.i += 1,
                None => return Err(ExprError::UnterminatedString(open)),
            }
        }
        let s = &self.src[start..self.i];
        self.i += 1;
        Ok(LexemeKind::Str(s))
    }

    /// Fallback chain for anything that is not punctuation or a string:
    /// built-in number scanning (unless suppressed), then the delegate hook,
    /// then a standard name.
    fn read_other(&mut self, pos: usize) -> Result<Lexeme<'s>, ExprError> {
        if self.flags & CUSTOM_NUM == 0 {
            if let Some(kind) = self.read_number()? {
                return Ok(Lexeme { kind, pos });
            }
        }
        if let Some((kind, consumed)) = self.delegate.read_lexeme(&self.src[self.i..])? {
            self.i += consumed;
            return Ok(Lexeme { kind, pos });
        }
        if let Some(kind) = self.read_name() {
            return Ok(Lexeme { kind, pos });
        }
        Err(ExprError::UnrecognizedLexeme(pos))
    }

    fn read_number(&mut self) -> Result<Option<LexemeKind<'s>>, ExprError> {
        let start = self.i;
        let mut seen_dot = false;
        let mut seen_digit = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                seen_digit = true;
                self.i += 1;
            } else if c == b'.' {
                if seen_dot {
                    return Err(ExprError::MalformedNumber(self.i));
                }
                seen_dot = true;
                self.i += 1;
            } else {
                break;
            }
        }
        if !seen_digit {
            // A lone dot is not a number; let the fallback chain have it.
            self.i = start;
            return Ok(None);
        }
        let s = &self.src[start..self.i];
        match s.parse::<f64>() {
            Ok(v) => Ok(Some(LexemeKind::Number(v))),
            Err(_) => Err(ExprError::MalformedNumber(start)),
        }
    }

    fn read_name(&mut self) -> Option<LexemeKind<'s>> {
        let start = self.i;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return None,
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                self.i += 1;
            } else {
                break;
            }
        }
        Some(LexemeKind::Name(&self.src[start..self.i]))
    }
}
